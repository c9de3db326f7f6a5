//! Pipe flow relations: Reynolds number, friction factor, head loss, and the
//! inverse problem of flow rate from head loss.
//!
//! Head losses follow Darcy-Weisbach in head form. The turbulent friction
//! factor uses the Swamee-Jain approximation to Colebrook-White; the flow
//! inversion uses the exact Colebrook form, which is explicit in that
//! direction.

use crate::error::{PhyschemError, PhyschemResult};
use aq_core::numeric::{ensure_finite, ensure_positive};
use aq_core::units::constants::G0_MPS2;
use aq_core::units::{KinVisc, Length, VolumeRate, m, m3ps};

/// Laminar-turbulent transition Reynolds number for pipe flow.
pub const RE_TRANSITION_PIPE: f64 = 2100.0;

/// Flow rates below this are treated as stagnant (m³/s).
const EPSILON_FLOW: f64 = 1e-12;

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 0.01;

fn check_positive(v: f64, what: &'static str) -> PhyschemResult<f64> {
    ensure_positive(v, what).map_err(|_| PhyschemError::NonPhysical { what })
}

fn check_non_negative(v: f64, what: &'static str) -> PhyschemResult<f64> {
    ensure_finite(v, what).map_err(|_| PhyschemError::NonPhysical { what })?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(PhyschemError::NonPhysical { what })
    }
}

fn area_circle(diam: f64) -> f64 {
    std::f64::consts::PI * diam * diam / 4.0
}

/// Reynolds number for flow through a circular pipe.
pub fn reynolds_pipe(flow: VolumeRate, diam: Length, nu: KinVisc) -> PhyschemResult<f64> {
    let q = check_non_negative(flow.value, "flow rate")?;
    let d = check_positive(diam.value, "diameter")?;
    let nu = check_positive(nu.value, "viscosity")?;
    Ok(4.0 * q / (std::f64::consts::PI * d * nu))
}

/// Darcy friction factor: 64/Re below the transition Reynolds number,
/// Swamee-Jain above it.
pub fn friction_factor(
    flow: VolumeRate,
    diam: Length,
    nu: KinVisc,
    roughness: Length,
) -> PhyschemResult<f64> {
    let re = reynolds_pipe(flow, diam, nu)?;
    if re <= 0.0 {
        return Err(PhyschemError::NonPhysical { what: "flow rate" });
    }
    let e_d = check_non_negative(roughness.value, "roughness")? / diam.value;

    let f = if re <= RE_TRANSITION_PIPE {
        64.0 / re
    } else {
        let a = e_d / 3.7;
        let b = 5.74 / re.powf(0.9);
        let f = 0.25 / (a + b).log10().powi(2);
        f.max(0.0001)
    };
    Ok(f)
}

/// Major (friction) head loss along a straight pipe.
pub fn headloss_fric(
    flow: VolumeRate,
    diam: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
) -> PhyschemResult<Length> {
    let q = check_non_negative(flow.value, "flow rate")?;
    let d = check_positive(diam.value, "diameter")?;
    let l = check_positive(length.value, "length")?;
    if q < EPSILON_FLOW {
        return Ok(m(0.0));
    }

    let f = friction_factor(flow, diam, nu, roughness)?;
    let v = q / area_circle(d);
    Ok(m(f * (l / d) * v * v / (2.0 * G0_MPS2)))
}

/// Minor head loss through a fitting or flow expansion with coefficient `k`.
pub fn headloss_minor(flow: VolumeRate, diam: Length, k: f64) -> PhyschemResult<Length> {
    let q = check_non_negative(flow.value, "flow rate")?;
    let d = check_positive(diam.value, "diameter")?;
    check_non_negative(k, "minor loss coefficient")?;
    if q < EPSILON_FLOW {
        return Ok(m(0.0));
    }

    let v = q / area_circle(d);
    Ok(m(k * v * v / (2.0 * G0_MPS2)))
}

/// Total head loss: friction over `length` plus the minor term for `k`.
pub fn headloss(
    flow: VolumeRate,
    diam: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    k: f64,
) -> PhyschemResult<Length> {
    let major = headloss_fric(flow, diam, length, nu, roughness)?;
    let minor = headloss_minor(flow, diam, k)?;
    Ok(major + minor)
}

/// Flow rate at the laminar-turbulent transition for the given pipe.
fn flow_transition(diam: f64, nu: f64) -> f64 {
    std::f64::consts::PI / 4.0 * diam * nu * RE_TRANSITION_PIPE
}

/// Laminar (Hagen-Poiseuille) flow from friction head loss.
fn flow_hagen(diam: f64, hf: f64, length: f64, nu: f64) -> f64 {
    std::f64::consts::PI * diam.powi(4) * G0_MPS2 * hf / (128.0 * nu * length)
}

/// Turbulent flow from friction head loss, exact inversion of Colebrook-White.
fn flow_swamee(diam: f64, hf: f64, length: f64, nu: f64, roughness: f64) -> f64 {
    let friction_vel = (2.0 * G0_MPS2 * diam * hf / length).sqrt();
    let log_term = (roughness / (3.7 * diam) + 2.51 * nu / (diam * friction_vel)).log10();
    -2.0 * area_circle(diam) * friction_vel * log_term
}

/// Flow from friction head loss alone, picking the laminar or turbulent branch.
fn flow_pipemajor(diam: f64, hf: f64, length: f64, nu: f64, roughness: f64) -> f64 {
    let laminar = flow_hagen(diam, hf, length, nu);
    if laminar < flow_transition(diam, nu) {
        laminar
    } else {
        flow_swamee(diam, hf, length, nu, roughness)
    }
}

/// Flow from minor head loss alone.
fn flow_pipeminor(diam: f64, hm: f64, k: f64) -> f64 {
    area_circle(diam) * (2.0 * G0_MPS2 * hm / k).sqrt()
}

/// Flow rate through a pipe for a given total head loss.
///
/// With `k == 0` this is the closed-form friction inversion. Otherwise the
/// head loss is split between major and minor terms by damped fixed-point
/// iteration, bounded at 100 rounds.
pub fn flow_pipe(
    diam: Length,
    headloss: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    k: f64,
) -> PhyschemResult<VolumeRate> {
    let d = check_positive(diam.value, "diameter")?;
    let hl = check_positive(headloss.value, "head loss")?;
    let l = check_positive(length.value, "length")?;
    let nu = check_positive(nu.value, "viscosity")?;
    let rough = check_non_negative(roughness.value, "roughness")?;
    check_non_negative(k, "minor loss coefficient")?;

    if k == 0.0 {
        return Ok(m3ps(flow_pipemajor(d, hl, l, nu, rough)));
    }

    // Neither loss term can pass more than the whole head loss.
    let mut flow = flow_pipemajor(d, hl, l, nu, rough).min(flow_pipeminor(d, hl, k));
    for _ in 0..MAX_ITERATIONS {
        let prev = flow;
        let hf = headloss_fric(m3ps(flow), diam, length, aq_core::units::m2ps(nu), roughness)?;
        let hm = headloss_minor(m3ps(flow), diam, k)?;
        let total = hf.value + hm.value;
        if total <= 0.0 {
            return Err(PhyschemError::NonPhysical { what: "head loss split" });
        }
        let hf_new = hl * hf.value / total;
        flow = flow_pipemajor(d, hf_new, l, nu, rough);

        let err = (flow - prev).abs() * 2.0 / (flow + prev);
        if err <= TOLERANCE {
            return Ok(m3ps(flow));
        }
    }
    Err(PhyschemError::Convergence {
        what: "flow from head loss with minor losses",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::viscosity_kinematic;
    use aq_core::units::{degc, lps};

    fn nu_20c() -> KinVisc {
        viscosity_kinematic(degc(20.0)).unwrap()
    }

    #[test]
    fn reynolds_matches_hand_calc() {
        // Re = 4Q / (pi * D * nu)
        let re = reynolds_pipe(lps(5.0), m(0.1), nu_20c()).unwrap();
        let expected = 4.0 * 0.005 / (std::f64::consts::PI * 0.1 * nu_20c().value);
        assert!((re - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn friction_factor_turbulent_range() {
        let f = friction_factor(lps(5.0), m(0.1), nu_20c(), mm_len(0.12)).unwrap();
        assert!(f > 0.01 && f < 0.08, "f = {f}");
    }

    #[test]
    fn friction_factor_laminar_branch() {
        // Tiny flow in a narrow pipe stays laminar: f = 64/Re.
        let q = lps(0.001);
        let d = m(0.05);
        let re = reynolds_pipe(q, d, nu_20c()).unwrap();
        assert!(re < RE_TRANSITION_PIPE);
        let f = friction_factor(q, d, nu_20c(), mm_len(0.0)).unwrap();
        assert!((f - 64.0 / re).abs() < 1e-12);
    }

    #[test]
    fn headloss_zero_flow_is_zero() {
        let hl = headloss_fric(lps(0.0), m(0.1), m(10.0), nu_20c(), mm_len(0.12)).unwrap();
        assert_eq!(hl.value, 0.0);
    }

    #[test]
    fn headloss_increases_with_length() {
        let short = headloss_fric(lps(5.0), m(0.1), m(5.0), nu_20c(), mm_len(0.12)).unwrap();
        let long = headloss_fric(lps(5.0), m(0.1), m(20.0), nu_20c(), mm_len(0.12)).unwrap();
        assert!(long.value > short.value);
    }

    #[test]
    fn minor_loss_scales_with_k() {
        let one = headloss_minor(lps(5.0), m(0.1), 1.0).unwrap();
        let two = headloss_minor(lps(5.0), m(0.1), 2.0).unwrap();
        assert!((two.value - 2.0 * one.value).abs() < 1e-12);
    }

    #[test]
    fn laminar_inversion_is_exact() {
        let q = lps(0.001);
        let d = m(0.05);
        let hf = headloss_fric(q, d, m(10.0), nu_20c(), mm_len(0.0)).unwrap();
        let back = flow_pipe(d, hf, m(10.0), nu_20c(), mm_len(0.0), 0.0).unwrap();
        assert!((back.value - q.value).abs() / q.value < 1e-9);
    }

    #[test]
    fn turbulent_inversion_round_trip() {
        let q = lps(5.0);
        let d = m(0.1);
        let hf = headloss_fric(q, d, m(10.0), nu_20c(), mm_len(0.12)).unwrap();
        let back = flow_pipe(d, hf, m(10.0), nu_20c(), mm_len(0.12), 0.0).unwrap();
        // Swamee direct-flow vs. Swamee-Jain factor agree to a few percent.
        assert!((back.value - q.value).abs() / q.value < 0.05);
    }

    #[test]
    fn inversion_with_minor_losses_round_trip() {
        let q = lps(5.0);
        let d = m(0.1);
        let k = 4.0;
        let hl = headloss(q, d, m(10.0), nu_20c(), mm_len(0.12), k).unwrap();
        let back = flow_pipe(d, hl, m(10.0), nu_20c(), mm_len(0.12), k).unwrap();
        assert!((back.value - q.value).abs() / q.value < 0.05);
    }

    #[test]
    fn zero_head_loss_rejected() {
        let result = flow_pipe(m(0.1), m(0.0), m(10.0), nu_20c(), mm_len(0.12), 0.0);
        assert!(matches!(result, Err(PhyschemError::NonPhysical { .. })));
    }

    fn mm_len(v: f64) -> Length {
        aq_core::units::mm(v)
    }
}
