//! Water properties as a function of temperature.

use crate::error::{PhyschemError, PhyschemResult};
use aq_core::units::{Density, DynVisc, KinVisc, Temperature, kgpm3, m2ps, pas};

/// Density reference points, (temperature K, density kg/m³), 0–100 °C.
const DENSITY_TABLE: [(f64, f64); 12] = [
    (273.15, 999.9),
    (278.15, 1000.0),
    (283.15, 999.7),
    (293.15, 998.2),
    (303.15, 995.7),
    (313.15, 992.2),
    (323.15, 988.1),
    (333.15, 983.2),
    (343.15, 977.8),
    (353.15, 971.8),
    (363.15, 965.3),
    (373.15, 958.4),
];

fn check_temperature(temp: Temperature) -> PhyschemResult<f64> {
    let t = temp.value;
    if !t.is_finite() || t <= 0.0 {
        return Err(PhyschemError::NonPhysical { what: "temperature" });
    }
    Ok(t)
}

/// Density of water at the given temperature.
///
/// Linear interpolation over the reference table; temperatures outside
/// 0–100 °C clamp to the table endpoints.
pub fn density(temp: Temperature) -> PhyschemResult<Density> {
    let t = check_temperature(temp)?;

    let (t_first, rho_first) = DENSITY_TABLE[0];
    if t <= t_first {
        return Ok(kgpm3(rho_first));
    }
    for window in DENSITY_TABLE.windows(2) {
        let (t0, rho0) = window[0];
        let (t1, rho1) = window[1];
        if t <= t1 {
            let frac = (t - t0) / (t1 - t0);
            return Ok(kgpm3(rho0 + frac * (rho1 - rho0)));
        }
    }
    let (_, rho_last) = DENSITY_TABLE[DENSITY_TABLE.len() - 1];
    Ok(kgpm3(rho_last))
}

/// Dynamic viscosity of water in Pa·s, Vogel-type correlation.
fn viscosity_dynamic_si(t_kelvin: f64) -> PhyschemResult<f64> {
    // Correlation diverges approaching 140 K; liquid water is far above that.
    if t_kelvin <= 140.0 {
        return Err(PhyschemError::NonPhysical { what: "temperature" });
    }
    Ok(2.414e-5 * 10_f64.powf(247.8 / (t_kelvin - 140.0)))
}

/// Dynamic viscosity of water at the given temperature.
pub fn viscosity_dynamic(temp: Temperature) -> PhyschemResult<DynVisc> {
    let t = check_temperature(temp)?;
    Ok(pas(viscosity_dynamic_si(t)?))
}

/// Kinematic viscosity of water at the given temperature.
pub fn viscosity_kinematic(temp: Temperature) -> PhyschemResult<KinVisc> {
    let mu = viscosity_dynamic(temp)?;
    let rho = density(temp)?;
    Ok(m2ps(mu.value / rho.value))
}
