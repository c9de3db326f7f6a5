//! Flocculator channel and baffle geometry.

use aq_core::units::{Length, Time, VelGradient, Volume, cm, m, m3, per_second, s};
use aq_core::units::constants::G0_MPS2;
use aq_pipeline::{Configured, PlantConfig};

use crate::error::{FlocError, FlocResult};

/// Vena contracta ratio of the flow contracting around a baffle edge.
pub const VC_BAFFLE_RATIO: f64 = 0.63;

/// Minor-loss coefficient of one flow expansion around a baffle,
/// K = (1/VC² - 1)².
pub fn baffle_k() -> f64 {
    (1.0 / (VC_BAFFLE_RATIO * VC_BAFFLE_RATIO) - 1.0).powi(2)
}

/// Bounds on the ratio of distance-between-expansions to baffle spacing for
/// geometry with near-optimal mixing efficiency.
pub const HS_RATIO_MIN: f64 = 3.0;
pub const HS_RATIO_MAX: f64 = 6.0;

/// Minimum constructible channel width (a person must fit in the channel).
pub fn min_constructible_width() -> Length {
    cm(45.0)
}

/// Sizing calculator for a baffled hydraulic flocculator.
///
/// Flow rate and temperature come from the shared plant configuration; the
/// design targets below are per-unit parameters.
#[derive(Debug, Clone)]
pub struct Flocculator {
    config: PlantConfig,
    /// Head loss allotted to the whole flocculator
    head_loss: Length,
    /// Target collision potential Gt
    collision_potential: f64,
    /// Water depth at the end of the flocculator
    end_water_depth: Length,
}

impl Flocculator {
    pub fn new(config: PlantConfig) -> Self {
        Self {
            config,
            head_loss: cm(40.0),
            collision_potential: 37_000.0,
            end_water_depth: m(2.0),
        }
    }

    pub fn with_head_loss(mut self, head_loss: Length) -> Self {
        self.head_loss = head_loss;
        self
    }

    pub fn with_collision_potential(mut self, collision_potential: f64) -> Self {
        self.collision_potential = collision_potential;
        self
    }

    pub fn with_end_water_depth(mut self, end_water_depth: Length) -> Self {
        self.end_water_depth = end_water_depth;
        self
    }

    pub fn head_loss(&self) -> Length {
        self.head_loss
    }

    pub fn collision_potential(&self) -> f64 {
        self.collision_potential
    }

    pub fn end_water_depth(&self) -> Length {
        self.end_water_depth
    }

    /// Design inputs in SI, validated: (flow, viscosity, head loss, Gt, depth).
    fn design_inputs(&self) -> FlocResult<(f64, f64, f64, f64, f64)> {
        let q = self.flow().value;
        if !(q.is_finite() && q > 0.0) {
            return Err(FlocError::NonPhysical { what: "flow rate" });
        }
        let hl = self.head_loss.value;
        if !(hl.is_finite() && hl > 0.0) {
            return Err(FlocError::NonPhysical { what: "head loss" });
        }
        let gt = self.collision_potential;
        if !(gt.is_finite() && gt > 0.0) {
            return Err(FlocError::NonPhysical {
                what: "collision potential",
            });
        }
        let depth = self.end_water_depth.value;
        if !(depth.is_finite() && depth > 0.0) {
            return Err(FlocError::NonPhysical { what: "water depth" });
        }
        let nu = aq_physchem::viscosity_kinematic(self.temperature())?.value;
        Ok((q, nu, hl, gt, depth))
    }

    fn vel_gradient_si(&self) -> FlocResult<f64> {
        let (_, nu, hl, gt, _) = self.design_inputs()?;
        Ok(G0_MPS2 * hl / (gt * nu))
    }

    /// Average velocity gradient G over the flocculator.
    pub fn vel_gradient_avg(&self) -> FlocResult<VelGradient> {
        Ok(per_second(self.vel_gradient_si()?))
    }

    /// Total water volume required to reach the collision potential.
    pub fn volume(&self) -> FlocResult<Volume> {
        let (q, ..) = self.design_inputs()?;
        Ok(m3(self.collision_potential * q / self.vel_gradient_si()?))
    }

    /// Hydraulic residence time, Gt / G.
    pub fn retention_time(&self) -> FlocResult<Time> {
        Ok(s(self.collision_potential / self.vel_gradient_si()?))
    }

    /// Minimum channel width that keeps the expansion-to-spacing ratio at or
    /// above its lower bound with one expansion per baffle.
    pub fn width_hs_min(&self) -> FlocResult<Length> {
        let (q, nu, _, _, depth) = self.design_inputs()?;
        let g = self.vel_gradient_si()?;
        let w = HS_RATIO_MIN
            * (baffle_k() / (2.0 * depth * g * g * nu)).powf(1.0 / 3.0)
            * q
            / depth;
        Ok(m(w))
    }

    /// Minimum channel width: the hydraulic minimum or the constructible
    /// minimum, whichever is larger.
    pub fn width_min(&self) -> FlocResult<Length> {
        let hydraulic = self.width_hs_min()?;
        Ok(m(hydraulic.value.max(min_constructible_width().value)))
    }

    /// Number of channels the total plan width divides into; even, at least 2.
    pub fn channel_count(&self, total_width: Length) -> FlocResult<u32> {
        let w_min = self.width_min()?.value;
        let raw = total_width.value / w_min;
        let even = ((raw / 2.0).floor() * 2.0).max(2.0);
        Ok(even as u32)
    }

    /// Width of each channel after dividing the total plan width.
    pub fn channel_width(&self, total_width: Length) -> FlocResult<Length> {
        let count = self.channel_count(total_width)? as f64;
        Ok(m(total_width.value / count))
    }

    /// Maximum streamwise distance between flow expansions for the largest
    /// allowable expansion-to-spacing ratio.
    pub fn expansion_dist_max(&self, channel_width: Length) -> FlocResult<Length> {
        let (q, nu, _, _, _) = self.design_inputs()?;
        if !(channel_width.value.is_finite() && channel_width.value > 0.0) {
            return Err(FlocError::NonPhysical {
                what: "channel width",
            });
        }
        let g = self.vel_gradient_si()?;
        let term1 = (baffle_k() / (2.0 * g * g * nu)).powf(0.25);
        let term2 = (HS_RATIO_MAX * q / channel_width.value).powf(0.75);
        Ok(m(term1 * term2))
    }

    /// Minimum number of flow expansions per baffle space.
    pub fn expansion_count(&self, channel_width: Length) -> FlocResult<u32> {
        let d_max = self.expansion_dist_max(channel_width)?.value;
        let (_, _, _, _, depth) = self.design_inputs()?;
        Ok((depth / d_max).ceil() as u32)
    }

    /// Vertical height between flow expansions.
    pub fn expansion_height(&self, channel_width: Length) -> FlocResult<Length> {
        let count = self.expansion_count(channel_width)? as f64;
        Ok(m(self.end_water_depth.value / count))
    }

    /// Spacing between baffles along the channel.
    pub fn baffle_spacing(&self, channel_width: Length) -> FlocResult<Length> {
        let (q, nu, _, _, _) = self.design_inputs()?;
        let g = self.vel_gradient_si()?;
        let d_max = self.expansion_dist_max(channel_width)?.value;
        let spacing = (baffle_k() / (2.0 * d_max * g * g * nu)).powf(1.0 / 3.0) * q
            / min_constructible_width().value;
        Ok(m(spacing))
    }

    /// Number of baffles one channel can hold; zero if the spacing does not
    /// fit the depth even once.
    pub fn baffle_count(&self, channel_width: Length) -> FlocResult<u32> {
        let spacing = self.baffle_spacing(channel_width)?.value;
        let (_, _, _, _, depth) = self.design_inputs()?;
        let count = depth / spacing - 1.0;
        Ok(count.max(0.0).floor() as u32)
    }
}

impl Configured for Flocculator {
    fn config(&self) -> &PlantConfig {
        &self.config
    }

    fn set_config(&mut self, config: PlantConfig) {
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::units::{degc, lps};

    fn default_floc() -> Flocculator {
        Flocculator::new(PlantConfig::new(lps(20.0), degc(25.0)))
    }

    #[test]
    fn baffle_k_matches_vena_contracta() {
        // (1/0.63^2 - 1)^2
        assert!((baffle_k() - 2.3085).abs() < 1e-3);
    }

    #[test]
    fn vel_gradient_reference_value() {
        // 40 cm of head loss toward Gt = 37000 at 25 °C gives G ~ 118.7 1/s.
        let g = default_floc().vel_gradient_avg().unwrap();
        assert!((g.value - 118.7).abs() / 118.7 < 0.01, "G = {}", g.value);
    }

    #[test]
    fn volume_reference_value() {
        // ~6.23 m³ at 20 L/s with the default targets.
        let vol = default_floc().volume().unwrap();
        assert!((vol.value - 6.23).abs() / 6.23 < 0.01, "vol = {}", vol.value);
    }

    #[test]
    fn retention_time_is_volume_over_flow() {
        let floc = default_floc();
        let vol = floc.volume().unwrap();
        let t = floc.retention_time().unwrap();
        assert!((t.value - vol.value / 0.02).abs() < 1e-9);
    }

    #[test]
    fn width_min_is_at_least_constructible() {
        let w = default_floc().width_min().unwrap();
        assert!(w.value >= min_constructible_width().value - 1e-12);
    }

    #[test]
    fn channel_count_is_even_and_at_least_two() {
        let floc = default_floc();
        for total in [0.5_f64, 1.0, 2.0, 5.0, 10.0] {
            let count = floc.channel_count(m(total)).unwrap();
            assert!(count >= 2);
            assert_eq!(count % 2, 0);
        }
    }

    #[test]
    fn expansion_geometry_is_consistent() {
        let floc = default_floc();
        let w = m(0.45);
        let d_max = floc.expansion_dist_max(w).unwrap();
        assert!(d_max.value > 0.0);

        let count = floc.expansion_count(w).unwrap();
        assert!(count >= 1);

        let height = floc.expansion_height(w).unwrap();
        assert!(height.value <= d_max.value + 1e-12);
        assert!((height.value * count as f64 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn baffle_spacing_fits_several_baffles() {
        let floc = default_floc();
        let spacing = floc.baffle_spacing(m(0.45)).unwrap();
        assert!(spacing.value > 0.0);
        let count = floc.baffle_count(m(0.45)).unwrap();
        assert_eq!(
            count,
            ((2.0 / spacing.value - 1.0).max(0.0)).floor() as u32
        );
    }

    #[test]
    fn higher_target_gt_needs_more_volume() {
        let base = default_floc();
        let harder = default_floc().with_collision_potential(50_000.0);
        assert!(harder.volume().unwrap().value > base.volume().unwrap().value);
    }

    #[test]
    fn config_propagates_from_the_flocculator() {
        use aq_core::units::inch;
        use aq_pipeline::Pipe;

        let floc = Flocculator::new(PlantConfig::new(lps(35.0), degc(15.0)));
        let mut drain = Pipe::builder().size(inch(2.0)).build().unwrap();

        floc.propagate_config(&mut [&mut drain]);

        assert!(floc.config().shares_record_with(drain.config()));
        assert!((drain.flow().value - 0.035).abs() < 1e-12);
    }

    #[test]
    fn zero_flow_is_rejected() {
        let floc = Flocculator::new(PlantConfig::new(lps(0.0), degc(25.0)));
        assert!(matches!(
            floc.vel_gradient_avg(),
            Err(FlocError::NonPhysical { .. })
        ));
    }
}
