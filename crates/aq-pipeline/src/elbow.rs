//! Elbow fittings.

use aq_catalog::{nearest_fitting_by_id, nearest_fitting_by_size};
use aq_core::units::{Length, inch};

use crate::component::{Component, Kind, validate_link};
use crate::config::{Configured, PlantConfig};
use crate::error::{PipelineError, PipelineResult};

/// Elbow sweep angle; each value carries a fixed minor-loss coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElbowAngle {
    Deg45,
    Deg90,
}

impl ElbowAngle {
    pub fn k_minor(self) -> f64 {
        match self {
            ElbowAngle::Deg45 => 0.45,
            ElbowAngle::Deg90 => 0.9,
        }
    }

    pub fn degrees(self) -> f64 {
        match self {
            ElbowAngle::Deg45 => 45.0,
            ElbowAngle::Deg90 => 90.0,
        }
    }
}

/// An elbow fitting with minor head loss.
#[derive(Debug, Clone)]
pub struct Elbow {
    config: PlantConfig,
    size: Length,
    inner_diameter: Length,
    angle: ElbowAngle,
    next: Option<Box<Component>>,
}

impl Elbow {
    pub fn builder() -> ElbowBuilder {
        ElbowBuilder::default()
    }

    /// Nominal (catalog) size.
    pub fn size(&self) -> Length {
        self.size
    }

    pub fn inner_diameter(&self) -> Length {
        self.inner_diameter
    }

    pub fn angle(&self) -> ElbowAngle {
        self.angle
    }

    pub fn k_minor(&self) -> f64 {
        self.angle.k_minor()
    }

    pub fn next(&self) -> Option<&Component> {
        self.next.as_deref()
    }

    pub(crate) fn next_slot(&mut self) -> &mut Option<Box<Component>> {
        &mut self.next
    }

    /// Minor head loss through the elbow at the current flow.
    pub fn head_loss(&self) -> PipelineResult<Length> {
        Ok(aq_physchem::headloss_minor(
            self.flow(),
            self.inner_diameter,
            self.k_minor(),
        )?)
    }

    pub fn describe(&self) -> String {
        format!(
            "Elbow: (Size: {:.3} in, ID: {:.3} in, Angle: {} deg)",
            self.size.get::<uom::si::length::inch>(),
            self.inner_diameter.get::<uom::si::length::inch>(),
            self.angle.degrees(),
        )
    }
}

impl Configured for Elbow {
    fn config(&self) -> &PlantConfig {
        &self.config
    }

    fn set_config(&mut self, config: PlantConfig) {
        self.config = config;
    }
}

/// Builder for [`Elbow`]. Size resolution goes through the fitting table,
/// nearest entry by absolute difference.
#[derive(Debug, Default)]
pub struct ElbowBuilder {
    size: Option<Length>,
    inner_diameter: Option<Length>,
    angle: Option<ElbowAngle>,
    config: Option<PlantConfig>,
    next: Option<Component>,
}

impl ElbowBuilder {
    pub fn size(mut self, size: Length) -> Self {
        self.size = Some(size);
        self
    }

    pub fn inner_diameter(mut self, inner_diameter: Length) -> Self {
        self.inner_diameter = Some(inner_diameter);
        self
    }

    pub fn angle(mut self, angle: ElbowAngle) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn config(mut self, config: PlantConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn next(mut self, next: impl Into<Component>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn build(self) -> PipelineResult<Elbow> {
        if self.size.is_some() && self.inner_diameter.is_some() {
            return Err(PipelineError::InvalidConfiguration {
                what: "an elbow takes either a nominal size or an inner diameter, not both",
            });
        }

        let row = match (self.size, self.inner_diameter) {
            (None, Some(id)) => nearest_fitting_by_id(id),
            (given_size, None) => nearest_fitting_by_size(given_size.unwrap_or_else(|| inch(0.5))),
            (Some(_), Some(_)) => unreachable!("rejected above"),
        };
        let size = inch(row.size_in);
        let inner_diameter = inch(row.id_in);

        validate_link(Kind::Elbow, size, self.next.as_ref())?;

        Ok(Elbow {
            config: self.config.unwrap_or_default(),
            size,
            inner_diameter,
            angle: self.angle.unwrap_or(ElbowAngle::Deg90),
            next: self.next.map(Box::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_90_degree_half_inch_elbow() {
        let elbow = Elbow::builder().build().unwrap();
        assert_eq!(elbow.angle(), ElbowAngle::Deg90);
        assert!((elbow.size().get::<uom::si::length::inch>() - 0.5).abs() < 1e-9);
        assert!((elbow.inner_diameter().get::<uom::si::length::inch>() - 0.848).abs() < 1e-9);
    }

    #[test]
    fn angle_selects_the_coefficient() {
        let quarter = Elbow::builder().angle(ElbowAngle::Deg90).build().unwrap();
        let eighth = Elbow::builder().angle(ElbowAngle::Deg45).build().unwrap();
        assert_eq!(quarter.k_minor(), 0.9);
        assert_eq!(eighth.k_minor(), 0.45);
    }

    #[test]
    fn both_size_and_id_rejected() {
        let result = Elbow::builder()
            .size(inch(0.5))
            .inner_diameter(inch(0.848))
            .build();
        assert!(matches!(
            result,
            Err(PipelineError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn size_resolves_by_id_lookup() {
        let elbow = Elbow::builder().inner_diameter(inch(1.3)).build().unwrap();
        assert!((elbow.size().get::<uom::si::length::inch>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn head_loss_is_positive_at_default_flow() {
        let elbow = Elbow::builder().build().unwrap();
        let hl = elbow.head_loss().unwrap();
        assert!(hl.value > 0.0);
    }
}
