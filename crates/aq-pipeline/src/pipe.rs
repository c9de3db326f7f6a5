//! Straight pipe segments.

use std::fmt;

use aq_catalog::{next_available_size, sch40_row_for_size};
use aq_core::units::{Length, inch, m};
use aq_physchem::materials;

use crate::component::{Component, Kind, validate_link};
use crate::config::{Configured, PlantConfig};
use crate::error::{PipelineError, PipelineResult};

/// Pipe dimension standards determining wall thickness relative to diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeStandard {
    Sdr26,
    Sdr41,
    Sch40,
}

impl PipeStandard {
    /// Standard dimension ratio (OD over wall thickness) for SDR specs.
    pub fn sdr(self) -> Option<f64> {
        match self {
            PipeStandard::Sdr26 => Some(26.0),
            PipeStandard::Sdr41 => Some(41.0),
            PipeStandard::Sch40 => None,
        }
    }
}

impl fmt::Display for PipeStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipeStandard::Sdr26 => "sdr26",
            PipeStandard::Sdr41 => "sdr41",
            PipeStandard::Sch40 => "sch40",
        };
        write!(f, "{label}")
    }
}

/// A straight pipe segment with friction (major) head loss.
#[derive(Debug, Clone)]
pub struct Pipe {
    config: PlantConfig,
    size: Length,
    inner_diameter: Length,
    standard: PipeStandard,
    length: Length,
    roughness: Length,
    k_minor: f64,
    next: Option<Box<Component>>,
}

impl Pipe {
    pub fn builder() -> PipeBuilder {
        PipeBuilder::default()
    }

    /// Nominal (catalog) size.
    pub fn size(&self) -> Length {
        self.size
    }

    pub fn inner_diameter(&self) -> Length {
        self.inner_diameter
    }

    /// Outer diameter from the catalog row for this nominal size.
    pub fn outer_diameter(&self) -> Length {
        inch(sch40_row_for_size(self.size).od_in)
    }

    pub fn standard(&self) -> PipeStandard {
        self.standard
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn roughness(&self) -> Length {
        self.roughness
    }

    pub fn k_minor(&self) -> f64 {
        self.k_minor
    }

    pub fn next(&self) -> Option<&Component> {
        self.next.as_deref()
    }

    pub(crate) fn next_slot(&mut self) -> &mut Option<Box<Component>> {
        &mut self.next
    }

    /// Friction head loss over this segment at the current flow and
    /// temperature, plus the externally supplied minor-loss term if any.
    pub fn head_loss(&self) -> PipelineResult<Length> {
        let nu = aq_physchem::viscosity_kinematic(self.temperature())?;
        Ok(aq_physchem::headloss(
            self.flow(),
            self.inner_diameter,
            self.length,
            nu,
            self.roughness,
            self.k_minor,
        )?)
    }

    pub fn describe(&self) -> String {
        format!(
            "Pipe: (OD: {:.3} in, Size: {:.3} in, ID: {:.3} in, Length: {:.2} m, Spec: {})",
            self.outer_diameter().get::<uom::si::length::inch>(),
            self.size.get::<uom::si::length::inch>(),
            self.inner_diameter.get::<uom::si::length::inch>(),
            self.length.value,
            self.standard,
        )
    }

    /// Inner diameters of every available catalog size under the given SDR.
    pub fn sdr_available_ids(sdr: f64) -> Vec<Length> {
        aq_catalog::pipes::rows()
            .iter()
            .filter(|row| row.available)
            .map(|row| inch(row.nominal_in * (sdr - 2.0) / sdr))
            .collect()
    }
}

impl Configured for Pipe {
    fn config(&self) -> &PlantConfig {
        &self.config
    }

    fn set_config(&mut self, config: PlantConfig) {
        self.config = config;
    }
}

/// Builder for [`Pipe`].
///
/// Takes a nominal `size` or an `inner_diameter`, never both; whichever is
/// given, the other is derived from the dimension standard and both are
/// snapped to the catalog.
#[derive(Debug, Default)]
pub struct PipeBuilder {
    size: Option<Length>,
    inner_diameter: Option<Length>,
    standard: Option<PipeStandard>,
    length: Option<Length>,
    roughness: Option<Length>,
    k_minor: Option<f64>,
    config: Option<PlantConfig>,
    next: Option<Component>,
}

impl PipeBuilder {
    pub fn size(mut self, size: Length) -> Self {
        self.size = Some(size);
        self
    }

    pub fn inner_diameter(mut self, inner_diameter: Length) -> Self {
        self.inner_diameter = Some(inner_diameter);
        self
    }

    pub fn standard(mut self, standard: PipeStandard) -> Self {
        self.standard = Some(standard);
        self
    }

    pub fn length(mut self, length: Length) -> Self {
        self.length = Some(length);
        self
    }

    pub fn roughness(mut self, roughness: Length) -> Self {
        self.roughness = Some(roughness);
        self
    }

    /// Extra minor-loss coefficient charged to this segment.
    pub fn k_minor(mut self, k_minor: f64) -> Self {
        self.k_minor = Some(k_minor);
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

    pub fn build(self) -> PipelineResult<Pipe> {
        if self.size.is_some() && self.inner_diameter.is_some() {
            return Err(PipelineError::InvalidConfiguration {
                what: "a pipe takes either a nominal size or an inner diameter, not both",
            });
        }

        let k_minor = self.k_minor.unwrap_or(0.0);
        if !(k_minor.is_finite() && k_minor >= 0.0) {
            return Err(PipelineError::InvalidConfiguration {
                what: "minor loss coefficient must be non-negative",
            });
        }

        let standard = self.standard.unwrap_or(PipeStandard::Sdr41);
        let (size, inner_diameter) = match (self.size, self.inner_diameter) {
            (None, Some(id)) => resolve_from_inner_diameter(id, standard)?,
            (given_size, None) => {
                resolve_from_size(given_size.unwrap_or_else(|| inch(0.5)), standard)?
            }
            (Some(_), Some(_)) => unreachable!("rejected above"),
        };

        validate_link(Kind::Pipe, size, self.next.as_ref())?;

        Ok(Pipe {
            config: self.config.unwrap_or_default(),
            size,
            inner_diameter,
            standard,
            length: self.length.unwrap_or_else(|| m(1.0)),
            roughness: self.roughness.unwrap_or_else(materials::pvc_pipe_roughness),
            k_minor,
            next: self.next.map(Box::new),
        })
    }
}

fn resolve_from_size(size: Length, standard: PipeStandard) -> PipelineResult<(Length, Length)> {
    let nominal = next_available_size(size)?;
    let nominal_in = nominal.get::<uom::si::length::inch>();
    match standard.sdr() {
        Some(sdr) => Ok((nominal, inch(nominal_in * (sdr - 2.0) / sdr))),
        None => Ok((nominal, inch(sch40_row_for_size(nominal).id_sch40_in))),
    }
}

fn resolve_from_inner_diameter(
    id: Length,
    standard: PipeStandard,
) -> PipelineResult<(Length, Length)> {
    match standard.sdr() {
        Some(sdr) => {
            let id_in = id.get::<uom::si::length::inch>();
            let nominal = next_available_size(inch(id_in * sdr / (sdr - 2.0)))?;
            let nominal_in = nominal.get::<uom::si::length::inch>();
            Ok((nominal, inch(nominal_in * (sdr - 2.0) / sdr)))
        }
        None => {
            let row = aq_catalog::nearest_sch40_by_id(id);
            Ok((inch(row.nominal_in), inch(row.id_sch40_in)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_size_and_id_rejected() {
        let result = Pipe::builder()
            .size(inch(0.5))
            .inner_diameter(inch(0.476))
            .build();
        assert!(matches!(
            result,
            Err(PipelineError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn sdr41_id_from_size() {
        let pipe = Pipe::builder().size(inch(0.5)).build().unwrap();
        // id = size * (41 - 2) / 41
        let expected = 0.5 * 39.0 / 41.0;
        let id_in = pipe.inner_diameter().get::<uom::si::length::inch>();
        assert!((id_in - expected).abs() < 1e-9);
    }

    #[test]
    fn sdr_size_from_id_round_trips() {
        let pipe = Pipe::builder()
            .inner_diameter(inch(0.5 * 39.0 / 41.0))
            .standard(PipeStandard::Sdr41)
            .build()
            .unwrap();
        assert!((pipe.size().get::<uom::si::length::inch>() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn oversized_id_rounds_up_to_the_next_nominal() {
        // An ID slightly above the 0.5 in SDR41 bore needs the next size up.
        let pipe = Pipe::builder()
            .inner_diameter(inch(0.52))
            .standard(PipeStandard::Sdr41)
            .build()
            .unwrap();
        assert!((pipe.size().get::<uom::si::length::inch>() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn sch40_id_comes_from_the_table() {
        let pipe = Pipe::builder()
            .size(inch(1.0))
            .standard(PipeStandard::Sch40)
            .build()
            .unwrap();
        let id_in = pipe.inner_diameter().get::<uom::si::length::inch>();
        assert!((id_in - 1.049).abs() < 1e-9);
    }

    #[test]
    fn size_snaps_up_to_the_catalog() {
        let pipe = Pipe::builder().size(inch(0.6)).build().unwrap();
        assert!((pipe.size().get::<uom::si::length::inch>() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn defaults_follow_the_half_inch_sdr41_convention() {
        let pipe = Pipe::builder().build().unwrap();
        assert_eq!(pipe.standard(), PipeStandard::Sdr41);
        assert!((pipe.size().get::<uom::si::length::inch>() - 0.5).abs() < 1e-9);
        assert!((pipe.length().value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn describe_mentions_spec_and_size() {
        let pipe = Pipe::builder().build().unwrap();
        let line = pipe.describe();
        assert!(line.starts_with("Pipe:"));
        assert!(line.contains("sdr41"));
        assert!(line.contains("0.500 in"));
    }

    #[test]
    fn sdr_available_ids_match_table_length() {
        let ids = Pipe::sdr_available_ids(41.0);
        let available = aq_catalog::pipes::rows()
            .iter()
            .filter(|row| row.available)
            .count();
        assert_eq!(ids.len(), available);
    }
}
