//! Tee fittings with one through-path and one stopper.

use std::fmt;

use aq_catalog::{nearest_fitting_by_id, nearest_fitting_by_size};
use aq_core::units::{Length, inch};

use crate::component::{Component, Kind, validate_link};
use crate::config::{Configured, PlantConfig};
use crate::error::{PipelineError, PipelineResult};

/// Outlet path type. The non-stopper path carries the flow onward and
/// determines the minor-loss coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeePath {
    Branch,
    Run,
    Stopper,
}

impl TeePath {
    pub fn k_minor(self) -> Option<f64> {
        match self {
            TeePath::Branch => Some(1.8),
            TeePath::Run => Some(0.6),
            TeePath::Stopper => None,
        }
    }
}

impl fmt::Display for TeePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TeePath::Branch => "branch",
            TeePath::Run => "run",
            TeePath::Stopper => "stopper",
        };
        write!(f, "{label}")
    }
}

/// One of the two outlets of a tee: a path type plus whatever is attached
/// downstream of that outlet.
#[derive(Debug, Clone)]
pub struct TeeOutlet {
    path: TeePath,
    component: Option<Component>,
}

impl TeeOutlet {
    pub fn branch(component: impl Into<Component>) -> Self {
        Self {
            path: TeePath::Branch,
            component: Some(component.into()),
        }
    }

    pub fn run(component: impl Into<Component>) -> Self {
        Self {
            path: TeePath::Run,
            component: Some(component.into()),
        }
    }

    /// A flow path with nothing attached downstream yet.
    pub fn open(path: TeePath) -> Self {
        Self {
            path,
            component: None,
        }
    }

    pub fn stopper() -> Self {
        Self {
            path: TeePath::Stopper,
            component: None,
        }
    }

    pub fn path(&self) -> TeePath {
        self.path
    }
}

/// A tee fitting. Exactly one outlet is a stopper; the other outlet is the
/// chain's continuation.
#[derive(Debug, Clone)]
pub struct Tee {
    config: PlantConfig,
    size: Length,
    inner_diameter: Length,
    next_path: TeePath,
    next: Option<Box<Component>>,
}

impl Tee {
    pub fn builder() -> TeeBuilder {
        TeeBuilder::default()
    }

    /// Nominal (catalog) size.
    pub fn size(&self) -> Length {
        self.size
    }

    pub fn inner_diameter(&self) -> Length {
        self.inner_diameter
    }

    /// Path type of the flow-carrying outlet.
    pub fn next_path(&self) -> TeePath {
        self.next_path
    }

    pub fn k_minor(&self) -> f64 {
        self.next_path.k_minor().unwrap_or(0.0)
    }

    pub fn next(&self) -> Option<&Component> {
        self.next.as_deref()
    }

    pub(crate) fn next_slot(&mut self) -> &mut Option<Box<Component>> {
        &mut self.next
    }

    /// Minor head loss through the flow-carrying outlet at the current flow.
    pub fn head_loss(&self) -> PipelineResult<Length> {
        Ok(aq_physchem::headloss_minor(
            self.flow(),
            self.inner_diameter,
            self.k_minor(),
        )?)
    }

    pub fn describe(&self) -> String {
        format!(
            "Tee: (Size: {:.3} in, ID: {:.3} in, Next Path: {})",
            self.size.get::<uom::si::length::inch>(),
            self.inner_diameter.get::<uom::si::length::inch>(),
            self.next_path,
        )
    }
}

impl Configured for Tee {
    fn config(&self) -> &PlantConfig {
        &self.config
    }

    fn set_config(&mut self, config: PlantConfig) {
        self.config = config;
    }
}

/// Builder for [`Tee`]. Defaults to an open branch on the left and a stopper
/// on the right.
#[derive(Debug, Default)]
pub struct TeeBuilder {
    size: Option<Length>,
    inner_diameter: Option<Length>,
    left: Option<TeeOutlet>,
    right: Option<TeeOutlet>,
    config: Option<PlantConfig>,
}

impl TeeBuilder {
    pub fn size(mut self, size: Length) -> Self {
        self.size = Some(size);
        self
    }

    pub fn inner_diameter(mut self, inner_diameter: Length) -> Self {
        self.inner_diameter = Some(inner_diameter);
        self
    }

    pub fn left(mut self, left: TeeOutlet) -> Self {
        self.left = Some(left);
        self
    }

    pub fn right(mut self, right: TeeOutlet) -> Self {
        self.right = Some(right);
        self
    }

    pub fn config(mut self, config: PlantConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> PipelineResult<Tee> {
        if self.size.is_some() && self.inner_diameter.is_some() {
            return Err(PipelineError::InvalidConfiguration {
                what: "a tee takes either a nominal size or an inner diameter, not both",
            });
        }

        let left = self.left.unwrap_or_else(|| TeeOutlet::open(TeePath::Branch));
        let right = self.right.unwrap_or_else(TeeOutlet::stopper);

        let stoppers = [left.path, right.path]
            .iter()
            .filter(|path| **path == TeePath::Stopper)
            .count();
        if stoppers != 1 {
            return Err(PipelineError::Structure {
                what: format!("a tee must have exactly one stopper outlet, found {stoppers}"),
            });
        }

        let (through, plugged) = if left.path == TeePath::Stopper {
            (right, left)
        } else {
            (left, right)
        };
        if plugged.component.is_some() {
            return Err(PipelineError::Structure {
                what: "the stopper outlet cannot carry a downstream component".into(),
            });
        }

        let row = match (self.size, self.inner_diameter) {
            (None, Some(id)) => nearest_fitting_by_id(id),
            (given_size, None) => nearest_fitting_by_size(given_size.unwrap_or_else(|| inch(0.5))),
            (Some(_), Some(_)) => unreachable!("rejected above"),
        };
        let size = inch(row.size_in);
        let inner_diameter = inch(row.id_in);

        validate_link(Kind::Tee, size, through.component.as_ref())?;

        Ok(Tee {
            config: self.config.unwrap_or_default(),
            size,
            inner_diameter,
            next_path: through.path,
            next: through.component.map(Box::new),
        })
    }
}
