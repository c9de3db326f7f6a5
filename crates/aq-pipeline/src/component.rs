//! The pipeline chain protocol: variant tags, adjacency rules, and the
//! recursive operations over a chain of components.

use std::fmt;

use aq_core::numeric::{Tolerances, nearly_equal};
use aq_core::units::Length;

use crate::config::{Configured, PlantConfig};
use crate::elbow::Elbow;
use crate::error::{PipelineError, PipelineResult};
use crate::pipe::Pipe;
use crate::tee::Tee;

/// Component variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Pipe,
    Elbow,
    Tee,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Pipe => "pipe",
            Kind::Elbow => "elbow",
            Kind::Tee => "tee",
        };
        write!(f, "{name}")
    }
}

/// Legal (current, successor) adjacencies: pipes connect through fittings,
/// fittings discharge into pipes, and a tee never feeds another fitting.
const ALLOWED_LINKS: [(Kind, Kind); 4] = [
    (Kind::Pipe, Kind::Elbow),
    (Kind::Pipe, Kind::Tee),
    (Kind::Elbow, Kind::Pipe),
    (Kind::Tee, Kind::Pipe),
];

pub(crate) fn link_allowed(from: Kind, to: Kind) -> bool {
    ALLOWED_LINKS.contains(&(from, to))
}

/// Check one adjacency: the successor's variant must be legal after `kind`,
/// and nominal sizes must match across the junction.
pub(crate) fn validate_link(
    kind: Kind,
    size: Length,
    next: Option<&Component>,
) -> PipelineResult<()> {
    let Some(next) = next else {
        return Ok(());
    };

    if !link_allowed(kind, next.kind()) {
        return Err(PipelineError::Structure {
            what: format!("a {kind} may not be followed by a {}", next.kind()),
        });
    }

    if !nearly_equal(size.value, next.size().value, Tolerances::default()) {
        return Err(PipelineError::Structure {
            what: format!(
                "size changes across the junction after a {kind}: {:.3} in -> {:.3} in",
                size.get::<uom::si::length::inch>(),
                next.size().get::<uom::si::length::inch>(),
            ),
        });
    }

    Ok(())
}

/// A node in a pipeline chain.
///
/// The chain is a simple forward list: each node exclusively owns its
/// successor slot. Aggregate operations recurse through `next` and terminate
/// at the node whose successor is `None`.
#[derive(Debug, Clone)]
pub enum Component {
    Pipe(Pipe),
    Elbow(Elbow),
    Tee(Tee),
}

impl Component {
    pub fn kind(&self) -> Kind {
        match self {
            Component::Pipe(_) => Kind::Pipe,
            Component::Elbow(_) => Kind::Elbow,
            Component::Tee(_) => Kind::Tee,
        }
    }

    /// Nominal (catalog) size.
    pub fn size(&self) -> Length {
        match self {
            Component::Pipe(pipe) => pipe.size(),
            Component::Elbow(elbow) => elbow.size(),
            Component::Tee(tee) => tee.size(),
        }
    }

    pub fn inner_diameter(&self) -> Length {
        match self {
            Component::Pipe(pipe) => pipe.inner_diameter(),
            Component::Elbow(elbow) => elbow.inner_diameter(),
            Component::Tee(tee) => tee.inner_diameter(),
        }
    }

    pub fn k_minor(&self) -> f64 {
        match self {
            Component::Pipe(pipe) => pipe.k_minor(),
            Component::Elbow(elbow) => elbow.k_minor(),
            Component::Tee(tee) => tee.k_minor(),
        }
    }

    pub fn next(&self) -> Option<&Component> {
        match self {
            Component::Pipe(pipe) => pipe.next(),
            Component::Elbow(elbow) => elbow.next(),
            Component::Tee(tee) => tee.next(),
        }
    }

    /// Head loss of this node alone, at its current flow and temperature.
    pub fn head_loss(&self) -> PipelineResult<Length> {
        match self {
            Component::Pipe(pipe) => pipe.head_loss(),
            Component::Elbow(elbow) => elbow.head_loss(),
            Component::Tee(tee) => tee.head_loss(),
        }
    }

    /// Sum of `head_loss` over this node and its entire downstream chain.
    pub fn head_loss_pipeline(&self) -> PipelineResult<Length> {
        let own = self.head_loss()?;
        match self.next() {
            None => Ok(own),
            Some(next) => Ok(own + next.head_loss_pipeline()?),
        }
    }

    /// Write this node's flow rate into every downstream record.
    pub fn propagate_flow(&self) {
        if let Some(next) = self.next() {
            next.config().set_flow(self.flow());
            next.propagate_flow();
        }
    }

    /// One-line self-description.
    pub fn describe(&self) -> String {
        match self {
            Component::Pipe(pipe) => pipe.describe(),
            Component::Elbow(elbow) => elbow.describe(),
            Component::Tee(tee) => tee.describe(),
        }
    }

    /// Descriptions of the whole chain, one line per node.
    pub fn describe_chain(&self) -> String {
        match self.next() {
            None => self.describe(),
            Some(next) => format!("{}\n{}", self.describe(), next.describe_chain()),
        }
    }

    /// Attach `next` downstream of this node, re-checking the chain rules.
    pub fn attach(&mut self, next: Component) -> PipelineResult<()> {
        validate_link(self.kind(), self.size(), Some(&next))?;
        *self.next_slot() = Some(Box::new(next));
        Ok(())
    }

    fn next_slot(&mut self) -> &mut Option<Box<Component>> {
        match self {
            Component::Pipe(pipe) => pipe.next_slot(),
            Component::Elbow(elbow) => elbow.next_slot(),
            Component::Tee(tee) => tee.next_slot(),
        }
    }
}

impl Configured for Component {
    fn config(&self) -> &PlantConfig {
        match self {
            Component::Pipe(pipe) => pipe.config(),
            Component::Elbow(elbow) => elbow.config(),
            Component::Tee(tee) => tee.config(),
        }
    }

    fn set_config(&mut self, config: PlantConfig) {
        match self {
            Component::Pipe(pipe) => pipe.set_config(config),
            Component::Elbow(elbow) => elbow.set_config(config),
            Component::Tee(tee) => tee.set_config(config),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe_chain())
    }
}

impl From<Pipe> for Component {
    fn from(pipe: Pipe) -> Self {
        Component::Pipe(pipe)
    }
}

impl From<Elbow> for Component {
    fn from(elbow: Elbow) -> Self {
        Component::Elbow(elbow)
    }
}

impl From<Tee> for Component {
    fn from(tee: Tee) -> Self {
        Component::Tee(tee)
    }
}
