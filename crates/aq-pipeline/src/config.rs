//! Plant-wide design inputs shared across a component tree.
//!
//! Design trees are built bottom-up: subcomponents are constructed (each with
//! a fresh default record) before their parent exists, so the parent cannot
//! hand its configuration down at construction time. Instead every component
//! holds a [`PlantConfig`] handle to a shared record, and a parent broadcasts
//! its own record to already-built children with
//! [`Configured::propagate_config`] after assembly.

use std::cell::RefCell;
use std::rc::Rc;

use aq_core::units::{Temperature, VolumeRate, degc, lps};

/// The design inputs shared between all components of one treatment plant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlantContext {
    /// Plant flow rate
    pub flow: VolumeRate,
    /// Design water temperature
    pub temp: Temperature,
}

impl Default for PlantContext {
    fn default() -> Self {
        Self {
            flow: lps(20.0),
            temp: degc(20.0),
        }
    }
}

/// Shared-ownership handle to one [`PlantContext`] record.
///
/// Cloning the handle shares the identical record, not a copy: a change made
/// through any clone is visible to every holder. A handle is scoped to the
/// design session that created it; nothing is process-global.
#[derive(Debug, Clone)]
pub struct PlantConfig {
    record: Rc<RefCell<PlantContext>>,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self::from_context(PlantContext::default())
    }
}

impl PlantConfig {
    pub fn new(flow: VolumeRate, temp: Temperature) -> Self {
        Self::from_context(PlantContext { flow, temp })
    }

    pub fn from_context(context: PlantContext) -> Self {
        Self {
            record: Rc::new(RefCell::new(context)),
        }
    }

    pub fn flow(&self) -> VolumeRate {
        self.record.borrow().flow
    }

    pub fn temperature(&self) -> Temperature {
        self.record.borrow().temp
    }

    pub fn set_flow(&self, flow: VolumeRate) {
        self.record.borrow_mut().flow = flow;
    }

    pub fn set_temperature(&self, temp: Temperature) {
        self.record.borrow_mut().temp = temp;
    }

    /// True when both handles point at the identical record.
    pub fn shares_record_with(&self, other: &PlantConfig) -> bool {
        Rc::ptr_eq(&self.record, &other.record)
    }
}

/// Access to the shared plant configuration of a design component.
pub trait Configured {
    fn config(&self) -> &PlantConfig;
    fn set_config(&mut self, config: PlantConfig);

    fn flow(&self) -> VolumeRate {
        self.config().flow()
    }

    fn temperature(&self) -> Temperature {
        self.config().temperature()
    }

    /// Overwrite each subcomponent's handle with this component's own,
    /// so all of them observe the identical record from here on.
    fn propagate_config(&self, subcomponents: &mut [&mut dyn Configured]) {
        for sub in subcomponents.iter_mut() {
            sub.set_config(self.config().clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unit {
        config: PlantConfig,
    }

    impl Configured for Unit {
        fn config(&self) -> &PlantConfig {
            &self.config
        }
        fn set_config(&mut self, config: PlantConfig) {
            self.config = config;
        }
    }

    #[test]
    fn defaults_are_20_lps_and_20_c() {
        let config = PlantConfig::default();
        assert!((config.flow().value - 0.02).abs() < 1e-12);
        assert!((config.temperature().value - 293.15).abs() < 1e-9);
    }

    #[test]
    fn fresh_records_are_distinct() {
        let a = PlantConfig::default();
        let b = PlantConfig::default();
        assert!(!a.shares_record_with(&b));
    }

    #[test]
    fn propagation_shares_the_record() {
        let parent = Unit {
            config: PlantConfig::new(lps(35.0), degc(15.0)),
        };
        let mut child = Unit {
            config: PlantConfig::default(),
        };

        parent.propagate_config(&mut [&mut child]);

        assert!(parent.config().shares_record_with(child.config()));
        assert!((child.flow().value - 0.035).abs() < 1e-12);

        // Later changes to the parent's record stay visible to the child.
        parent.config().set_flow(lps(50.0));
        assert!((child.flow().value - 0.05).abs() < 1e-12);
    }

    #[test]
    fn repropagation_overwrites_the_association() {
        let first = Unit {
            config: PlantConfig::new(lps(10.0), degc(10.0)),
        };
        let second = Unit {
            config: PlantConfig::new(lps(30.0), degc(30.0)),
        };
        let mut child = Unit {
            config: PlantConfig::default(),
        };

        first.propagate_config(&mut [&mut child]);
        second.propagate_config(&mut [&mut child]);

        assert!(!first.config().shares_record_with(child.config()));
        assert!(second.config().shares_record_with(child.config()));
    }
}
