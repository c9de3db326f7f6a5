//! Flow-rate solver: invert the aggregate head loss of a chain.

use aq_core::units::{Length, VolumeRate, m3ps};
use tracing::{debug, trace};

use crate::component::Component;
use crate::config::Configured;
use crate::error::{PipelineError, PipelineResult};
use crate::pipe::Pipe;

/// Hard bound on the relaxation; the scheme has no proven convergence
/// guarantee for arbitrary coefficient combinations.
const MAX_ITERATIONS: usize = 100;

/// Stopping tolerance on the relative head-loss error.
const TOLERANCE: f64 = 0.01;

impl Component {
    /// First pipe segment usable to seed the solve: this node if it is a
    /// pipe, otherwise its immediate successor.
    fn seed_pipe(&self) -> PipelineResult<&Pipe> {
        if let Component::Pipe(pipe) = self {
            return Ok(pipe);
        }
        if let Some(Component::Pipe(pipe)) = self.next() {
            return Ok(pipe);
        }
        Err(PipelineError::InvalidConfiguration {
            what: "no pipe segment available to seed the solve",
        })
    }

    /// Flow rate at which the whole chain produces `target` aggregate head
    /// loss.
    ///
    /// Seeds from the closed-form pipe-flow inversion on the seed pipe, then
    /// relaxes: evaluate the chain at the current guess, form the relative
    /// error `(target - current) / (target + current)`, scale the guess by
    /// `1 + error`, and push the new flow down the chain. Stops once the
    /// error magnitude is within 1 %.
    ///
    /// The converged flow is left written into every node's shared record.
    pub fn solve_flow_for_head_loss(&self, target: Length) -> PipelineResult<VolumeRate> {
        if !(target.value.is_finite() && target.value > 0.0) {
            return Err(PipelineError::InvalidConfiguration {
                what: "target head loss must be positive",
            });
        }

        let seed = self.seed_pipe()?;
        let nu = aq_physchem::viscosity_kinematic(seed.temperature())?;
        let mut flow = aq_physchem::flow_pipe(
            seed.inner_diameter(),
            target,
            seed.length(),
            nu,
            seed.roughness(),
            seed.k_minor(),
        )?;

        for iteration in 0..MAX_ITERATIONS {
            self.config().set_flow(flow);
            self.propagate_flow();
            let current = self.head_loss_pipeline()?;

            let err = (target.value - current.value) / (target.value + current.value);
            trace!(
                iteration,
                flow_m3ps = flow.value,
                head_loss_m = current.value,
                err,
                "relaxation step"
            );

            if err.abs() <= TOLERANCE {
                debug!(
                    iterations = iteration + 1,
                    flow_m3ps = flow.value,
                    "flow solve converged"
                );
                return Ok(flow);
            }

            flow = m3ps(flow.value + err * flow.value);
        }

        Err(PipelineError::Convergence {
            iterations: MAX_ITERATIONS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elbow::Elbow;
    use crate::tee::Tee;
    use aq_core::units::{cm, inch, m};

    fn pipe_chain() -> Component {
        let tail = Pipe::builder()
            .size(inch(1.0))
            .length(m(2.0))
            .build()
            .unwrap();
        let elbow = Elbow::builder().size(inch(1.0)).next(tail).build().unwrap();
        let head = Pipe::builder()
            .size(inch(1.0))
            .length(m(1.0))
            .next(elbow)
            .build()
            .unwrap();
        Component::Pipe(head)
    }

    #[test]
    fn solve_hits_the_target_within_tolerance() {
        let chain = pipe_chain();
        let target = cm(40.0);
        let flow = chain.solve_flow_for_head_loss(target).unwrap();
        assert!(flow.value > 0.0);

        let achieved = chain.head_loss_pipeline().unwrap();
        let rel = (target.value - achieved.value).abs() / target.value;
        assert!(rel < 0.03, "relative error {rel}");
    }

    #[test]
    fn solve_leaves_the_flow_propagated() {
        let chain = pipe_chain();
        let flow = chain.solve_flow_for_head_loss(cm(40.0)).unwrap();

        let mut node = Some(&chain);
        while let Some(current) = node {
            assert!((current.flow().value - flow.value).abs() < 1e-15);
            node = current.next();
        }
    }

    #[test]
    fn fitting_head_can_seed_from_its_successor() {
        let tail = Pipe::builder()
            .size(inch(1.0))
            .length(m(2.0))
            .build()
            .unwrap();
        let elbow = Elbow::builder().size(inch(1.0)).next(tail).build().unwrap();
        let chain = Component::Elbow(elbow);

        let flow = chain.solve_flow_for_head_loss(cm(20.0)).unwrap();
        assert!(flow.value > 0.0);
    }

    #[test]
    fn chain_without_a_seed_pipe_is_rejected() {
        let tee = Tee::builder().build().unwrap();
        let result = Component::Tee(tee).solve_flow_for_head_loss(cm(20.0));
        assert!(matches!(
            result,
            Err(PipelineError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn non_positive_target_is_rejected() {
        let chain = pipe_chain();
        let result = chain.solve_flow_for_head_loss(m(0.0));
        assert!(matches!(
            result,
            Err(PipelineError::InvalidConfiguration { .. })
        ));
    }
}
