//! Assemble a small pipeline and solve it for a target head loss.
//!
//! Run with `RUST_LOG=trace` to watch the relaxation steps.

use aq_core::units::{cm, degc, inch, lps, m};
use aq_pipeline::{Component, Elbow, ElbowAngle, Pipe, PipelineError, PlantConfig};

fn main() -> Result<(), PipelineError> {
    tracing_subscriber::fmt::init();

    let config = PlantConfig::new(lps(20.0), degc(25.0));

    let tail = Pipe::builder()
        .size(inch(1.0))
        .length(m(2.0))
        .config(config.clone())
        .build()?;
    let elbow = Elbow::builder()
        .size(inch(1.0))
        .angle(ElbowAngle::Deg90)
        .config(config.clone())
        .next(tail)
        .build()?;
    let head = Pipe::builder()
        .size(inch(1.0))
        .length(m(1.0))
        .config(config)
        .next(elbow)
        .build()?;

    let chain = Component::Pipe(head);
    println!("{chain}");

    let target = cm(40.0);
    let flow = chain.solve_flow_for_head_loss(target)?;
    println!(
        "flow for {:.2} m of head loss: {:.3} L/s",
        target.value,
        flow.get::<uom::si::volume_rate::liter_per_second>()
    );

    let achieved = chain.head_loss_pipeline()?;
    println!("head loss at that flow: {:.4} m", achieved.value);

    Ok(())
}
