//! Step-through demo of the three-warehouse scenario.
//!
//! Prints each actor's matrix and log after every event, then the final
//! state as JSON. Run with `RUST_LOG=debug` to see the engine's dispatch
//! trace.

use depotsim_engine::{scenario, StepOutcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut sim = scenario::supply_chain_demo()?;

    let mut step = 0;
    while sim.step()? == StepOutcome::Advanced {
        step += 1;
        println!("── after event {step} ──");
        for actor in sim.view().actors {
            println!("{}:", actor.label);
            for row in &actor.matrix {
                println!("  {row:?}");
            }
            for entry in &actor.log {
                println!("  {}", entry.lines().next().unwrap_or(entry.as_str()));
            }
        }
        println!();
    }

    println!("final state:");
    println!("{}", serde_json::to_string_pretty(&sim.view())?);
    Ok(())
}
