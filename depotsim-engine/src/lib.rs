//! Scripted matrix-clock simulation engine for DepotSim.
//!
//! The engine replays an immutable script of send/deliver events over a
//! fixed set of actors, each owning a matrix clock and an append-only causal
//! log. Message delivery is simulated as a synchronous scripted lookup; the
//! clock algebra (`depotsim-clock`) is what would keep the system correct if
//! the script were replaced by real asynchronous delivery, since merges
//! commute and are idempotent under arbitrary reordering and duplication.
//!
//! The external boundary is [`Simulation`]: `step`, `reset`, `is_finished`,
//! and the serializable [`SimulationView`] a presentation adapter renders.

mod actor;
mod error;
mod message;
pub mod scenario;
mod script;
mod simulation;

pub use actor::Actor;
pub use error::{EngineError, EngineResult};
pub use message::Message;
pub use script::{Script, ScriptBuilder, ScriptEvent};
pub use simulation::{ActorView, Simulation, SimulationView, StepOutcome};
