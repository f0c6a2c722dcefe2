//! Error types for the simulation engine.

use depotsim_clock::ClockError;
use depotsim_types::{ActorId, MessageId};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in engine operations.
///
/// All variants indicate a malformed script or a misconfigured actor set;
/// none of them are transient. An unresolvable delivery is deliberately not
/// an error — see `Simulation::step`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Clock operation failed.
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    /// A script event references an actor outside the registry.
    #[error("unknown actor index {index} (registry has {count} actors)")]
    UnknownActor { index: usize, count: usize },

    /// A message was delivered to an actor it was not addressed to.
    #[error("actor {actor} is not a receiver of message {message}")]
    NotAReceiver { actor: ActorId, message: MessageId },

    /// Two actors were registered under the same label.
    #[error("duplicate actor label: {0}")]
    DuplicateLabel(String),

    /// The registry was constructed with no actors.
    #[error("actor registry is empty")]
    NoActors,
}
