//! Simulation actors (warehouses).
//!
//! Each actor exclusively owns one matrix clock and an append-only log of
//! human-readable entries. The only mutations are `send` and `deliver`;
//! everything else is read-only access for the presentation boundary.

use crate::error::{EngineError, EngineResult};
use crate::message::Message;
use depotsim_clock::MatrixClock;
use depotsim_types::{ActorId, MessageId};
use std::collections::BTreeSet;

/// One actor in the simulation: identity, clock, and causal log.
#[derive(Debug, Clone)]
pub struct Actor {
    id: ActorId,
    label: String,
    clock: MatrixClock,
    log: Vec<String>,
}

impl Actor {
    /// Creates an actor with a zero clock sized for `actor_count` actors
    /// and an empty log.
    #[must_use]
    pub fn new(id: ActorId, label: impl Into<String>, actor_count: usize) -> Self {
        Self {
            id,
            label: label.into(),
            clock: MatrixClock::new(actor_count),
            log: Vec::new(),
        }
    }

    /// Returns the actor's identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the actor's label (e.g. `"W1"`).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the actor's current clock.
    #[must_use]
    pub const fn clock(&self) -> &MatrixClock {
        &self.clock
    }

    /// Returns the actor's log entries, oldest first.
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Processes a send event.
    ///
    /// Increments the actor's principal cell, then snapshots the clock, in
    /// that order — the attached timestamp must reflect the send itself.
    /// Logs `Sent: <payload> (ts: <matrix>)` and returns the message.
    pub fn send(
        &mut self,
        id: MessageId,
        receivers: BTreeSet<ActorId>,
        payload: &str,
    ) -> EngineResult<Message> {
        self.clock.increment_own(self.id)?;
        let timestamp = self.clock.snapshot();
        self.log.push(format!("Sent: {payload} (ts: {timestamp})"));
        Ok(Message::new(
            id,
            self.id,
            receivers,
            payload.to_string(),
            timestamp,
        ))
    }

    /// Processes a delivery.
    ///
    /// Merges the message's timestamp into the actor's clock and logs
    /// `Received from <sender>: <payload> (ts: <matrix>)`. The logged
    /// timestamp is the one received, not the post-merge clock, so the log
    /// shows what actually arrived.
    pub fn deliver(&mut self, message: &Message, sender_label: &str) -> EngineResult<()> {
        if !message.is_addressed_to(self.id) {
            return Err(EngineError::NotAReceiver {
                actor: self.id,
                message: message.id(),
            });
        }
        self.clock.merge(message.timestamp())?;
        self.log.push(format!(
            "Received from {sender_label}: {} (ts: {})",
            message.payload(),
            message.timestamp()
        ));
        Ok(())
    }
}
