//! In-flight message values.
//!
//! A message is immutable once created: it carries the sender's matrix clock
//! as it stood immediately after the send-side increment, and that snapshot
//! is what receivers merge — never the sender's live clock.

use depotsim_clock::MatrixClock;
use depotsim_types::{ActorId, MessageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An immutable message produced by a send event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: ActorId,
    receivers: BTreeSet<ActorId>,
    payload: String,
    timestamp: MatrixClock,
}

impl Message {
    /// Creates a message. `timestamp` must already be a snapshot owned by
    /// the message, taken after the sender's increment.
    #[must_use]
    pub fn new(
        id: MessageId,
        sender: ActorId,
        receivers: BTreeSet<ActorId>,
        payload: String,
        timestamp: MatrixClock,
    ) -> Self {
        Self {
            id,
            sender,
            receivers,
            payload,
            timestamp,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sending actor.
    #[must_use]
    pub const fn sender(&self) -> ActorId {
        self.sender
    }

    /// Returns the set of addressed receivers.
    #[must_use]
    pub const fn receivers(&self) -> &BTreeSet<ActorId> {
        &self.receivers
    }

    /// Returns true if `actor` is an addressed receiver.
    #[must_use]
    pub fn is_addressed_to(&self, actor: ActorId) -> bool {
        self.receivers.contains(&actor)
    }

    /// Returns the payload text.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns the attached clock snapshot.
    #[must_use]
    pub const fn timestamp(&self) -> &MatrixClock {
        &self.timestamp
    }
}
