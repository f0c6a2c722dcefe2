//! Scripted event sequences.
//!
//! A script is the immutable, ordered list of send/deliver events a
//! simulation replays. Every send carries a generated [`MessageId`] and each
//! deliver references that id directly, so delivery resolution is an exact
//! lookup instead of a content match — a script may reuse the same payload
//! for different sends without ambiguity.

use depotsim_types::{ActorId, MessageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// An actor sends a message to one or more receivers.
    Send {
        /// Identifier minted for this send; deliver events reference it.
        message: MessageId,
        sender: ActorId,
        receivers: BTreeSet<ActorId>,
        payload: String,
    },

    /// An actor receives a previously sent message.
    Deliver {
        /// The send this delivery corresponds to.
        message: MessageId,
        receiver: ActorId,
    },
}

/// An immutable ordered script of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    events: Vec<ScriptEvent>,
}

impl Script {
    /// Returns the events in order.
    #[must_use]
    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the script has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Builder that mints message ids at `send` and hands them back for the
/// matching `deliver` entries.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    events: Vec<ScriptEvent>,
}

impl ScriptBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a send event and returns its generated message id.
    pub fn send(
        &mut self,
        sender: ActorId,
        receivers: impl IntoIterator<Item = ActorId>,
        payload: impl Into<String>,
    ) -> MessageId {
        let message = MessageId::new();
        self.events.push(ScriptEvent::Send {
            message,
            sender,
            receivers: receivers.into_iter().collect(),
            payload: payload.into(),
        });
        message
    }

    /// Appends a deliver event for a previously scripted send.
    pub fn deliver(&mut self, message: MessageId, receiver: ActorId) -> &mut Self {
        self.events.push(ScriptEvent::Deliver { message, receiver });
        self
    }

    /// Finishes the script.
    #[must_use]
    pub fn build(self) -> Script {
        Script {
            events: self.events,
        }
    }
}
