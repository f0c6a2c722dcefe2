//! The simulation: registry-validated actors plus scripted event replay.
//!
//! All mutable state (actors, cursor, in-flight messages) lives in one owned
//! [`Simulation`] value; there is no ambient state, so independent
//! simulations can run side by side. The replay is strictly single-threaded
//! and step-driven: each `step` processes exactly one event to completion.

use crate::actor::Actor;
use crate::error::{EngineError, EngineResult};
use crate::message::Message;
use crate::script::{Script, ScriptEvent};
use depotsim_types::{ActorId, MessageId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One event was processed and the cursor advanced.
    Advanced,
    /// The script is exhausted; nothing changed.
    Finished,
}

/// Read-only view of one actor's state for the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorView {
    /// Dense actor index.
    pub id: usize,
    /// Actor label (e.g. `"W1"`).
    pub label: String,
    /// The full matrix as nested rows.
    pub matrix: Vec<Vec<u64>>,
    /// Log entries, oldest first.
    pub log: Vec<String>,
}

/// Read-only view of the whole simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationView {
    /// Per-actor state, in registry order.
    pub actors: Vec<ActorView>,
    /// Index of the next event to process.
    pub cursor: usize,
    /// True once the script is exhausted.
    pub finished: bool,
    /// Deliveries skipped because no matching send was in flight.
    pub skipped_deliveries: u64,
}

/// A deterministic matrix-clock simulation over a fixed actor set.
#[derive(Debug)]
pub struct Simulation {
    actors: Vec<Actor>,
    script: Script,
    cursor: usize,
    in_flight: HashMap<MessageId, Message>,
    skipped_deliveries: u64,
}

impl Simulation {
    /// Creates a simulation from actor labels and a script.
    ///
    /// Labels must be non-empty and unique; every actor index the script
    /// references must fall inside the registry. Both are validated here,
    /// up front — a malformed script is a configuration error, not
    /// something to paper over at replay time.
    pub fn new<I, S>(labels: I, script: Script) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(EngineError::NoActors);
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(EngineError::DuplicateLabel(label.clone()));
            }
        }

        let count = labels.len();
        for event in script.events() {
            match event {
                ScriptEvent::Send {
                    sender, receivers, ..
                } => {
                    Self::check_actor(*sender, count)?;
                    for receiver in receivers {
                        Self::check_actor(*receiver, count)?;
                    }
                }
                ScriptEvent::Deliver { receiver, .. } => {
                    Self::check_actor(*receiver, count)?;
                }
            }
        }

        let actors = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Actor::new(ActorId::new(i), label.clone(), count))
            .collect();

        Ok(Self {
            actors,
            script,
            cursor: 0,
            in_flight: HashMap::new(),
            skipped_deliveries: 0,
        })
    }

    fn check_actor(id: ActorId, count: usize) -> EngineResult<()> {
        if id.index() < count {
            Ok(())
        } else {
            Err(EngineError::UnknownActor {
                index: id.index(),
                count,
            })
        }
    }

    fn actor_mut(&mut self, id: ActorId) -> EngineResult<&mut Actor> {
        let count = self.actors.len();
        self.actors
            .get_mut(id.index())
            .ok_or(EngineError::UnknownActor {
                index: id.index(),
                count,
            })
    }

    /// Returns the number of actors.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Returns the actors in registry order.
    #[must_use]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Returns the index of the next event to process.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true once every scripted event has been processed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor == self.script.len()
    }

    /// Processes exactly one scripted event.
    ///
    /// At the terminal state this is a no-op returning
    /// [`StepOutcome::Finished`]. A deliver whose message id has no sent
    /// message in flight (a send that never ran, or one scheduled later in
    /// the script) is skipped with a warning and the cursor still advances:
    /// in a real distributed system a message can legitimately be
    /// undeliverable, so this is a data condition, not a crash.
    pub fn step(&mut self) -> EngineResult<StepOutcome> {
        let Some(event) = self.script.events().get(self.cursor).cloned() else {
            debug!(cursor = self.cursor, "script exhausted, step is a no-op");
            return Ok(StepOutcome::Finished);
        };
        match event {
            ScriptEvent::Send {
                message,
                sender,
                receivers,
                payload,
            } => {
                let actor = self.actor_mut(sender)?;
                debug!(%message, sender = %actor.label(), payload = %payload, "processing send");
                let sent = actor.send(message, receivers, &payload)?;
                self.in_flight.insert(message, sent);
            }
            ScriptEvent::Deliver { message, receiver } => {
                match self.in_flight.get(&message).cloned() {
                    Some(sent) => {
                        let sender_label = self
                            .actors
                            .get(sent.sender().index())
                            .map(|a| a.label().to_string())
                            .unwrap_or_else(|| sent.sender().to_string());
                        let actor = self.actor_mut(receiver)?;
                        debug!(
                            %message,
                            receiver = %actor.label(),
                            "processing delivery"
                        );
                        actor.deliver(&sent, &sender_label)?;
                    }
                    None => {
                        warn!(
                            %message,
                            receiver = receiver.index(),
                            "no sent message in flight for delivery, skipping"
                        );
                        self.skipped_deliveries += 1;
                    }
                }
            }
        }

        self.cursor += 1;
        Ok(StepOutcome::Advanced)
    }

    /// Steps until the script is exhausted.
    pub fn run_to_end(&mut self) -> EngineResult<()> {
        while self.step()? == StepOutcome::Advanced {}
        Ok(())
    }

    /// Resets the simulation to its pristine state.
    ///
    /// Every actor gets a fresh zero clock and an empty log, the cursor
    /// returns to 0, and all in-flight messages are discarded — they carry
    /// timestamps from the previous run and must be recomputed by replaying
    /// the sends.
    pub fn reset(&mut self) {
        let count = self.actors.len();
        for actor in &mut self.actors {
            *actor = Actor::new(actor.id(), actor.label().to_string(), count);
        }
        self.cursor = 0;
        self.in_flight.clear();
        self.skipped_deliveries = 0;
        debug!("simulation reset");
    }

    /// Returns a read-only view of the current state.
    #[must_use]
    pub fn view(&self) -> SimulationView {
        SimulationView {
            actors: self
                .actors
                .iter()
                .map(|actor| ActorView {
                    id: actor.id().index(),
                    label: actor.label().to_string(),
                    matrix: actor.clock().rows(),
                    log: actor.log().to_vec(),
                })
                .collect(),
            cursor: self.cursor,
            finished: self.is_finished(),
            skipped_deliveries: self.skipped_deliveries,
        }
    }
}
