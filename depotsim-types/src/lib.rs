//! Core type definitions for DepotSim.
//!
//! This crate defines the fundamental identifier types used throughout the
//! simulation engine:
//! - Actor identifiers (dense indices into a fixed actor set)
//! - Message identifiers (UUID v7, time-ordered)
//!
//! Everything domain-specific (clocks, actors, scripts) lives in the
//! `depotsim-clock` and `depotsim-engine` crates, not here.

mod ids;

pub use ids::{ActorId, MessageId};
