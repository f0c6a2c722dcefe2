//! Matrix clock implementation for DepotSim.
//!
//! This crate provides [`MatrixClock`], the causality-tracking structure at
//! the heart of the simulation: an N×N table where entry `[i][j]` is actor
//! `i`'s best knowledge of actor `j`'s local event count. It generalizes a
//! vector clock to capture each actor's knowledge of every other actor's
//! knowledge, enabling causal-order and message-staleness reasoning.
//!
//! The merge operation satisfies the usual join-semilattice properties:
//! - **Commutative**: merge(a, b) == merge(b, a)
//! - **Associative**: merge(merge(a, b), c) == merge(a, merge(b, c))
//! - **Idempotent**: merge(a, a) == a
//!
//! These properties ensure that actors converge on the same causal knowledge
//! regardless of the order in which messages are delivered.

mod matrix_clock;

pub use matrix_clock::{CausalOrder, ClockError, ClockResult, MatrixClock};
