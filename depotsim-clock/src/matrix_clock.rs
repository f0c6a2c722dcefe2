//! Matrix clock for causality tracking across a fixed set of actors.
//!
//! Each actor owns one matrix; row `i` of actor `i`'s matrix is its own
//! vector clock, while row `j` records what actor `i` knows of actor `j`'s
//! vector clock. Sending increments the owner's principal cell; delivering
//! merges the attached snapshot element-wise.

use depotsim_types::ActorId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for clock operations.
pub type ClockResult<T> = Result<T, ClockError>;

/// Errors that can occur in clock operations.
///
/// Both variants indicate a malformed script or a misconfigured actor set
/// rather than a recoverable runtime condition: the actor count is fixed for
/// the lifetime of a simulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    /// Actor index outside the clock's dimension.
    #[error("actor index {index} out of range for {size} actors")]
    ActorOutOfRange { index: usize, size: usize },

    /// Attempted to merge clocks of different dimensions.
    #[error("clock size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Causality relationship between two matrix clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CausalOrder {
    /// First clock happened before second.
    Before,
    /// First clock happened after second.
    After,
    /// Clocks are concurrent (neither happened before the other).
    Concurrent,
    /// Clocks are identical.
    Equal,
}

/// An N×N matrix clock.
///
/// Cells are stored row-major; `cells[i][j]` is actor `i`'s knowledge of
/// actor `j`'s event count. All cells start at zero and never decrease:
/// the only mutations are the principal-cell increment on send and the
/// element-wise-max merge on deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixClock {
    size: usize,
    cells: Vec<u64>,
}

impl MatrixClock {
    /// Creates an all-zero clock for `size` actors.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Creates a clock from row-major cells.
    ///
    /// Fails if `cells` is not exactly `size * size` long.
    pub fn from_cells(size: usize, cells: Vec<u64>) -> ClockResult<Self> {
        if cells.len() != size * size {
            return Err(ClockError::SizeMismatch {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Returns the number of actors this clock tracks.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `(row, col)`, or 0 if out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col]
        } else {
            0
        }
    }

    /// Returns row `row` as a slice, if in range.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[u64]> {
        if row < self.size {
            Some(&self.cells[row * self.size..(row + 1) * self.size])
        } else {
            None
        }
    }

    /// Returns the full grid as nested rows.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<u64>> {
        (0..self.size)
            .map(|i| self.cells[i * self.size..(i + 1) * self.size].to_vec())
            .collect()
    }

    /// Returns true if every cell is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Increments the owner's principal cell `[actor][actor]` by one and
    /// returns the new count.
    ///
    /// This is called exactly once per send event; no other cell changes.
    pub fn increment_own(&mut self, actor: ActorId) -> ClockResult<u64> {
        let i = actor.index();
        if i >= self.size {
            return Err(ClockError::ActorOutOfRange {
                index: i,
                size: self.size,
            });
        }
        let cell = &mut self.cells[i * self.size + i];
        *cell += 1;
        Ok(*cell)
    }

    /// Merges another clock into this one.
    ///
    /// For each cell, takes the maximum of the two values. This operation is
    /// commutative, associative, and idempotent.
    pub fn merge(&mut self, other: &Self) -> ClockResult<()> {
        if other.size != self.size {
            return Err(ClockError::SizeMismatch {
                expected: self.size,
                actual: other.size,
            });
        }
        for (cell, &theirs) in self.cells.iter_mut().zip(&other.cells) {
            if theirs > *cell {
                *cell = theirs;
            }
        }
        Ok(())
    }

    /// Creates a new clock that is the merge of this and another.
    pub fn merged(&self, other: &Self) -> ClockResult<Self> {
        let mut result = self.clone();
        result.merge(other)?;
        Ok(result)
    }

    /// Returns an independent deep copy, suitable for attaching to a message.
    ///
    /// A message timestamp must never alias the sender's live clock: later
    /// sends by the same actor would retroactively corrupt already-sent
    /// messages.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Compares this clock with another to determine causal ordering.
    ///
    /// Cells beyond either clock's dimension are treated as zero, so clocks
    /// of different sizes are still comparable.
    #[must_use]
    pub fn compare(&self, other: &Self) -> CausalOrder {
        let mut dominated_by_self = true; // self >= other for all cells
        let mut dominated_by_other = true; // other >= self for all cells

        let n = self.size.max(other.size);
        for row in 0..n {
            for col in 0..n {
                let ours = self.get(row, col);
                let theirs = other.get(row, col);
                if ours < theirs {
                    dominated_by_self = false;
                }
                if theirs < ours {
                    dominated_by_other = false;
                }
            }
        }

        match (dominated_by_self, dominated_by_other) {
            (true, true) => CausalOrder::Equal,
            (true, false) => CausalOrder::After,
            (false, true) => CausalOrder::Before,
            (false, false) => CausalOrder::Concurrent,
        }
    }

    /// Returns true if this clock is causally before the other.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.compare(other) == CausalOrder::Before
    }

    /// Returns true if this clock is causally after the other.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.compare(other) == CausalOrder::After
    }

    /// Returns true if this clock is concurrent with the other.
    #[must_use]
    pub fn is_concurrent(&self, other: &Self) -> bool {
        self.compare(other) == CausalOrder::Concurrent
    }

    /// Returns true if this clock dominates the other (is >= for all cells).
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        matches!(self.compare(other), CausalOrder::After | CausalOrder::Equal)
    }
}

impl fmt::Display for MatrixClock {
    /// Renders the grid one bracketed row per line, e.g. `[1, 0, 0]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for col in 0..self.size {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.get(row, col))?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
