//! Cubetally: frequency tracking for colored cube rolls
//!
//! Cubetally records which color each cube showed in each of three slots,
//! keeps the counts in a human-readable JSON file, and turns them into
//! color probabilities and bet suggestions. It is built as a pure core with
//! a thin persistence shell; interactive front ends call into it with
//! already-validated input.
//!
//! # Core Concepts
//!
//! - **Table**: dense per-cube, per-position, per-color counts
//! - **History**: the log of recorded observations, used as an undo stack
//! - **Store**: atomic, backed-up persistence of table and history
//! - **Engine**: top-k color probabilities and the bet staircase
//!
//! # Example
//!
//! ```rust
//! use cubetally::core::{record, Color, FrequencyTable, HistoryLog, Observation, Position};
//! use cubetally::engine::{next_bet, top_colors, Assignment};
//!
//! let mut table = FrequencyTable::with_cubes(["WB", "YR"]);
//! let mut history = HistoryLog::new();
//!
//! let observation = Observation::new(["WB", "YR", "WB"], [Color::Red, Color::Yellow, Color::Red]);
//! record(&mut table, &mut history, observation).unwrap();
//!
//! let assignment = Assignment::new().with(Position::Left, "WB");
//! assert_eq!(top_colors(&table, &assignment, 1), vec![(Color::Red, 1.0)]);
//! assert_eq!(next_bet(45), 20);
//! ```

pub mod core;
pub mod engine;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Color, FrequencyTable, HistoryEntry, HistoryLog, Observation, Position};
pub use crate::engine::{top_colors, Assignment, BetStaircase, Session};
pub use crate::store::{FrequencyStore, StoreConfig, StoreError};
