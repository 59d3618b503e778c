//! Core data model and pure transitions.
//!
//! This module contains the pure core of the tracker:
//! - The color and position alphabets
//! - The dense frequency table
//! - The history log used as an undo stack
//! - In-memory record/undo over the two
//!
//! Nothing here touches the filesystem; persistence lives in
//! [`crate::store`].

mod color;
mod history;
mod position;
mod table;
mod tally;

pub use color::{Color, ParseColorError};
pub use history::{HistoryEntry, HistoryLog, Observation};
pub use position::{ParsePositionError, Position};
pub use table::{ColorCounts, CubeCounts, FrequencyTable};
pub use tally::{record, undo, InconsistencyKind, Reverted, UndoInconsistency, UnknownCube};
