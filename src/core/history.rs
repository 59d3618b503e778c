//! Observation history tracking.
//!
//! The history log is the undo stack: entries are appended on record and
//! popped, newest first, on undo.

use super::color::Color;
use super::position::Position;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single trial: which cube sat in each slot and which color it showed.
///
/// Both triplets are in `L, M, R` order.
///
/// # Example
///
/// ```rust
/// use cubetally::core::{Color, Observation, Position};
///
/// let observation = Observation::new(["WB", "YR", "GP"], [Color::Red, Color::Red, Color::Green]);
/// let slots: Vec<_> = observation.slots().collect();
/// assert_eq!(slots[1], (Position::Middle, "YR", Color::Red));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Observation {
    pub positions: [String; 3],
    pub results: [Color; 3],
}

impl Observation {
    pub fn new<S: Into<String>>(positions: [S; 3], results: [Color; 3]) -> Self {
        Self {
            positions: positions.map(Into::into),
            results,
        }
    }

    /// `(position, cube, color)` for each slot in `L, M, R` order.
    pub fn slots(&self) -> impl Iterator<Item = (Position, &str, Color)> + '_ {
        Position::ALL
            .into_iter()
            .map(move |p| (p, self.positions[p.index()].as_str(), self.results[p.index()]))
    }
}

/// Record of a single observation in the history log.
///
/// `recorded_at` is absent in logs written before timestamps were tracked;
/// such entries still load.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub positions: [String; 3],
    pub results: [Color; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    /// Stamp an observation with the current time.
    pub fn now(observation: Observation) -> Self {
        Self {
            positions: observation.positions,
            results: observation.results,
            recorded_at: Some(Utc::now()),
        }
    }

    /// The observation this entry records, without its timestamp.
    pub fn observation(&self) -> Observation {
        Observation {
            positions: self.positions.clone(),
            results: self.results,
        }
    }
}

/// Ordered log of recorded observations, oldest first.
///
/// Serializes as `{"entries": [...]}`. A file with no `entries` field (such
/// as the `{}` backup placeholder) loads as an empty log.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HistoryLog {
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry as the newest.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the newest entry.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
