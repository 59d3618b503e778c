//! Pure record/undo transitions over a table and its history.
//!
//! These functions mutate in memory only; the store persists the result.

use super::color::Color;
use super::history::{HistoryEntry, HistoryLog, Observation};
use super::position::Position;
use super::table::FrequencyTable;
use thiserror::Error;

/// An observation referenced a cube the table does not hold.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Cube {0:?} is not in the frequency table")]
pub struct UnknownCube(pub String);

/// Why a single slot of an undo could not be reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyKind {
    /// The cube is no longer in the table.
    MissingCube,
    /// The count is already zero.
    Underflow,
}

/// One slot of an undone entry that did not match the table.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Undo skipped {cube} ({position}) {color}: {kind:?}")]
pub struct UndoInconsistency {
    pub index: usize,
    pub position: Position,
    pub cube: String,
    pub color: Color,
    pub kind: InconsistencyKind,
}

/// Outcome of reverting the newest history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Reverted {
    pub entry: HistoryEntry,
    pub inconsistencies: Vec<UndoInconsistency>,
}

impl Reverted {
    pub fn is_clean(&self) -> bool {
        self.inconsistencies.is_empty()
    }
}

/// Count one observation and append it to the history.
///
/// Every cube is checked before anything is mutated, so an unknown cube
/// leaves both table and history untouched. A count already at `u64::MAX`
/// stays there.
///
/// # Example
///
/// ```rust
/// use cubetally::core::{record, Color, FrequencyTable, HistoryLog, Observation, Position};
///
/// let mut table = FrequencyTable::with_cubes(["WB"]);
/// let mut history = HistoryLog::new();
/// let observation = Observation::new(["WB", "WB", "WB"], [Color::Red, Color::Red, Color::Green]);
///
/// record(&mut table, &mut history, observation).unwrap();
/// assert_eq!(table.count("WB", Position::Right, Color::Green), Some(1));
/// assert_eq!(history.len(), 1);
/// ```
pub fn record(
    table: &mut FrequencyTable,
    history: &mut HistoryLog,
    observation: Observation,
) -> Result<(), UnknownCube> {
    if let Some(cube) = observation
        .positions
        .iter()
        .find(|cube| !table.contains_cube(cube))
    {
        return Err(UnknownCube(cube.clone()));
    }

    for (position, cube, color) in observation.slots() {
        if let Some(counts) = table.cube_mut(cube) {
            let slot = counts.at_mut(position).get_mut(color);
            *slot = slot.saturating_add(1);
        }
    }

    history.push(HistoryEntry::now(observation));
    Ok(())
}

/// Pop the newest entry and decrement the counts it added.
///
/// Returns `None` when the history is empty. Slots whose cube is gone or
/// whose count is already zero are skipped and reported; the remaining
/// slots are still reversed.
pub fn undo(table: &mut FrequencyTable, history: &mut HistoryLog) -> Option<Reverted> {
    let entry = history.pop()?;
    let mut inconsistencies = Vec::new();

    for (index, position) in Position::ALL.into_iter().enumerate() {
        let cube = &entry.positions[index];
        let color = entry.results[index];
        let kind = match table.cube_mut(cube) {
            None => Some(InconsistencyKind::MissingCube),
            Some(counts) => {
                let slot = counts.at_mut(position).get_mut(color);
                match slot.checked_sub(1) {
                    Some(next) => {
                        *slot = next;
                        None
                    }
                    None => Some(InconsistencyKind::Underflow),
                }
            }
        };
        if let Some(kind) = kind {
            inconsistencies.push(UndoInconsistency {
                index,
                position,
                cube: cube.clone(),
                color,
                kind,
            });
        }
    }

    Some(Reverted {
        entry,
        inconsistencies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wb_observation() -> Observation {
        Observation::new(["WB", "WB", "WB"], [Color::Red, Color::Red, Color::Green])
    }

    #[test]
    fn record_increments_each_slot() {
        let mut table = FrequencyTable::with_cubes(["WB"]);
        table.cube_mut("WB").unwrap().left.red = 2;
        table.cube_mut("WB").unwrap().left.blue = 1;
        let mut history = HistoryLog::new();

        record(&mut table, &mut history, wb_observation()).unwrap();

        assert_eq!(table.count("WB", Position::Left, Color::Red), Some(3));
        assert_eq!(table.count("WB", Position::Middle, Color::Red), Some(1));
        assert_eq!(table.count("WB", Position::Right, Color::Green), Some(1));
        assert_eq!(table.count("WB", Position::Left, Color::Blue), Some(1));
        assert_eq!(history.last().unwrap().positions, ["WB", "WB", "WB"]);
    }

    #[test]
    fn record_rejects_unknown_cube_without_mutation() {
        let mut table = FrequencyTable::with_cubes(["WB"]);
        let mut history = HistoryLog::new();
        let observation = Observation::new(["WB", "ZZ", "WB"], [Color::Red; 3]);

        let err = record(&mut table, &mut history, observation).unwrap_err();

        assert_eq!(err, UnknownCube("ZZ".to_string()));
        assert_eq!(table.total(), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn undo_on_empty_history_is_none() {
        let mut table = FrequencyTable::with_cubes(["WB"]);
        let mut history = HistoryLog::new();
        assert!(undo(&mut table, &mut history).is_none());
    }

    #[test]
    fn undo_reverses_record() {
        let mut table = FrequencyTable::with_cubes(["WB", "YR"]);
        let before = table.clone();
        let mut history = HistoryLog::new();

        record(&mut table, &mut history, wb_observation()).unwrap();
        let reverted = undo(&mut table, &mut history).unwrap();

        assert!(reverted.is_clean());
        assert_eq!(table, before);
        assert!(history.is_empty());
    }

    #[test]
    fn undo_skips_missing_cube_and_continues() {
        let mut table = FrequencyTable::with_cubes(["WB"]);
        let mut history = HistoryLog::new();
        history.push(HistoryEntry {
            positions: ["WB".into(), "GONE".into(), "WB".into()],
            results: [Color::Red, Color::Red, Color::Green],
            recorded_at: None,
        });
        table.cube_mut("WB").unwrap().left.red = 1;
        table.cube_mut("WB").unwrap().right.green = 1;

        let reverted = undo(&mut table, &mut history).unwrap();

        assert_eq!(reverted.inconsistencies.len(), 1);
        let issue = &reverted.inconsistencies[0];
        assert_eq!(issue.index, 1);
        assert_eq!(issue.position, Position::Middle);
        assert_eq!(issue.kind, InconsistencyKind::MissingCube);
        assert_eq!(table.total(), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn undo_reports_underflow_instead_of_clamping() {
        let mut table = FrequencyTable::with_cubes(["WB"]);
        let mut history = HistoryLog::new();
        history.push(HistoryEntry::now(wb_observation()));
        table.cube_mut("WB").unwrap().middle.red = 1;

        let reverted = undo(&mut table, &mut history).unwrap();

        let kinds: Vec<_> = reverted.inconsistencies.iter().map(|i| (i.index, i.kind)).collect();
        assert_eq!(
            kinds,
            vec![(0, InconsistencyKind::Underflow), (2, InconsistencyKind::Underflow)]
        );
        assert_eq!(table.count("WB", Position::Middle, Color::Red), Some(0));
    }

    #[test]
    fn record_saturates_at_max_count() {
        let mut table = FrequencyTable::with_cubes(["WB"]);
        table.cube_mut("WB").unwrap().left.red = u64::MAX;
        let mut history = HistoryLog::new();

        record(&mut table, &mut history, wb_observation()).unwrap();

        assert_eq!(table.count("WB", Position::Left, Color::Red), Some(u64::MAX));
        assert_eq!(table.count("WB", Position::Middle, Color::Red), Some(1));
        assert_eq!(history.len(), 1);
    }
}
