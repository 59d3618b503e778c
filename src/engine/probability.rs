//! Color probabilities for a given cube placement.

use crate::core::{Color, FrequencyTable, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of colors returned by [`top_colors`] when the caller has no preference.
pub const DEFAULT_TOP_K: usize = 3;

/// Which cube sits in which slot for the trial being estimated.
///
/// Any subset of the three positions may be filled.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    slots: BTreeMap<Position, String>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, position: Position, cube: impl Into<String>) -> Self {
        self.insert(position, cube);
        self
    }

    /// Place `cube` at `position`, replacing any previous cube there.
    pub fn insert(&mut self, position: Position, cube: impl Into<String>) {
        self.slots.insert(position, cube.into());
    }

    pub fn get(&self, position: Position) -> Option<&str> {
        self.slots.get(&position).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &str)> {
        self.slots.iter().map(|(p, c)| (*p, c.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<S: Into<String>> From<[S; 3]> for Assignment {
    /// A full `L, M, R` placement.
    fn from(cubes: [S; 3]) -> Self {
        let mut assignment = Self::new();
        for (position, cube) in Position::ALL.into_iter().zip(cubes) {
            assignment.insert(position, cube);
        }
        assignment
    }
}

impl<S: Into<String>> FromIterator<(Position, S)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Position, S)>>(iter: I) -> Self {
        let mut assignment = Self::new();
        for (position, cube) in iter {
            assignment.insert(position, cube);
        }
        assignment
    }
}

/// Summed counts per color across every assigned (cube, position) pair.
///
/// Cubes missing from the table contribute nothing. Sums saturate at
/// `u64::MAX`.
pub fn color_totals(table: &FrequencyTable, assignment: &Assignment) -> [u64; 6] {
    let mut totals = [0u64; 6];
    for (position, cube) in assignment.iter() {
        if let Some(counts) = table.cube(cube) {
            for (color, count) in counts.at(position).iter() {
                let total = &mut totals[color.index()];
                *total = total.saturating_add(count);
            }
        }
    }
    totals
}

/// The `k` most likely colors for an assignment, most likely first.
///
/// Probabilities are frequency ratios over the grand total of the summed
/// counts. Ties keep canonical color order. An assignment with no observed
/// counts yields an empty vector.
///
/// # Example
///
/// ```rust
/// use cubetally::core::{Color, FrequencyTable, Position};
/// use cubetally::engine::{top_colors, Assignment};
///
/// let mut table = FrequencyTable::with_cubes(["WB"]);
/// table.cube_mut("WB").unwrap().left.red = 3;
/// table.cube_mut("WB").unwrap().left.blue = 1;
///
/// let assignment = Assignment::new().with(Position::Left, "WB");
/// let top = top_colors(&table, &assignment, 2);
/// assert_eq!(top, vec![(Color::Red, 0.75), (Color::Blue, 0.25)]);
/// ```
pub fn top_colors(table: &FrequencyTable, assignment: &Assignment, k: usize) -> Vec<(Color, f64)> {
    let totals = color_totals(table, assignment);
    let grand_total = totals.iter().fold(0u64, |acc, &t| acc.saturating_add(t));
    if grand_total == 0 {
        return Vec::new();
    }

    let mut probabilities: Vec<(Color, f64)> = Color::ALL
        .into_iter()
        .map(|color| (color, totals[color.index()] as f64 / grand_total as f64))
        .collect();
    // stable: equal probabilities stay in canonical order
    probabilities.sort_by(|a, b| b.1.total_cmp(&a.1));
    probabilities.truncate(k);
    probabilities
}
