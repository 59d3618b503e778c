//! Dense frequency table: cube → position → color → count.
//!
//! Every cube present in the table carries all three positions and all six
//! colors. The nested structs make that a type-level fact, and a data file
//! missing any key fails to deserialize instead of being read as zero.

use super::color::Color;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed count for each color at one position of one cube.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorCounts {
    #[serde(rename = "R")]
    pub red: u64,
    #[serde(rename = "G")]
    pub green: u64,
    #[serde(rename = "Y")]
    pub yellow: u64,
    #[serde(rename = "P")]
    pub pink: u64,
    #[serde(rename = "B")]
    pub blue: u64,
    #[serde(rename = "W")]
    pub white: u64,
}

impl ColorCounts {
    pub fn get(&self, color: Color) -> u64 {
        match color {
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Yellow => self.yellow,
            Color::Pink => self.pink,
            Color::Blue => self.blue,
            Color::White => self.white,
        }
    }

    pub fn get_mut(&mut self, color: Color) -> &mut u64 {
        match color {
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
            Color::Yellow => &mut self.yellow,
            Color::Pink => &mut self.pink,
            Color::Blue => &mut self.blue,
            Color::White => &mut self.white,
        }
    }

    /// Sum over all six colors, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        Color::ALL
            .iter()
            .fold(0u64, |acc, &c| acc.saturating_add(self.get(c)))
    }

    /// `(color, count)` pairs in canonical color order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, u64)> + '_ {
        Color::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Per-position counts for a single cube.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CubeCounts {
    #[serde(rename = "L")]
    pub left: ColorCounts,
    #[serde(rename = "M")]
    pub middle: ColorCounts,
    #[serde(rename = "R")]
    pub right: ColorCounts,
}

impl CubeCounts {
    pub fn at(&self, position: Position) -> &ColorCounts {
        match position {
            Position::Left => &self.left,
            Position::Middle => &self.middle,
            Position::Right => &self.right,
        }
    }

    pub fn at_mut(&mut self, position: Position) -> &mut ColorCounts {
        match position {
            Position::Left => &mut self.left,
            Position::Middle => &mut self.middle,
            Position::Right => &mut self.right,
        }
    }
}

/// Frequency table keyed by cube identifier (e.g. `"WB"`).
///
/// Serializes as a plain JSON object so existing data files stay
/// human-readable and hand-editable.
///
/// # Example
///
/// ```rust
/// use cubetally::core::{Color, FrequencyTable, Position};
///
/// let mut table = FrequencyTable::with_cubes(["WB", "YR"]);
/// assert!(table.contains_cube("WB"));
/// assert_eq!(table.count("WB", Position::Left, Color::Red), Some(0));
///
/// table.cube_mut("WB").unwrap().at_mut(Position::Left).red += 2;
/// assert_eq!(table.count("WB", Position::Left, Color::Red), Some(2));
/// assert_eq!(table.count("XX", Position::Left, Color::Red), None);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    cubes: BTreeMap<String, CubeCounts>,
}

impl FrequencyTable {
    /// Create an empty table with no cubes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the given cubes with every count at zero.
    pub fn with_cubes<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cubes = ids
            .into_iter()
            .map(|id| (id.into(), CubeCounts::default()))
            .collect();
        Self { cubes }
    }

    /// Add a cube with zeroed counts. Existing counts are kept.
    pub fn insert_cube(&mut self, id: impl Into<String>) {
        self.cubes.entry(id.into()).or_default();
    }

    pub fn contains_cube(&self, id: &str) -> bool {
        self.cubes.contains_key(id)
    }

    pub fn cube(&self, id: &str) -> Option<&CubeCounts> {
        self.cubes.get(id)
    }

    pub fn cube_mut(&mut self, id: &str) -> Option<&mut CubeCounts> {
        self.cubes.get_mut(id)
    }

    /// Count for a single slot, or `None` when the cube is unknown.
    pub fn count(&self, id: &str, position: Position, color: Color) -> Option<u64> {
        self.cube(id).map(|cube| cube.at(position).get(color))
    }

    /// Cube identifiers in sorted order.
    pub fn cube_ids(&self) -> impl Iterator<Item = &str> {
        self.cubes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Total number of observations counted across every slot, saturating
    /// at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.cubes
            .values()
            .flat_map(|cube| Position::ALL.map(|p| cube.at(p).total()))
            .fold(0, u64::saturating_add)
    }
}
