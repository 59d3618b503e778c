//! The six-color alphabet a cube can land on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A face color, serialized as its one-letter code.
///
/// Variant order is the canonical alphabet order `R, G, Y, P, B, W`, which
/// is also the tie-break order used when ranking probabilities.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "P")]
    Pink,
    #[serde(rename = "B")]
    Blue,
    #[serde(rename = "W")]
    White,
}

/// Returned when a string is not one of the six color codes.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown color code: {0:?}")]
pub struct ParseColorError(pub String);

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Pink,
        Color::Blue,
        Color::White,
    ];

    /// One-letter code used in data files.
    pub fn code(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::Pink => 'P',
            Self::Blue => 'B',
            Self::White => 'W',
        }
    }

    /// Position of this color in [`Color::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses a color code, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R" => Ok(Self::Red),
            "G" => Ok(Self::Green),
            "Y" => Ok(Self::Yellow),
            "P" => Ok(Self::Pink),
            "B" => Ok(Self::Blue),
            "W" => Ok(Self::White),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}
