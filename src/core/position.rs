//! The three slots a cube can be placed in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Left, middle or right slot, serialized as `L`, `M`, `R`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "M")]
    Middle,
    #[serde(rename = "R")]
    Right,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown position tag: {0:?}")]
pub struct ParsePositionError(pub String);

impl Position {
    /// Positions in observation order.
    pub const ALL: [Position; 3] = [Position::Left, Position::Middle, Position::Right];

    pub fn tag(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Middle => 'M',
            Self::Right => 'R',
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::Left),
            "M" => Ok(Self::Middle),
            "R" => Ok(Self::Right),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_left_middle_right() {
        assert_eq!(Position::ALL.map(Position::tag), ['L', 'M', 'R']);
        assert_eq!(Position::Right.index(), 2);
    }

    #[test]
    fn parse_accepts_lowercase() {
        assert_eq!("m".parse::<Position>(), Ok(Position::Middle));
        assert!("X".parse::<Position>().is_err());
    }
}
