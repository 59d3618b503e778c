//! Bet sizing from cumulative loss.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building a [`BetStaircase`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StaircaseError {
    #[error("Thresholds ({thresholds}) and amounts ({amounts}) must pair up")]
    LengthMismatch { thresholds: usize, amounts: usize },

    #[error("Thresholds must be strictly increasing (at index {index})")]
    NotIncreasing { index: usize },
}

/// Monotone step function from cumulative loss to the suggested wager.
///
/// Below the first threshold the baseline applies; at or above a threshold
/// its paired amount applies, the highest such threshold winning.
///
/// # Example
///
/// ```rust
/// use cubetally::engine::BetStaircase;
///
/// let staircase = BetStaircase::default();
/// assert_eq!(staircase.next_bet(29), 10);
/// assert_eq!(staircase.next_bet(30), 20);
/// assert_eq!(staircase.next_bet(500), 80);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "StaircaseConfig", into = "StaircaseConfig")]
pub struct BetStaircase {
    steps: Vec<(u64, u64)>,
    baseline: u64,
}

/// Serialized form of a staircase, as read from configuration.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StaircaseConfig {
    pub thresholds: Vec<u64>,
    pub amounts: Vec<u64>,
    pub baseline: u64,
}

impl BetStaircase {
    pub const DEFAULT_THRESHOLDS: [u64; 3] = [30, 90, 210];
    pub const DEFAULT_AMOUNTS: [u64; 3] = [20, 40, 80];
    pub const DEFAULT_BASELINE: u64 = 10;

    /// Pair thresholds with amounts positionally.
    pub fn new(thresholds: &[u64], amounts: &[u64], baseline: u64) -> Result<Self, StaircaseError> {
        if thresholds.len() != amounts.len() {
            return Err(StaircaseError::LengthMismatch {
                thresholds: thresholds.len(),
                amounts: amounts.len(),
            });
        }
        if let Some(index) = thresholds.windows(2).position(|w| w[0] >= w[1]) {
            return Err(StaircaseError::NotIncreasing { index: index + 1 });
        }
        let steps = thresholds.iter().copied().zip(amounts.iter().copied()).collect();
        Ok(Self { steps, baseline })
    }

    /// Suggested wager for the given cumulative loss.
    pub fn next_bet(&self, total_loss: u64) -> u64 {
        self.steps
            .iter()
            .rev()
            .find(|(threshold, _)| total_loss >= *threshold)
            .map_or(self.baseline, |(_, amount)| *amount)
    }

    pub fn baseline(&self) -> u64 {
        self.baseline
    }

    pub fn thresholds(&self) -> impl Iterator<Item = u64> + '_ {
        self.steps.iter().map(|(t, _)| *t)
    }
}

impl Default for BetStaircase {
    fn default() -> Self {
        Self {
            steps: Self::DEFAULT_THRESHOLDS
                .into_iter()
                .zip(Self::DEFAULT_AMOUNTS)
                .collect(),
            baseline: Self::DEFAULT_BASELINE,
        }
    }
}

impl TryFrom<StaircaseConfig> for BetStaircase {
    type Error = StaircaseError;

    fn try_from(config: StaircaseConfig) -> Result<Self, Self::Error> {
        Self::new(&config.thresholds, &config.amounts, config.baseline)
    }
}

impl From<BetStaircase> for StaircaseConfig {
    fn from(staircase: BetStaircase) -> Self {
        let (thresholds, amounts) = staircase.steps.into_iter().unzip();
        Self {
            thresholds,
            amounts,
            baseline: staircase.baseline,
        }
    }
}

/// [`BetStaircase::next_bet`] with the default staircase.
pub fn next_bet(total_loss: u64) -> u64 {
    BetStaircase::default().next_bet(total_loss)
}
