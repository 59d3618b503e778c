//! Explicit betting-session state.

use super::bet::BetStaircase;
use serde::{Deserialize, Serialize};

/// Capital, cumulative loss and current bet for one betting session.
///
/// Every change to the loss recomputes the bet from the staircase.
///
/// # Example
///
/// ```rust
/// use cubetally::engine::Session;
///
/// let mut session = Session::default();
/// session.lose(40);
/// assert_eq!(session.capital(), 960);
/// assert_eq!(session.bet(), 20);
///
/// session.gain(100);
/// assert_eq!(session.total_loss(), 0);
/// assert_eq!(session.bet(), 10);
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Session {
    capital: i64,
    total_loss: u64,
    bet: u64,
    staircase: BetStaircase,
}

impl Session {
    pub const DEFAULT_CAPITAL: i64 = 1000;

    pub fn new(capital: i64, staircase: BetStaircase) -> Self {
        let bet = staircase.next_bet(0);
        Self {
            capital,
            total_loss: 0,
            bet,
            staircase,
        }
    }

    /// Record a lost amount.
    pub fn lose(&mut self, amount: u64) -> u64 {
        self.capital = self.capital.saturating_sub_unsigned(amount);
        self.total_loss = self.total_loss.saturating_add(amount);
        self.rebet()
    }

    /// Record a won amount; the cumulative loss never drops below zero.
    pub fn gain(&mut self, amount: u64) -> u64 {
        self.capital = self.capital.saturating_add_unsigned(amount);
        self.total_loss = self.total_loss.saturating_sub(amount);
        self.rebet()
    }

    fn rebet(&mut self) -> u64 {
        self.bet = self.staircase.next_bet(self.total_loss);
        log::debug!("total loss {} -> bet {}", self.total_loss, self.bet);
        self.bet
    }

    pub fn capital(&self) -> i64 {
        self.capital
    }

    pub fn total_loss(&self) -> u64 {
        self.total_loss
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn staircase(&self) -> &BetStaircase {
        &self.staircase
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPITAL, BetStaircase::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_baseline() {
        let session = Session::default();
        assert_eq!(session.capital(), 1000);
        assert_eq!(session.total_loss(), 0);
        assert_eq!(session.bet(), 10);
    }

    #[test]
    fn losses_climb_the_staircase() {
        let mut session = Session::default();
        assert_eq!(session.lose(30), 20);
        assert_eq!(session.lose(60), 40);
        assert_eq!(session.lose(120), 80);
        assert_eq!(session.total_loss(), 210);
        assert_eq!(session.capital(), 790);
    }

    #[test]
    fn gains_reduce_loss_saturating() {
        let mut session = Session::default();
        session.lose(100);
        assert_eq!(session.gain(20), 20);
        assert_eq!(session.total_loss(), 80);
        session.gain(500);
        assert_eq!(session.total_loss(), 0);
        assert_eq!(session.capital(), 1400);
        assert_eq!(session.bet(), 10);
    }

    #[test]
    fn capital_may_go_negative() {
        let mut session = Session::new(5, BetStaircase::default());
        session.lose(20);
        assert_eq!(session.capital(), -15);
    }
}
