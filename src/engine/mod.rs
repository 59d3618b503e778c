//! Probability estimation and bet sizing.
//!
//! Pure functions over a loaded [`FrequencyTable`](crate::core::FrequencyTable):
//! no mutation of the table and no I/O.

mod bet;
mod probability;
mod session;

pub use bet::{next_bet, BetStaircase, StaircaseConfig, StaircaseError};
pub use probability::{color_totals, top_colors, Assignment, DEFAULT_TOP_K};
pub use session::Session;
