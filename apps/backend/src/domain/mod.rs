//! Domain layer: pure market rules, no I/O.

pub mod priority;
pub mod selection;
pub mod status;
pub mod subject;

#[cfg(test)]
mod tests_props_selection;

// Re-exports for ergonomics
pub use priority::{ranks_from_standings, PriorityQueue, StandingRow};
pub use selection::{select_bid_winner, select_claim_winner, Claim, Offer, SelectionError};
pub use status::{BidStatus, ClaimStatus, StatusTransitionError, WaiverStatus};
pub use subject::Subject;

pub type TeamId = i64;
