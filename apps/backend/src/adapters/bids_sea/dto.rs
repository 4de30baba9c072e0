//! DTOs for bids_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a bid.
#[derive(Debug, Clone)]
pub struct BidCreate {
    pub player_id: i64,
    pub team_id: i64,
    pub amount: i64,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}
