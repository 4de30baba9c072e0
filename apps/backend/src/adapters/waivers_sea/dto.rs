//! DTOs for waivers_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct WaiverCreate {
    pub player_id: i64,
    pub from_team_id: Option<i64>,
    pub expires_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct ClaimCreate {
    pub waiver_id: i64,
    pub team_id: i64,
    pub amount: Option<i64>,
}
