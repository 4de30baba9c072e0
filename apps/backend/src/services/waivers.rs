//! Waivers: putting a player on waivers and collecting claims.

use sea_orm::DatabaseConnection;
use time::OffsetDateTime;
use tracing::info;

use crate::db::txn::with_txn;
use crate::domain::WaiverStatus;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::waivers::{self, Waiver, WaiverClaim};
use crate::repos::{bids, players, teams};

/// Open a waiver for a player on behalf of their current team.
///
/// A player is either on the market or on waivers, never both.
pub async fn open_waiver(
    conn: &DatabaseConnection,
    player_id: i64,
    expires_at: OffsetDateTime,
) -> Result<Waiver, DomainError> {
    with_txn(conn, |txn| {
        Box::pin(async move {
            let player = players::lock_player(txn, player_id).await?;
            if let Some(open) = waivers::find_open_by_player(txn, player_id).await? {
                return Err(DomainError::conflict(
                    ConflictKind::PlayerOnWaivers,
                    format!("Player {player_id} is already on waiver {}", open.id),
                ));
            }
            if player.on_market {
                return Err(DomainError::conflict(
                    ConflictKind::PlayerOnMarket,
                    format!("Player {player_id} is listed on the open market"),
                ));
            }
            if !bids::find_pending_by_player(txn, player_id).await?.is_empty() {
                return Err(DomainError::conflict(
                    ConflictKind::PlayerOnMarket,
                    format!("Player {player_id} still has pending bids"),
                ));
            }

            let waiver = waivers::create_waiver(txn, player_id, player.team_id, expires_at).await?;
            info!(
                waiver_id = waiver.id,
                player_id,
                from_team_id = ?waiver.from_team_id,
                "Waiver opened"
            );
            Ok(waiver)
        })
    })
    .await
}

/// Record a team's claim on an open waiver. Any amount is stored but plays
/// no part in resolution.
pub async fn submit_claim(
    conn: &DatabaseConnection,
    waiver_id: i64,
    team_id: i64,
    amount: Option<i64>,
) -> Result<WaiverClaim, DomainError> {
    with_txn(conn, |txn| {
        Box::pin(async move {
            let waiver = waivers::require_waiver(txn, waiver_id).await?;
            if waiver.status != WaiverStatus::Open {
                return Err(DomainError::validation(
                    ValidationKind::WaiverClosed,
                    format!("Waiver {waiver_id} is no longer open"),
                ));
            }
            teams::require_team(txn, team_id).await?;
            if waiver.from_team_id == Some(team_id) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidClaim,
                    "A team cannot claim a player it waived",
                ));
            }

            let claim = waivers::create_claim(txn, waiver_id, team_id, amount).await?;
            info!(waiver_id, team_id, claim_id = claim.id, "Waiver claim submitted");
            Ok(claim)
        })
    })
    .await
}
