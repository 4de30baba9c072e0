//! Open-market bidding: placing bids and reading a player's listing.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use time::OffsetDateTime;
use tracing::info;

use crate::config::market::MarketConfig;
use crate::db::txn::with_txn;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::bids::{self, Bid};
use crate::repos::players::{self, Player};
use crate::repos::{teams, waivers};

/// A bid as requested by a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceBid {
    pub player_id: i64,
    pub team_id: i64,
    pub amount: i64,
    pub expires_at: Option<OffsetDateTime>,
}

/// Record a bid, superseding the team's own pending bid on the same player.
///
/// The player row is locked first so concurrent bids by one team cannot both
/// survive the supersede.
pub async fn place_bid(
    conn: &DatabaseConnection,
    market: &MarketConfig,
    req: PlaceBid,
    now: OffsetDateTime,
) -> Result<Bid, DomainError> {
    if req.amount <= 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            "Bid amount must be a positive integer",
        ));
    }
    let expires_at = match req.expires_at {
        Some(at) => at,
        None => now.checked_add(market.bid_window).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidBid,
                "Default bid window runs past the supported date range",
            )
        })?,
    };
    if expires_at <= now {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            "Bid expiry must be in the future",
        ));
    }

    with_txn(conn, |txn| {
        Box::pin(async move {
            let player = players::lock_player(txn, req.player_id).await?;
            if !player.on_market {
                return Err(DomainError::validation(
                    ValidationKind::PlayerNotOnMarket,
                    format!("Player {} is not on the open market", player.id),
                ));
            }
            if let Some(waiver) = waivers::find_open_by_player(txn, req.player_id).await? {
                return Err(DomainError::conflict(
                    ConflictKind::PlayerOnWaivers,
                    format!("Player {} is on waiver {}", player.id, waiver.id),
                ));
            }
            teams::require_team(txn, req.team_id).await?;
            if player.team_id == Some(req.team_id) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    "A team cannot bid on its own player",
                ));
            }

            let superseded = bids::supersede_pending(txn, req.player_id, req.team_id, now).await?;
            let bid = bids::create_bid(
                txn,
                req.player_id,
                req.team_id,
                req.amount,
                expires_at,
                now,
            )
            .await?;

            info!(
                player_id = bid.player_id,
                team_id = bid.team_id,
                bid_id = bid.id,
                amount = bid.amount,
                superseded,
                "Bid placed"
            );
            Ok(bid)
        })
    })
    .await
}

/// Pending bids on a player, oldest first.
pub async fn list_open_bids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<Bid>, DomainError> {
    players::require_player(conn, player_id).await?;
    bids::find_pending_by_player(conn, player_id).await
}

/// The player and whether they are currently listed.
pub async fn list_player_listing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    players::require_player(conn, player_id).await
}
