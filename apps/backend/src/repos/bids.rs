//! Bids repository functions for domain layer.
//!
//! Rows are validated on the way in: a stored bid with a non-positive amount
//! is reported as data corruption instead of being fed to selection.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::bids_sea as bids_adapter;
use crate::domain::{BidStatus, Offer};
use crate::entities::bids;
use crate::errors::domain::{DomainError, ValidationKind};

/// Bid domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Bid {
    pub id: i64,
    pub player_id: i64,
    pub team_id: i64,
    pub amount: i64,
    pub status: BidStatus,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
}

impl Bid {
    pub fn offer(&self) -> Offer {
        Offer {
            id: self.id,
            team_id: self.team_id,
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

// Free functions (generic) for bid operations

pub async fn find_pending_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<Bid>, DomainError> {
    let rows = bids_adapter::find_pending_by_player(conn, player_id).await?;
    rows.into_iter().map(Bid::try_from).collect()
}

pub async fn find_latest_approved<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Bid>, DomainError> {
    let row = bids_adapter::find_latest_approved(conn, player_id).await?;
    row.map(Bid::try_from).transpose()
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bid_id: i64,
) -> Result<Option<Bid>, DomainError> {
    let row = bids_adapter::find_by_id(conn, bid_id).await?;
    row.map(Bid::try_from).transpose()
}

pub async fn create_bid<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
    amount: i64,
    expires_at: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<Bid, DomainError> {
    if amount <= 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            "Bid amount must be a positive integer",
        ));
    }
    let dto = bids_adapter::BidCreate {
        player_id,
        team_id,
        amount,
        expires_at,
        created_at: now,
    };
    let bid = bids_adapter::create_bid(conn, dto).await?;
    Bid::try_from(bid)
}

/// Settle one pending bid. Returns false when it was no longer pending.
pub async fn settle<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bid_id: i64,
    to: BidStatus,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    BidStatus::Pending
        .transition(to)
        .map_err(|e| DomainError::validation_other(e.to_string()))?;
    let rows = bids_adapter::settle_if_pending(conn, bid_id, to.into(), now).await?;
    Ok(rows == 1)
}

/// Reject every pending bid on a player, returning the rejected ids.
pub async fn reject_all_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<i64>, DomainError> {
    let ids = bids_adapter::pending_ids_by_player(conn, player_id).await?;
    if ids.is_empty() {
        return Ok(ids);
    }
    bids_adapter::reject_pending_by_player(conn, player_id, now).await?;
    Ok(ids)
}

/// Reject a team's own pending bid on a player. Returns how many were superseded.
pub async fn supersede_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<u64, DomainError> {
    Ok(bids_adapter::reject_pending_by_team(conn, player_id, team_id, now).await?)
}

pub async fn find_due_player_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<i64>, DomainError> {
    Ok(bids_adapter::find_due_player_ids(conn, now, limit).await?)
}

// Conversions between SeaORM models and domain models

impl From<bids::BidStatus> for BidStatus {
    fn from(status: bids::BidStatus) -> Self {
        match status {
            bids::BidStatus::Pending => BidStatus::Pending,
            bids::BidStatus::Approved => BidStatus::Approved,
            bids::BidStatus::Rejected => BidStatus::Rejected,
        }
    }
}

impl From<BidStatus> for bids::BidStatus {
    fn from(status: BidStatus) -> Self {
        match status {
            BidStatus::Pending => bids::BidStatus::Pending,
            BidStatus::Approved => bids::BidStatus::Approved,
            BidStatus::Rejected => bids::BidStatus::Rejected,
        }
    }
}

impl TryFrom<bids::Model> for Bid {
    type Error = DomainError;

    fn try_from(model: bids::Model) -> Result<Self, Self::Error> {
        if model.amount <= 0 {
            return Err(DomainError::data_corruption(format!(
                "Bid {} has non-positive amount {}",
                model.id, model.amount
            )));
        }
        Ok(Self {
            id: model.id,
            player_id: model.player_id,
            team_id: model.team_id,
            amount: model.amount,
            status: model.status.into(),
            expires_at: model.expires_at,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        })
    }
}
