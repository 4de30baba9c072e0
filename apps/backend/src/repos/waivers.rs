//! Waiver and waiver-claim repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::waivers_sea as waivers_adapter;
use crate::domain::{Claim, ClaimStatus, WaiverStatus};
use crate::entities::{waiver_claims, waivers};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Waiver {
    pub id: i64,
    pub player_id: i64,
    pub from_team_id: Option<i64>,
    pub status: WaiverStatus,
    pub claimed_by: Option<i64>,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaiverClaim {
    pub id: i64,
    pub waiver_id: i64,
    pub team_id: i64,
    pub amount: Option<i64>,
    pub status: ClaimStatus,
    pub created_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
}

impl WaiverClaim {
    /// The selection view of this claim; the amount is dropped.
    pub fn claim(&self) -> Claim {
        Claim {
            id: self.id,
            team_id: self.team_id,
            created_at: self.created_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Option<Waiver>, DomainError> {
    let waiver = waivers_adapter::find_by_id(conn, waiver_id).await?;
    Ok(waiver.map(Waiver::from))
}

pub async fn require_waiver<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Waiver, DomainError> {
    find_by_id(conn, waiver_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Waiver,
            format!("Waiver {waiver_id} not found"),
        )
    })
}

pub async fn find_open_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Waiver>, DomainError> {
    let waiver = waivers_adapter::find_open_by_player(conn, player_id).await?;
    Ok(waiver.map(Waiver::from))
}

pub async fn create_waiver<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    from_team_id: Option<i64>,
    expires_at: OffsetDateTime,
) -> Result<Waiver, DomainError> {
    let dto = waivers_adapter::WaiverCreate {
        player_id,
        from_team_id,
        expires_at,
    };
    let waiver = waivers_adapter::create_waiver(conn, dto).await?;
    Ok(Waiver::from(waiver))
}

/// Returns false when the waiver was no longer open.
pub async fn claim_if_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let rows = waivers_adapter::claim_if_open(conn, waiver_id, team_id, now).await?;
    Ok(rows == 1)
}

pub async fn find_due_waiver_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<i64>, DomainError> {
    Ok(waivers_adapter::find_due_waiver_ids(conn, now, limit).await?)
}

pub async fn find_pending_claims<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Vec<WaiverClaim>, DomainError> {
    let rows = waivers_adapter::find_pending_claims(conn, waiver_id).await?;
    Ok(rows.into_iter().map(WaiverClaim::from).collect())
}

pub async fn find_claimed_claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Option<WaiverClaim>, DomainError> {
    let row = waivers_adapter::find_claimed_claim(conn, waiver_id).await?;
    Ok(row.map(WaiverClaim::from))
}

pub async fn create_claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
    team_id: i64,
    amount: Option<i64>,
) -> Result<WaiverClaim, DomainError> {
    let dto = waivers_adapter::ClaimCreate {
        waiver_id,
        team_id,
        amount,
    };
    let claim = waivers_adapter::create_claim(conn, dto).await?;
    Ok(WaiverClaim::from(claim))
}

/// Settle one pending claim. Returns false when it was no longer pending.
pub async fn settle_claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    claim_id: i64,
    to: ClaimStatus,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    ClaimStatus::Pending
        .transition(to)
        .map_err(|e| DomainError::validation_other(e.to_string()))?;
    let rows = waivers_adapter::settle_claim_if_pending(conn, claim_id, to.into(), now).await?;
    Ok(rows == 1)
}

/// Reject every pending claim on a waiver, returning the rejected ids.
pub async fn reject_all_pending_claims<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<i64>, DomainError> {
    let ids = waivers_adapter::pending_claim_ids(conn, waiver_id).await?;
    if ids.is_empty() {
        return Ok(ids);
    }
    waivers_adapter::reject_pending_claims(conn, waiver_id, now).await?;
    Ok(ids)
}

// Conversions between SeaORM models and domain models

impl From<waivers::WaiverStatus> for WaiverStatus {
    fn from(status: waivers::WaiverStatus) -> Self {
        match status {
            waivers::WaiverStatus::Open => WaiverStatus::Open,
            waivers::WaiverStatus::Claimed => WaiverStatus::Claimed,
        }
    }
}

impl From<waiver_claims::ClaimStatus> for ClaimStatus {
    fn from(status: waiver_claims::ClaimStatus) -> Self {
        match status {
            waiver_claims::ClaimStatus::Pending => ClaimStatus::Pending,
            waiver_claims::ClaimStatus::Claimed => ClaimStatus::Claimed,
            waiver_claims::ClaimStatus::Rejected => ClaimStatus::Rejected,
        }
    }
}

impl From<ClaimStatus> for waiver_claims::ClaimStatus {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Pending => waiver_claims::ClaimStatus::Pending,
            ClaimStatus::Claimed => waiver_claims::ClaimStatus::Claimed,
            ClaimStatus::Rejected => waiver_claims::ClaimStatus::Rejected,
        }
    }
}

impl From<waivers::Model> for Waiver {
    fn from(model: waivers::Model) -> Self {
        Self {
            id: model.id,
            player_id: model.player_id,
            from_team_id: model.from_team_id,
            status: model.status.into(),
            claimed_by: model.claimed_by,
            expires_at: model.expires_at,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        }
    }
}

impl From<waiver_claims::Model> for WaiverClaim {
    fn from(model: waiver_claims::Model) -> Self {
        Self {
            id: model.id,
            waiver_id: model.waiver_id,
            team_id: model.team_id,
            amount: model.amount,
            status: model.status.into(),
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        }
    }
}
