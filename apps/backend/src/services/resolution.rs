//! Resolution of one bid group or one waiver claim group.
//!
//! Each call runs in a single transaction: read the pending group, lock and
//! read the priority queue, pick the winner, then apply guarded writes. A
//! guard that matches no row means another resolver finished first; the
//! transaction rolls back and the subject is re-read to decide between an
//! idempotent replay and a reported conflict.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::db::txn::with_txn;
use crate::domain::{
    select_bid_winner, select_claim_winner, BidStatus, ClaimStatus, PriorityQueue,
    SelectionError, Subject, WaiverStatus,
};
use crate::errors::ResolutionError;
use crate::repos::{bids, players, waivers};
use crate::services::priority;

/// What a resolution call decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionOutcome {
    pub subject: Subject,
    pub winner_team_id: i64,
    /// Winning bid id or claim id.
    pub winning_id: i64,
    pub rejected_ids: Vec<i64>,
    /// The winner's rank after rotation; absent on a replay.
    pub new_priority: Option<i32>,
    /// Teams that received a priority row during this call.
    pub repaired_teams: Vec<i64>,
    pub already_resolved: bool,
}

impl ResolutionOutcome {
    fn replay(subject: Subject, winner_team_id: i64, winning_id: i64) -> Self {
        Self {
            subject,
            winner_team_id,
            winning_id,
            rejected_ids: Vec::new(),
            new_priority: None,
            repaired_teams: Vec::new(),
            already_resolved: true,
        }
    }
}

/// Resolve every pending bid on a player.
pub async fn resolve_player_bids(
    conn: &DatabaseConnection,
    player_id: i64,
    now: OffsetDateTime,
) -> Result<ResolutionOutcome, ResolutionError> {
    let subject = Subject::PlayerBids(player_id);
    let result = with_txn(conn, |txn| {
        Box::pin(async move { resolve_player_bids_in(txn, player_id, now).await })
    })
    .await;

    match result {
        Err(ResolutionError::ConcurrentResolutionConflict(_)) => {
            recover_from_conflict(subject, recorded_bid_outcome(conn, player_id).await?)
        }
        other => other,
    }
}

/// Resolve every pending claim on a waiver.
pub async fn resolve_waiver(
    conn: &DatabaseConnection,
    waiver_id: i64,
    now: OffsetDateTime,
) -> Result<ResolutionOutcome, ResolutionError> {
    let subject = Subject::Waiver(waiver_id);
    let result = with_txn(conn, |txn| {
        Box::pin(async move { resolve_waiver_in(txn, waiver_id, now).await })
    })
    .await;

    match result {
        Err(ResolutionError::ConcurrentResolutionConflict(_)) => {
            recover_from_conflict(subject, recorded_claim_outcome(conn, waiver_id).await?)
        }
        other => other,
    }
}

fn recover_from_conflict(
    subject: Subject,
    recorded: Option<ResolutionOutcome>,
) -> Result<ResolutionOutcome, ResolutionError> {
    match recorded {
        Some(outcome) => {
            info!(%subject, winner_team_id = outcome.winner_team_id, "Lost resolution race; subject already resolved");
            Ok(outcome)
        }
        None => {
            warn!(%subject, "Resolution conflict with no recorded winner");
            Err(ResolutionError::ConcurrentResolutionConflict(subject))
        }
    }
}

async fn resolve_player_bids_in<C: ConnectionTrait + Send + Sync>(
    txn: &C,
    player_id: i64,
    now: OffsetDateTime,
) -> Result<ResolutionOutcome, ResolutionError> {
    let subject = Subject::PlayerBids(player_id);
    let player = players::require_player(txn, player_id).await?;

    let pending = bids::find_pending_by_player(txn, player_id).await?;
    if pending.is_empty() {
        if !player.on_market {
            if let Some(outcome) = recorded_bid_outcome(txn, player_id).await? {
                debug!(player_id, "Bids already resolved; nothing to write");
                return Ok(outcome);
            }
        }
        return Err(ResolutionError::EmptyGroup(subject));
    }

    let offers: Vec<_> = pending.iter().map(bids::Bid::offer).collect();
    let (winner, mut repaired) = select_with_repair(txn, subject, now, |queue| {
        select_bid_winner(&offers, queue).cloned()
    })
    .await?;

    if !players::transfer_if_listed(txn, player_id, winner.team_id, now).await? {
        return Err(ResolutionError::ConcurrentResolutionConflict(subject));
    }
    if !bids::settle(txn, winner.id, BidStatus::Approved, now).await? {
        return Err(ResolutionError::ConcurrentResolutionConflict(subject));
    }
    let rejected_ids = bids::reject_all_pending(txn, player_id, now).await?;

    let rotation = priority::rotate_to_back(txn, winner.team_id, now).await?;
    if rotation.inserted {
        repaired.push(winner.team_id);
    }

    info!(
        player_id,
        winner_team_id = winner.team_id,
        bid_id = winner.id,
        amount = winner.amount,
        rejected = rejected_ids.len(),
        new_priority = rotation.rank,
        "Resolved player bids"
    );

    Ok(ResolutionOutcome {
        subject,
        winner_team_id: winner.team_id,
        winning_id: winner.id,
        rejected_ids,
        new_priority: Some(rotation.rank),
        repaired_teams: repaired,
        already_resolved: false,
    })
}

async fn resolve_waiver_in<C: ConnectionTrait + Send + Sync>(
    txn: &C,
    waiver_id: i64,
    now: OffsetDateTime,
) -> Result<ResolutionOutcome, ResolutionError> {
    let subject = Subject::Waiver(waiver_id);
    let waiver = waivers::require_waiver(txn, waiver_id).await?;

    let pending = waivers::find_pending_claims(txn, waiver_id).await?;
    if pending.is_empty() {
        if waiver.status == WaiverStatus::Claimed {
            if let Some(outcome) = recorded_claim_outcome(txn, waiver_id).await? {
                debug!(waiver_id, "Waiver already resolved; nothing to write");
                return Ok(outcome);
            }
        }
        return Err(ResolutionError::EmptyGroup(subject));
    }

    let claims: Vec<_> = pending.iter().map(waivers::WaiverClaim::claim).collect();
    let (winner, mut repaired) = select_with_repair(txn, subject, now, |queue| {
        select_claim_winner(&claims, queue).cloned()
    })
    .await?;

    if !waivers::claim_if_open(txn, waiver_id, winner.team_id, now).await? {
        return Err(ResolutionError::ConcurrentResolutionConflict(subject));
    }
    // The player must still be unlisted and with the waiving team.
    let moved =
        players::transfer_if_waived(txn, waiver.player_id, waiver.from_team_id, winner.team_id, now)
            .await?;
    if !moved {
        warn!(waiver_id, player_id = waiver.player_id, "Waived player moved before resolution");
        return Err(ResolutionError::ConcurrentResolutionConflict(subject));
    }
    if !waivers::settle_claim(txn, winner.id, ClaimStatus::Claimed, now).await? {
        return Err(ResolutionError::ConcurrentResolutionConflict(subject));
    }
    let rejected_ids = waivers::reject_all_pending_claims(txn, waiver_id, now).await?;

    let rotation = priority::rotate_to_back(txn, winner.team_id, now).await?;
    if rotation.inserted {
        repaired.push(winner.team_id);
    }

    info!(
        waiver_id,
        player_id = waiver.player_id,
        winner_team_id = winner.team_id,
        claim_id = winner.id,
        rejected = rejected_ids.len(),
        new_priority = rotation.rank,
        "Resolved waiver"
    );

    Ok(ResolutionOutcome {
        subject,
        winner_team_id: winner.team_id,
        winning_id: winner.id,
        rejected_ids,
        new_priority: Some(rotation.rank),
        repaired_teams: repaired,
        already_resolved: false,
    })
}

/// Run selection, appending any team it reports without a rank and retrying.
///
/// A team is repaired at most once; a second report for the same team means
/// the repair did not stick and is surfaced as `NoPriorityRecord`.
async fn select_with_repair<C, T, F>(
    txn: &C,
    subject: Subject,
    now: OffsetDateTime,
    select: F,
) -> Result<(T, Vec<i64>), ResolutionError>
where
    C: ConnectionTrait + Send + Sync,
    F: Fn(&PriorityQueue) -> Result<T, SelectionError>,
{
    let mut repaired = Vec::new();
    loop {
        let queue = priority::load_queue(txn).await?;
        match select(&queue) {
            Ok(winner) => return Ok((winner, repaired)),
            Err(SelectionError::EmptyGroup) => return Err(ResolutionError::EmptyGroup(subject)),
            Err(SelectionError::NoPriorityRecord { team_id }) => {
                if repaired.contains(&team_id) {
                    return Err(ResolutionError::NoPriorityRecord { team_id });
                }
                priority::repair_missing(txn, team_id, now).await?;
                repaired.push(team_id);
            }
        }
    }
}

async fn recorded_bid_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<ResolutionOutcome>, ResolutionError> {
    let approved = bids::find_latest_approved(conn, player_id).await?;
    Ok(approved.map(|bid| {
        ResolutionOutcome::replay(Subject::PlayerBids(player_id), bid.team_id, bid.id)
    }))
}

async fn recorded_claim_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Option<ResolutionOutcome>, ResolutionError> {
    let claimed = waivers::find_claimed_claim(conn, waiver_id).await?;
    Ok(claimed.map(|claim| {
        ResolutionOutcome::replay(Subject::Waiver(waiver_id), claim.team_id, claim.id)
    }))
}
