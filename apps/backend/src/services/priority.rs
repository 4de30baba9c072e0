//! Waiver-priority queue maintenance.
//!
//! Every function here reads ranks inside the caller's transaction through
//! [`priorities::lock_queue`]; nothing is cached between calls.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::db::txn::with_txn;
use crate::domain::{ranks_from_standings, PriorityQueue};
use crate::errors::domain::DomainError;
use crate::repos::priorities::{self, Priority};
use crate::repos::standings;

/// Result of moving a team to the back of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub team_id: i64,
    pub rank: i32,
    /// The team had no row and one was created.
    pub inserted: bool,
}

/// Locked snapshot of the queue for selection.
pub async fn load_queue<C: ConnectionTrait + Send + Sync>(
    txn: &C,
) -> Result<PriorityQueue, DomainError> {
    priorities::lock_queue(txn).await
}

/// Give a team without a row a rank at the back of the queue.
///
/// Returns the team's rank, existing or new. Never creates a second row.
pub async fn repair_missing<C: ConnectionTrait + Send + Sync>(
    txn: &C,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<i32, DomainError> {
    let queue = priorities::lock_queue(txn).await?;
    if let Some(rank) = queue.rank_of(team_id) {
        return Ok(rank);
    }

    let rank = queue.back_rank();
    priorities::insert(txn, team_id, rank, None, now).await?;
    warn!(team_id, rank, "Team had no priority record; appended to the back of the queue");
    Ok(rank)
}

/// Move the winner of a resolution behind every other team.
pub async fn rotate_to_back<C: ConnectionTrait + Send + Sync>(
    txn: &C,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<Rotation, DomainError> {
    let mut queue = priorities::lock_queue(txn).await?;
    let existed = queue.contains(team_id);
    let rank = queue.rotate_to_back(team_id);

    if existed {
        let updated = priorities::set_priority(txn, team_id, rank, Some(now), now).await?;
        if !updated {
            return Err(DomainError::data_corruption(format!(
                "Priority row for team {team_id} vanished during rotation"
            )));
        }
    } else {
        priorities::insert(txn, team_id, rank, Some(now), now).await?;
        warn!(team_id, rank, "Winning team had no priority record; inserted at the back");
    }

    info!(team_id, rank, "Rotated team to the back of the priority queue");
    Ok(Rotation {
        team_id,
        rank,
        inserted: !existed,
    })
}

/// Rebuild every rank from standings in one transaction and return the new
/// queue.
pub async fn reset_from_standings(
    conn: &DatabaseConnection,
    now: OffsetDateTime,
) -> Result<Vec<Priority>, DomainError> {
    with_txn(conn, |txn| {
        Box::pin(async move {
            let current = priorities::lock_queue(txn).await?;
            let table = standings::find_all(txn).await?;
            let ranks = ranks_from_standings(&table, &current);

            for (team_id, rank) in &ranks {
                priorities::upsert(txn, *team_id, *rank, now).await?;
            }

            info!(
                teams = ranks.len(),
                ranked_from_standings = table.len(),
                "Rebuilt priority queue from standings"
            );
            priorities::list(txn).await
        })
    })
    .await
}

/// Current queue, best rank first.
pub async fn list_queue<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Priority>, DomainError> {
    priorities::list(conn).await
}
