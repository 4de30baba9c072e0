//! Team priority repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::priorities_sea as priorities_adapter;
use crate::domain::PriorityQueue;
use crate::entities::team_priorities;
use crate::errors::domain::DomainError;

/// Priority domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Priority {
    pub team_id: i64,
    pub priority: i32,
    pub last_used_at: Option<OffsetDateTime>,
    pub updated_at: OffsetDateTime,
}

/// Read the full queue under row locks.
pub async fn lock_queue<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<PriorityQueue, DomainError> {
    let rows = priorities_adapter::find_all_for_update(conn).await?;
    Ok(PriorityQueue::new(rows.into_iter().map(|r| (r.team_id, r.priority))))
}

/// Rows ordered by rank, then team id.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Priority>, DomainError> {
    let rows = priorities_adapter::find_all(conn).await?;
    Ok(rows.into_iter().map(Priority::from).collect())
}

pub async fn find_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<Priority>, DomainError> {
    let row = priorities_adapter::find_by_team(conn, team_id).await?;
    Ok(row.map(Priority::from))
}

pub async fn count_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<u64, DomainError> {
    Ok(priorities_adapter::count_by_team(conn, team_id).await?)
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    priority: i32,
    last_used_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Result<Priority, DomainError> {
    let row = priorities_adapter::insert(conn, team_id, priority, last_used_at, now).await?;
    Ok(Priority::from(row))
}

/// Returns false when the team has no row.
pub async fn set_priority<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    priority: i32,
    last_used_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let rows = priorities_adapter::set_priority(conn, team_id, priority, last_used_at, now).await?;
    Ok(rows == 1)
}

pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    priority: i32,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    Ok(priorities_adapter::upsert_priority(conn, team_id, priority, now).await?)
}

impl From<team_priorities::Model> for Priority {
    fn from(model: team_priorities::Model) -> Self {
        Self {
            team_id: model.team_id,
            priority: model.priority,
            last_used_at: model.last_used_at,
            updated_at: model.updated_at,
        }
    }
}
