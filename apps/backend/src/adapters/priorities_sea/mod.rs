//! SeaORM adapter for the team_priorities table.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::team_priorities;

/// Every priority row ordered by rank, locked for update where supported.
///
/// Postgres serializes concurrent rotations on these row locks. SQLite has
/// no row locks; its single writer does the same job.
pub async fn find_all_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<team_priorities::Model>, sea_orm::DbErr> {
    team_priorities::Entity::find()
        .order_by(team_priorities::Column::Priority, Order::Asc)
        .order_by(team_priorities::Column::TeamId, Order::Asc)
        .lock_exclusive()
        .all(conn)
        .await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<team_priorities::Model>, sea_orm::DbErr> {
    team_priorities::Entity::find()
        .order_by(team_priorities::Column::Priority, Order::Asc)
        .order_by(team_priorities::Column::TeamId, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<team_priorities::Model>, sea_orm::DbErr> {
    team_priorities::Entity::find()
        .filter(team_priorities::Column::TeamId.eq(team_id))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    priority: i32,
    last_used_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Result<team_priorities::Model, sea_orm::DbErr> {
    let row = team_priorities::ActiveModel {
        id: NotSet,
        team_id: Set(team_id),
        priority: Set(priority),
        last_used_at: Set(last_used_at),
        updated_at: Set(now),
    };

    row.insert(conn).await
}

/// Overwrite a team's rank, optionally stamping `last_used_at`.
pub async fn set_priority<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    priority: i32,
    last_used_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let mut update = team_priorities::Entity::update_many()
        .col_expr(team_priorities::Column::Priority, Expr::value(priority))
        .col_expr(team_priorities::Column::UpdatedAt, Expr::value(now));
    if let Some(used) = last_used_at {
        update = update.col_expr(team_priorities::Column::LastUsedAt, Expr::value(Some(used)));
    }
    let result = update
        .filter(team_priorities::Column::TeamId.eq(team_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Insert or overwrite a team's rank in one statement.
pub async fn upsert_priority<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    priority: i32,
    now: OffsetDateTime,
) -> Result<(), sea_orm::DbErr> {
    let row = team_priorities::ActiveModel {
        id: NotSet,
        team_id: Set(team_id),
        priority: Set(priority),
        last_used_at: Set(None),
        updated_at: Set(now),
    };

    team_priorities::Entity::insert(row)
        .on_conflict(
            OnConflict::column(team_priorities::Column::TeamId)
                .update_columns([
                    team_priorities::Column::Priority,
                    team_priorities::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn count_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    team_priorities::Entity::find()
        .filter(team_priorities::Column::TeamId.eq(team_id))
        .count(conn)
        .await
}
