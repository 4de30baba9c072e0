//! SeaORM adapter for the bids table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::bids::{self, BidStatus};

pub mod dto;

pub use dto::BidCreate;

/// Pending bids for a player, oldest first.
pub async fn find_pending_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<bids::Model>, sea_orm::DbErr> {
    bids::Entity::find()
        .filter(bids::Column::PlayerId.eq(player_id))
        .filter(bids::Column::Status.eq(BidStatus::Pending))
        .order_by(bids::Column::CreatedAt, Order::Asc)
        .order_by(bids::Column::Id, Order::Asc)
        .all(conn)
        .await
}

/// Most recent approved bid for a player.
pub async fn find_latest_approved<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<bids::Model>, sea_orm::DbErr> {
    bids::Entity::find()
        .filter(bids::Column::PlayerId.eq(player_id))
        .filter(bids::Column::Status.eq(BidStatus::Approved))
        .order_by(bids::Column::ResolvedAt, Order::Desc)
        .order_by(bids::Column::Id, Order::Desc)
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bid_id: i64,
) -> Result<Option<bids::Model>, sea_orm::DbErr> {
    bids::Entity::find_by_id(bid_id).one(conn).await
}

pub async fn create_bid<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: BidCreate,
) -> Result<bids::Model, sea_orm::DbErr> {
    let bid = bids::ActiveModel {
        id: NotSet,
        player_id: Set(dto.player_id),
        team_id: Set(dto.team_id),
        amount: Set(dto.amount),
        status: Set(BidStatus::Pending),
        expires_at: Set(dto.expires_at),
        created_at: Set(dto.created_at),
        resolved_at: Set(None),
    };

    bid.insert(conn).await
}

/// Move one bid out of `pending`. Returns affected rows (0 when it was
/// already settled).
pub async fn settle_if_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bid_id: i64,
    status: BidStatus,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = bids::Entity::update_many()
        .col_expr(bids::Column::Status, Expr::value(status))
        .col_expr(bids::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(bids::Column::Id.eq(bid_id))
        .filter(bids::Column::Status.eq(BidStatus::Pending))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Ids of every pending bid on a player.
pub async fn pending_ids_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    bids::Entity::find()
        .select_only()
        .column(bids::Column::Id)
        .filter(bids::Column::PlayerId.eq(player_id))
        .filter(bids::Column::Status.eq(BidStatus::Pending))
        .order_by(bids::Column::Id, Order::Asc)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

/// Reject every pending bid on a player.
pub async fn reject_pending_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = bids::Entity::update_many()
        .col_expr(bids::Column::Status, Expr::value(BidStatus::Rejected))
        .col_expr(bids::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(bids::Column::PlayerId.eq(player_id))
        .filter(bids::Column::Status.eq(BidStatus::Pending))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Reject a team's own pending bid on a player (supersede).
pub async fn reject_pending_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = bids::Entity::update_many()
        .col_expr(bids::Column::Status, Expr::value(BidStatus::Rejected))
        .col_expr(bids::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(bids::Column::PlayerId.eq(player_id))
        .filter(bids::Column::TeamId.eq(team_id))
        .filter(bids::Column::Status.eq(BidStatus::Pending))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Players holding at least one pending bid that expired at or before `now`.
pub async fn find_due_player_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    bids::Entity::find()
        .select_only()
        .column(bids::Column::PlayerId)
        .distinct()
        .filter(bids::Column::Status.eq(BidStatus::Pending))
        .filter(bids::Column::ExpiresAt.lte(now))
        .order_by(bids::Column::PlayerId, Order::Asc)
        .limit(limit)
        .into_tuple::<i64>()
        .all(conn)
        .await
}
