//! SeaORM adapter for waivers and their claims.

use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::waiver_claims::{self, ClaimStatus};
use crate::entities::waivers::{self, WaiverStatus};

pub mod dto;

pub use dto::{ClaimCreate, WaiverCreate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Option<waivers::Model>, sea_orm::DbErr> {
    waivers::Entity::find_by_id(waiver_id).one(conn).await
}

pub async fn find_open_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<waivers::Model>, sea_orm::DbErr> {
    waivers::Entity::find()
        .filter(waivers::Column::PlayerId.eq(player_id))
        .filter(waivers::Column::Status.eq(WaiverStatus::Open))
        .one(conn)
        .await
}

pub async fn create_waiver<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WaiverCreate,
) -> Result<waivers::Model, sea_orm::DbErr> {
    let waiver = waivers::ActiveModel {
        id: NotSet,
        player_id: Set(dto.player_id),
        from_team_id: Set(dto.from_team_id),
        status: Set(WaiverStatus::Open),
        claimed_by: Set(None),
        expires_at: Set(dto.expires_at),
        created_at: Set(OffsetDateTime::now_utc()),
        resolved_at: Set(None),
    };

    waiver.insert(conn).await
}

/// Award an open waiver to `team_id`. 0 rows means it was no longer open.
pub async fn claim_if_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = waivers::Entity::update_many()
        .col_expr(waivers::Column::Status, Expr::value(WaiverStatus::Claimed))
        .col_expr(waivers::Column::ClaimedBy, Expr::value(Some(team_id)))
        .col_expr(waivers::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(waivers::Column::Id.eq(waiver_id))
        .filter(waivers::Column::Status.eq(WaiverStatus::Open))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Open waivers past expiry that have at least one pending claim.
pub async fn find_due_waiver_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    let with_pending_claims = Query::select()
        .column(waiver_claims::Column::WaiverId)
        .from(waiver_claims::Entity)
        .and_where(Expr::col(waiver_claims::Column::Status).eq(ClaimStatus::Pending))
        .to_owned();

    waivers::Entity::find()
        .select_only()
        .column(waivers::Column::Id)
        .filter(waivers::Column::Status.eq(WaiverStatus::Open))
        .filter(waivers::Column::ExpiresAt.lte(now))
        .filter(waivers::Column::Id.in_subquery(with_pending_claims))
        .order_by(waivers::Column::Id, Order::Asc)
        .limit(limit)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn find_pending_claims<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Vec<waiver_claims::Model>, sea_orm::DbErr> {
    waiver_claims::Entity::find()
        .filter(waiver_claims::Column::WaiverId.eq(waiver_id))
        .filter(waiver_claims::Column::Status.eq(ClaimStatus::Pending))
        .order_by(waiver_claims::Column::CreatedAt, Order::Asc)
        .order_by(waiver_claims::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_claimed_claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Option<waiver_claims::Model>, sea_orm::DbErr> {
    waiver_claims::Entity::find()
        .filter(waiver_claims::Column::WaiverId.eq(waiver_id))
        .filter(waiver_claims::Column::Status.eq(ClaimStatus::Claimed))
        .one(conn)
        .await
}

pub async fn create_claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ClaimCreate,
) -> Result<waiver_claims::Model, sea_orm::DbErr> {
    let claim = waiver_claims::ActiveModel {
        id: NotSet,
        waiver_id: Set(dto.waiver_id),
        team_id: Set(dto.team_id),
        amount: Set(dto.amount),
        status: Set(ClaimStatus::Pending),
        created_at: Set(OffsetDateTime::now_utc()),
        resolved_at: Set(None),
    };

    claim.insert(conn).await
}

/// Move one claim out of `pending`. Returns affected rows.
pub async fn settle_claim_if_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    claim_id: i64,
    status: ClaimStatus,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = waiver_claims::Entity::update_many()
        .col_expr(waiver_claims::Column::Status, Expr::value(status))
        .col_expr(waiver_claims::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(waiver_claims::Column::Id.eq(claim_id))
        .filter(waiver_claims::Column::Status.eq(ClaimStatus::Pending))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn pending_claim_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    waiver_claims::Entity::find()
        .select_only()
        .column(waiver_claims::Column::Id)
        .filter(waiver_claims::Column::WaiverId.eq(waiver_id))
        .filter(waiver_claims::Column::Status.eq(ClaimStatus::Pending))
        .order_by(waiver_claims::Column::Id, Order::Asc)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn reject_pending_claims<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    waiver_id: i64,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = waiver_claims::Entity::update_many()
        .col_expr(waiver_claims::Column::Status, Expr::value(ClaimStatus::Rejected))
        .col_expr(waiver_claims::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(waiver_claims::Column::WaiverId.eq(waiver_id))
        .filter(waiver_claims::Column::Status.eq(ClaimStatus::Pending))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
