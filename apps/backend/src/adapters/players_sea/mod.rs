//! SeaORM adapter for the players table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QuerySelect,
    Set,
};
use time::OffsetDateTime;

use crate::entities::players;

/// DTO for creating a player.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub name: String,
    pub team_id: Option<i64>,
    pub on_market: bool,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

/// Read a player holding its row lock until the transaction ends.
///
/// Serializes market writes for one player on Postgres; SQLite ignores the
/// lock clause and relies on its single writer.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id)
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let player = players::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        team_id: Set(dto.team_id),
        on_market: Set(dto.on_market),
        created_at: Set(now),
        updated_at: Set(now),
    };

    player.insert(conn).await
}

pub async fn set_on_market<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    on_market: bool,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(players::Column::OnMarket, Expr::value(on_market))
        .col_expr(players::Column::UpdatedAt, Expr::value(now))
        .filter(players::Column::Id.eq(player_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Hand a listed player to `team_id` and take them off the market.
///
/// Guarded on `on_market = true`; 0 rows means someone else got there first.
pub async fn transfer_if_listed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(players::Column::TeamId, Expr::value(Some(team_id)))
        .col_expr(players::Column::OnMarket, Expr::value(false))
        .col_expr(players::Column::UpdatedAt, Expr::value(now))
        .filter(players::Column::Id.eq(player_id))
        .filter(players::Column::OnMarket.eq(true))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Hand a waived player to `team_id`.
///
/// Guarded on the player being unlisted and still owned by the waiving team;
/// 0 rows means the player moved since the waiver opened.
pub async fn transfer_if_waived<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    from_team_id: Option<i64>,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let owner = match from_team_id {
        Some(from) => players::Column::TeamId.eq(from),
        None => players::Column::TeamId.is_null(),
    };
    let result = players::Entity::update_many()
        .col_expr(players::Column::TeamId, Expr::value(Some(team_id)))
        .col_expr(players::Column::UpdatedAt, Expr::value(now))
        .filter(players::Column::Id.eq(player_id))
        .filter(players::Column::OnMarket.eq(false))
        .filter(owner)
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
