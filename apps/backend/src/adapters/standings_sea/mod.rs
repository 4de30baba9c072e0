//! SeaORM adapter for the standings table.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait, NotSet, Order, QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::standings;

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<standings::Model>, sea_orm::DbErr> {
    standings::Entity::find()
        .order_by(standings::Column::TeamId, Order::Asc)
        .all(conn)
        .await
}

/// DTO for recording a team's standing.
#[derive(Debug, Clone, Copy)]
pub struct StandingUpsert {
    pub team_id: i64,
    pub points: i32,
    pub wins: i32,
    pub losses: i32,
}

pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StandingUpsert,
) -> Result<(), sea_orm::DbErr> {
    let row = standings::ActiveModel {
        id: NotSet,
        team_id: Set(dto.team_id),
        points: Set(dto.points),
        wins: Set(dto.wins),
        losses: Set(dto.losses),
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    standings::Entity::insert(row)
        .on_conflict(
            OnConflict::column(standings::Column::TeamId)
                .update_columns([
                    standings::Column::Points,
                    standings::Column::Wins,
                    standings::Column::Losses,
                    standings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
