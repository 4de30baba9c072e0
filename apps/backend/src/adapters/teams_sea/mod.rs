//! SeaORM adapter for the teams table.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, Set};

use crate::entities::teams;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

pub async fn create_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<teams::Model, sea_orm::DbErr> {
    let team = teams::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    team.insert(conn).await
}
