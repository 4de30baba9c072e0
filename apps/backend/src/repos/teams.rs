//! Team repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::teams_sea as teams_adapter;
use crate::entities::teams;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<Team>, DomainError> {
    let team = teams_adapter::find_by_id(conn, team_id).await?;
    Ok(team.map(Team::from))
}

pub async fn require_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Team, DomainError> {
    find_by_id(conn, team_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
    })
}

pub async fn create_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Team, DomainError> {
    let team = teams_adapter::create_team(conn, name).await?;
    Ok(Team::from(team))
}

impl From<teams::Model> for Team {
    fn from(model: teams::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
