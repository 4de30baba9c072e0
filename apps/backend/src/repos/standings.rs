//! Standings repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::standings_sea as standings_adapter;
use crate::domain::StandingRow;
use crate::entities::standings;
use crate::errors::domain::DomainError;

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<StandingRow>, DomainError> {
    let rows = standings_adapter::find_all(conn).await?;
    Ok(rows.into_iter().map(StandingRow::from).collect())
}

pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    row: StandingRow,
) -> Result<(), DomainError> {
    let dto = standings_adapter::StandingUpsert {
        team_id: row.team_id,
        points: row.points,
        wins: row.wins,
        losses: row.losses,
    };
    Ok(standings_adapter::upsert(conn, dto).await?)
}

impl From<standings::Model> for StandingRow {
    fn from(model: standings::Model) -> Self {
        Self {
            team_id: model.team_id,
            points: model.points,
            wins: model.wins,
            losses: model.losses,
        }
    }
}
