//! Player repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::players_sea as players_adapter;
use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub team_id: Option<i64>,
    pub on_market: bool,
    pub updated_at: OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    find_by_id(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} not found"),
        )
    })
}

/// Like [`require_player`], locking the row for the rest of the transaction.
pub async fn lock_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    let player = players_adapter::find_by_id_for_update(conn, player_id).await?;
    player.map(Player::from).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} not found"),
        )
    })
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    team_id: Option<i64>,
    on_market: bool,
) -> Result<Player, DomainError> {
    let dto = players_adapter::PlayerCreate {
        name: name.to_string(),
        team_id,
        on_market,
    };
    let player = players_adapter::create_player(conn, dto).await?;
    Ok(Player::from(player))
}

pub async fn set_on_market<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    on_market: bool,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let rows = players_adapter::set_on_market(conn, player_id, on_market, now).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} not found"),
        ));
    }
    Ok(())
}

/// Returns false when the player was no longer listed.
pub async fn transfer_if_listed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let rows = players_adapter::transfer_if_listed(conn, player_id, team_id, now).await?;
    Ok(rows == 1)
}

/// Returns false when the player is listed or no longer belongs to
/// `from_team_id`.
pub async fn transfer_if_waived<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    from_team_id: Option<i64>,
    team_id: i64,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let rows =
        players_adapter::transfer_if_waived(conn, player_id, from_team_id, team_id, now).await?;
    Ok(rows == 1)
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            team_id: model.team_id,
            on_market: model.on_market,
            updated_at: model.updated_at,
        }
    }
}
