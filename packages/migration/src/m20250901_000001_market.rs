use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
    Name,
    TeamId,
    OnMarket,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Bids {
    Table,
    Id,
    PlayerId,
    TeamId,
    Amount,
    Status,
    ExpiresAt,
    CreatedAt,
    ResolvedAt,
}

#[derive(DeriveIden)]
enum Waivers {
    Table,
    Id,
    PlayerId,
    FromTeamId,
    Status,
    ClaimedBy,
    ExpiresAt,
    CreatedAt,
    ResolvedAt,
}

#[derive(DeriveIden)]
enum WaiverClaims {
    Table,
    Id,
    WaiverId,
    TeamId,
    Amount,
    Status,
    CreatedAt,
    ResolvedAt,
}

#[derive(DeriveIden)]
enum TeamPriorities {
    Table,
    Id,
    TeamId,
    Priority,
    LastUsedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Standings {
    Table,
    Id,
    TeamId,
    Points,
    Wins,
    Losses,
    UpdatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // teams
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(id_col(Teams::Id))
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(
                        ColumnDef::new(Teams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(id_col(Players::Id))
                    .col(ColumnDef::new(Players::Name).string().not_null())
                    .col(ColumnDef::new(Players::TeamId).big_integer().null())
                    .col(
                        ColumnDef::new(Players::OnMarket)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_team_id")
                            .from(Players::Table, Players::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // bids
        manager
            .create_table(
                Table::create()
                    .table(Bids::Table)
                    .if_not_exists()
                    .col(id_col(Bids::Id))
                    .col(ColumnDef::new(Bids::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(Bids::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(Bids::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bids::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Bids::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bids::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bids::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .check(Expr::col(Bids::Amount).gt(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bids_player_id")
                            .from(Bids::Table, Bids::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bids_team_id")
                            .from(Bids::Table, Bids::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bids_player_status")
                    .table(Bids::Table)
                    .col(Bids::PlayerId)
                    .col(Bids::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bids_status_expires")
                    .table(Bids::Table)
                    .col(Bids::Status)
                    .col(Bids::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        // waivers
        manager
            .create_table(
                Table::create()
                    .table(Waivers::Table)
                    .if_not_exists()
                    .col(id_col(Waivers::Id))
                    .col(ColumnDef::new(Waivers::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(Waivers::FromTeamId).big_integer().null())
                    .col(
                        ColumnDef::new(Waivers::Status)
                            .string_len(16)
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(Waivers::ClaimedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Waivers::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Waivers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Waivers::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waivers_player_id")
                            .from(Waivers::Table, Waivers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waivers_from_team_id")
                            .from(Waivers::Table, Waivers::FromTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waivers_claimed_by")
                            .from(Waivers::Table, Waivers::ClaimedBy)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_waivers_status_expires")
                    .table(Waivers::Table)
                    .col(Waivers::Status)
                    .col(Waivers::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        // waiver_claims
        manager
            .create_table(
                Table::create()
                    .table(WaiverClaims::Table)
                    .if_not_exists()
                    .col(id_col(WaiverClaims::Id))
                    .col(
                        ColumnDef::new(WaiverClaims::WaiverId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaiverClaims::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(WaiverClaims::Amount).big_integer().null())
                    .col(
                        ColumnDef::new(WaiverClaims::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(WaiverClaims::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaiverClaims::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waiver_claims_waiver_id")
                            .from(WaiverClaims::Table, WaiverClaims::WaiverId)
                            .to(Waivers::Table, Waivers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waiver_claims_team_id")
                            .from(WaiverClaims::Table, WaiverClaims::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One claim per team per waiver
        manager
            .create_index(
                Index::create()
                    .name("ux_waiver_claims_waiver_team")
                    .table(WaiverClaims::Table)
                    .col(WaiverClaims::WaiverId)
                    .col(WaiverClaims::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // team_priorities
        manager
            .create_table(
                Table::create()
                    .table(TeamPriorities::Table)
                    .if_not_exists()
                    .col(id_col(TeamPriorities::Id))
                    .col(
                        ColumnDef::new(TeamPriorities::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeamPriorities::Priority).integer().not_null())
                    .col(
                        ColumnDef::new(TeamPriorities::LastUsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TeamPriorities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_priorities_team_id")
                            .from(TeamPriorities::Table, TeamPriorities::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Exactly one priority row per team
        manager
            .create_index(
                Index::create()
                    .name("ux_team_priorities_team_id")
                    .table(TeamPriorities::Table)
                    .col(TeamPriorities::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // standings
        manager
            .create_table(
                Table::create()
                    .table(Standings::Table)
                    .if_not_exists()
                    .col(id_col(Standings::Id))
                    .col(ColumnDef::new(Standings::TeamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Standings::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::Wins)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::Losses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_standings_team_id")
                            .from(Standings::Table, Standings::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_standings_team_id")
                    .table(Standings::Table)
                    .col(Standings::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(Standings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamPriorities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WaiverClaims::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Waivers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bids::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        Ok(())
    }
}
