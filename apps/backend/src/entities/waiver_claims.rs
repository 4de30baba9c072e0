use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ClaimStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "claimed")]
    Claimed,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "waiver_claims")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "waiver_id")]
    pub waiver_id: i64,
    #[sea_orm(column_name = "team_id")]
    pub team_id: i64,
    /// Carried over from the claim form; resolution never reads it.
    pub amount: Option<i64>,
    pub status: ClaimStatus,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "resolved_at")]
    pub resolved_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::waivers::Entity",
        from = "Column::WaiverId",
        to = "super::waivers::Column::Id"
    )]
    Waiver,
}

impl Related<super::waivers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Waiver.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
