use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per (entry, voter). The composite key is what makes a vote final.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub khatira_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub voter_id: Uuid,
    /// `"up"` or `"down"`.
    pub vote_type: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::khatira::Entity",
        from = "Column::KhatiraId",
        to = "super::khatira::Column::Id",
        on_delete = "Cascade"
    )]
    Khatira,
}

impl Related<super::khatira::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Khatira.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
