use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "khawatir")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Khatira {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            author: m.author,
            content: m.content,
            upvotes: m.upvotes,
            downvotes: m.downvotes,
            created_at: m.created_at,
        }
    }
}
