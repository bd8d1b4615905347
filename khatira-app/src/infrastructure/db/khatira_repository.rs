use super::entities::{khatira, vote, Khatira, Vote};
use crate::domain::{NewKhatira, VoteDirection};
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::*, query::*, ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait,
};

#[derive(Clone)]
pub struct KhatiraRepository {
    db: DatabaseConnection,
}

impl KhatiraRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert_on<C: ConnectionTrait>(
        conn: &C,
        new: &NewKhatira,
    ) -> Result<khatira::Model, DbErr> {
        let active = khatira::ActiveModel {
            author: Set(new.author.clone()),
            content: Set(new.content.clone()),
            upvotes: Set(0),
            downvotes: Set(0),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        active.insert(conn).await
    }

    pub async fn find_on<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Option<khatira::Model>, DbErr> {
        Khatira::find_by_id(id).one(conn).await
    }

    /// Every entry in creation order.
    pub async fn all(&self) -> Result<Vec<khatira::Model>, DbErr> {
        Khatira::find()
            .order_by_asc(khatira::Column::Id)
            .all(&self.db)
            .await
    }

    /// Bumps one counter in SQL so concurrent votes on the same entry never lose an update.
    pub async fn increment_on<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        direction: VoteDirection,
    ) -> Result<(), DbErr> {
        let column = match direction {
            VoteDirection::Up => khatira::Column::Upvotes,
            VoteDirection::Down => khatira::Column::Downvotes,
        };
        let result = Khatira::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(khatira::Column::Id.eq(id))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("khatira {} not found", id)));
        }
        Ok(())
    }

    /// Removes one entry and its votes. Returns false when the entry did not exist.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        Vote::delete_many()
            .filter(vote::Column::KhatiraId.eq(id))
            .exec(&txn)
            .await?;
        let deleted = Khatira::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(deleted.rows_affected > 0)
    }

    /// Removes every vote and entry. Returns how many entries were removed.
    pub async fn clear_all(&self) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        Vote::delete_many().exec(&txn).await?;
        let deleted = Khatira::delete_many().exec(&txn).await?;

        txn.commit().await?;
        Ok(deleted.rows_affected)
    }
}
