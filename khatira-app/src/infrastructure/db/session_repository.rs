use super::entities::{session, Session};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, SqlErr};

/// Opaque session payloads keyed by session id.
#[derive(Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The stored payload, unless it has expired.
    pub async fn load(&self, id: &str) -> Result<Option<String>, DbErr> {
        let row = Session::find_by_id(id.to_owned())
            .filter(session::Column::ExpiresAt.gt(now()))
            .one(&self.db)
            .await?;
        Ok(row.map(|row| row.data))
    }

    /// Inserts a fresh session. Returns false when the id is already taken.
    pub async fn create(&self, id: &str, data: String, expires_at: i64) -> Result<bool, DbErr> {
        let result = Session::insert(active(id, data, expires_at))
            .exec_without_returning(&self.db)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn save(&self, id: &str, data: String, expires_at: i64) -> Result<(), DbErr> {
        Session::insert(active(id, data, expires_at))
            .on_conflict(
                OnConflict::column(session::Column::Id)
                    .update_columns([session::Column::Data, session::Column::ExpiresAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), DbErr> {
        Session::delete_by_id(id.to_owned()).exec(&self.db).await?;
        Ok(())
    }

    /// Drops every expired session and returns how many went.
    pub async fn delete_expired(&self) -> Result<u64, DbErr> {
        let result = Session::delete_many()
            .filter(session::Column::ExpiresAt.lte(now()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

fn active(id: &str, data: String, expires_at: i64) -> session::ActiveModel {
    session::ActiveModel {
        id: Set(id.to_owned()),
        data: Set(data),
        expires_at: Set(expires_at),
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
