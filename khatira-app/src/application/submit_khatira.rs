use crate::domain::Khatira;
use crate::infrastructure::db::{db_error, KhatiraRepository, PhaseRepository};
use crate::infrastructure::security::InputSanitizer;
use khatira_errors::AppError;
use sea_orm::{DatabaseConnection, TransactionTrait};

pub struct SubmitKhatira {
    db: DatabaseConnection,
    sanitizer: InputSanitizer,
}

impl SubmitKhatira {
    pub fn new(db: DatabaseConnection, sanitizer: InputSanitizer) -> Self {
        Self { db, sanitizer }
    }

    pub async fn execute(&self, name: &str, content: &str) -> Result<Khatira, AppError> {
        let new = self.sanitizer.validate_submission(name, content)?;

        // Phase is read in the same transaction as the insert.
        let txn = self.db.begin().await.map_err(db_error)?;
        let phase = PhaseRepository::current_on(&txn).await.map_err(db_error)?;
        if let Err(e) = phase.ensure_accepts_submissions() {
            tracing::warn!("Rejected submission during phase {}", phase);
            return Err(e);
        }

        let model = KhatiraRepository::insert_on(&txn, &new)
            .await
            .map_err(db_error)?;
        txn.commit().await.map_err(db_error)?;

        tracing::info!("Khatira {} submitted", model.id);
        Ok(model.into())
    }
}
