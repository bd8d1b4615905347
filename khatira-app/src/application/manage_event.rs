use crate::domain::Phase;
use crate::infrastructure::db::{db_error, KhatiraRepository, PhaseRepository};
use khatira_errors::AppError;

/// Admin-side control of the event: phase changes and destructive clean-up.
pub struct ManageEvent {
    khawatir: KhatiraRepository,
    phases: PhaseRepository,
}

impl ManageEvent {
    pub fn new(khawatir: KhatiraRepository, phases: PhaseRepository) -> Self {
        Self { khawatir, phases }
    }

    pub async fn current_phase(&self) -> Result<Phase, AppError> {
        self.phases.current().await.map_err(db_error)
    }

    /// Any phase may follow any other, including going backwards.
    pub async fn set_phase(&self, phase: Phase) -> Result<Phase, AppError> {
        let previous = self.current_phase().await?;
        self.phases.set(phase).await.map_err(db_error)?;
        tracing::info!("Phase changed from {} to {}", previous, phase);
        Ok(phase)
    }

    pub async fn delete_khatira(&self, id: i32) -> Result<(), AppError> {
        if !self.khawatir.delete(id).await.map_err(db_error)? {
            return Err(AppError::NotFound);
        }
        tracing::info!("Khatira {} deleted by admin", id);
        Ok(())
    }

    pub async fn clear_all(&self) -> Result<u64, AppError> {
        let deleted = self.khawatir.clear_all().await.map_err(db_error)?;
        tracing::info!("All khawatir cleared by admin ({} removed)", deleted);
        Ok(deleted)
    }
}
