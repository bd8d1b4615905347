use crate::domain::{VoteDirection, VoteResult, VoterId};
use crate::infrastructure::db::{db_error, KhatiraRepository, PhaseRepository, VoteRepository};
use khatira_errors::AppError;
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

pub struct CastVote {
    db: DatabaseConnection,
}

impl CastVote {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a permanent vote and returns the entry's new tallies.
    ///
    /// The phase check, duplicate check, vote insert and counter increment share one
    /// transaction. The (entry, voter) primary key turns a concurrent twin into a
    /// constraint violation, which is reported as [`AppError::AlreadyVoted`].
    pub async fn execute(
        &self,
        khatira_id: i32,
        voter: VoterId,
        direction: VoteDirection,
    ) -> Result<VoteResult, AppError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let phase = PhaseRepository::current_on(&txn).await.map_err(db_error)?;
        if let Err(e) = phase.ensure_accepts_votes() {
            tracing::warn!("Rejected vote on {} during phase {}", khatira_id, phase);
            return Err(e);
        }

        if KhatiraRepository::find_on(&txn, khatira_id)
            .await
            .map_err(db_error)?
            .is_none()
        {
            return Err(AppError::NotFound);
        }

        if VoteRepository::exists_on(&txn, khatira_id, voter)
            .await
            .map_err(db_error)?
        {
            return Err(AppError::AlreadyVoted);
        }

        VoteRepository::insert_on(&txn, khatira_id, voter, direction)
            .await
            .map_err(duplicate_as_already_voted)?;
        KhatiraRepository::increment_on(&txn, khatira_id, direction)
            .await
            .map_err(db_error)?;

        let updated = KhatiraRepository::find_on(&txn, khatira_id)
            .await
            .map_err(db_error)?
            .ok_or(AppError::NotFound)?;
        txn.commit().await.map_err(duplicate_as_already_voted)?;

        tracing::info!("Vote {} recorded on khatira {}", direction, khatira_id);
        Ok(VoteResult::new(
            khatira_id,
            direction,
            updated.upvotes,
            updated.downvotes,
        ))
    }
}

fn duplicate_as_already_voted(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyVoted,
        _ => db_error(err),
    }
}
