use super::entities::{phase, EventPhase};
use crate::domain::Phase;
use sea_orm::{entity::*, ConnectionTrait, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct PhaseRepository {
    db: DatabaseConnection,
}

impl PhaseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn current(&self) -> Result<Phase, DbErr> {
        Self::current_on(&self.db).await
    }

    /// Reads the phase on `conn`, which may be an open transaction.
    /// A missing row means the event has not moved past submission.
    pub async fn current_on<C: ConnectionTrait>(conn: &C) -> Result<Phase, DbErr> {
        match EventPhase::find_by_id(phase::SINGLETON_ID).one(conn).await? {
            Some(row) => Phase::try_from(row.current_phase).map_err(|_| {
                DbErr::Custom(format!("stored phase {} is out of range", row.current_phase))
            }),
            None => Ok(Phase::default()),
        }
    }

    pub async fn set(&self, new_phase: Phase) -> Result<(), DbErr> {
        let now = chrono::Utc::now();
        match EventPhase::find_by_id(phase::SINGLETON_ID).one(&self.db).await? {
            Some(existing) => {
                let mut active: phase::ActiveModel = existing.into();
                active.current_phase = Set(new_phase.as_i32());
                active.updated_at = Set(now);
                active.update(&self.db).await?;
            }
            None => {
                Self::insert(&self.db, new_phase).await?;
            }
        }
        Ok(())
    }

    pub(crate) async fn seed(&self) -> Result<(), DbErr> {
        if EventPhase::find_by_id(phase::SINGLETON_ID)
            .one(&self.db)
            .await?
            .is_none()
        {
            Self::insert(&self.db, Phase::default()).await?;
        }
        Ok(())
    }

    async fn insert<C: ConnectionTrait>(conn: &C, value: Phase) -> Result<phase::Model, DbErr> {
        let active = phase::ActiveModel {
            id: Set(phase::SINGLETON_ID),
            current_phase: Set(value.as_i32()),
            updated_at: Set(chrono::Utc::now()),
        };
        active.insert(conn).await
    }
}
