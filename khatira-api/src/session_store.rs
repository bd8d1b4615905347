use async_trait::async_trait;
use khatira_app::infrastructure::db::SessionRepository;
use std::fmt;
use std::time::Duration;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};

/// How often expired session rows are swept.
pub const EXPIRED_SWEEP_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Sessions kept in the event database, so a voter's cookie stays valid across restarts.
#[derive(Clone)]
pub struct DbSessionStore {
    sessions: SessionRepository,
}

impl DbSessionStore {
    pub fn new(sessions: SessionRepository) -> Self {
        Self { sessions }
    }
}

impl fmt::Debug for DbSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSessionStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionStore for DbSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        loop {
            let data = encode(record)?;
            let created = self
                .sessions
                .create(&record.id.to_string(), data, record.expiry_date.unix_timestamp())
                .await
                .map_err(backend)?;
            if created {
                return Ok(());
            }
            record.id = Id::default();
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.sessions
            .save(
                &record.id.to_string(),
                encode(record)?,
                record.expiry_date.unix_timestamp(),
            )
            .await
            .map_err(backend)
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let Some(data) = self
            .sessions
            .load(&session_id.to_string())
            .await
            .map_err(backend)?
        else {
            return Ok(None);
        };

        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| session_store::Error::Decode(e.to_string()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.sessions
            .delete(&session_id.to_string())
            .await
            .map_err(backend)
    }
}

#[async_trait]
impl ExpiredDeletion for DbSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let removed = self.sessions.delete_expired().await.map_err(backend)?;
        if removed > 0 {
            tracing::debug!("Removed {} expired sessions", removed);
        }
        Ok(())
    }
}

/// Sweeps expired sessions every `period` until the task is dropped.
pub async fn sweep_expired_sessions(store: DbSessionStore, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        if let Err(e) = store.delete_expired().await {
            tracing::warn!("Expired session sweep failed: {}", e);
        }
    }
}

fn encode(record: &Record) -> session_store::Result<String> {
    serde_json::to_string(record).map_err(|e| session_store::Error::Encode(e.to_string()))
}

fn backend(err: impl fmt::Display) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}
