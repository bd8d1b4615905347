use crate::application::{AdminLogin, CastVote, ListKhawatir, ManageEvent, SubmitKhatira};
use crate::config::Config;
use crate::infrastructure::db::{
    create_connection, init_schema, KhatiraRepository, PhaseRepository, SessionRepository,
    VoteRepository,
};
use crate::infrastructure::security::{AdminPassword, InputSanitizer, RateLimiter};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub submit_khatira: Arc<SubmitKhatira>,
    pub cast_vote: Arc<CastVote>,
    pub list_khawatir: Arc<ListKhawatir>,
    pub manage_event: Arc<ManageEvent>,
    pub admin_login: Arc<AdminLogin>,
    pub sessions: SessionRepository,
    pub rate_limiter: RateLimiter,
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let khawatir = KhatiraRepository::new(db.clone());
        let votes = VoteRepository::new(db.clone());
        let phases = PhaseRepository::new(db.clone());
        let sanitizer = InputSanitizer::new(config.max_author_chars, config.max_content_chars);

        Self {
            submit_khatira: Arc::new(SubmitKhatira::new(db.clone(), sanitizer)),
            cast_vote: Arc::new(CastVote::new(db.clone())),
            list_khawatir: Arc::new(ListKhawatir::new(khawatir.clone(), votes, phases.clone())),
            manage_event: Arc::new(ManageEvent::new(khawatir, phases)),
            admin_login: Arc::new(AdminLogin::new(AdminPassword::new(
                config.admin_password.clone(),
            ))),
            sessions: SessionRepository::new(db),
            rate_limiter: RateLimiter::new(config.rate_limit_per_minute, config.rate_limit_per_hour),
            config: Arc::new(config),
        }
    }

    /// Connects to the configured database and makes sure the schema exists.
    pub async fn connect(config: Config) -> Result<Self, DbErr> {
        let db = create_connection(&config.database_url, config.db_max_connections).await?;
        init_schema(&db).await?;
        tracing::info!("Database ready");
        Ok(Self::new(db, config))
    }
}
