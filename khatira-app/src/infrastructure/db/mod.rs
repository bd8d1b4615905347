pub mod entities;
mod khatira_repository;
mod phase_repository;
mod session_repository;
mod vote_repository;

pub use khatira_repository::KhatiraRepository;
pub use phase_repository::PhaseRepository;
pub use session_repository::SessionRepository;
pub use vote_repository::VoteRepository;

use entities::{EventPhase, Khatira, Session, Vote};
use khatira_errors::AppError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;

pub async fn create_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Creates missing tables from the entity definitions and seeds the phase row.
/// Sessions share the database so voter ids survive restarts.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Votes reference khawatir, so order matters.
    let statements = [
        schema.create_table_from_entity(Khatira),
        schema.create_table_from_entity(Vote),
        schema.create_table_from_entity(EventPhase),
        schema.create_table_from_entity(Session),
    ];
    for mut statement in statements {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }

    PhaseRepository::new(db.clone()).seed().await
}

pub(crate) fn db_error(err: DbErr) -> AppError {
    AppError::Database(err.to_string())
}
