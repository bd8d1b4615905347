use crate::session_store::DbSessionStore;
use khatira_app::domain::VoterId;
use khatira_app::Config;
use khatira_errors::AppError;
use tower_sessions::cookie::{time::Duration, SameSite};
use tower_sessions::{Expiry, Session, SessionManagerLayer};

pub const SESSION_COOKIE: &str = "khatira_session";
const VOTER_KEY: &str = "voter_id";
const ADMIN_KEY: &str = "admin";

pub fn session_layer(config: &Config, store: DbSessionStore) -> SessionManagerLayer<DbSessionStore> {
    // Cross-site front ends only receive the cookie with SameSite=None, which requires Secure.
    let same_site = if config.secure_cookies {
        SameSite::None
    } else {
        SameSite::Lax
    };

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_secure(config.secure_cookies)
        .with_same_site(same_site)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(
            config.voter_session_days,
        )))
}

/// The voter identity already held by this session, if any. Never creates a session.
pub async fn existing_voter_id(session: &Session) -> Result<Option<VoterId>, AppError> {
    session.get::<VoterId>(VOTER_KEY).await.map_err(session_error)
}

/// The visitor's voter identity, issued on first use.
pub async fn voter_id(session: &Session) -> Result<VoterId, AppError> {
    if let Some(id) = existing_voter_id(session).await? {
        return Ok(id);
    }

    let id = VoterId::generate();
    session.insert(VOTER_KEY, id).await.map_err(session_error)?;
    tracing::debug!("Issued voter id {}", id);
    Ok(id)
}

pub async fn require_admin(session: &Session) -> Result<(), AppError> {
    let is_admin = session
        .get::<bool>(ADMIN_KEY)
        .await
        .map_err(session_error)?
        .unwrap_or(false);

    if is_admin {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

pub async fn grant_admin(session: &Session) -> Result<(), AppError> {
    // New id on privilege change; stored data such as the voter id carries over.
    session.cycle_id().await.map_err(session_error)?;
    session.insert(ADMIN_KEY, true).await.map_err(session_error)
}

pub async fn revoke_admin(session: &Session) -> Result<(), AppError> {
    session
        .remove::<bool>(ADMIN_KEY)
        .await
        .map(|_| ())
        .map_err(session_error)
}

fn session_error(err: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session store: {}", err))
}
