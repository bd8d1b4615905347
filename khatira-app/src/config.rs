use crate::infrastructure::security::{
    DEFAULT_MAX_AUTHOR_CHARS, DEFAULT_MAX_CONTENT_CHARS, DEFAULT_REQUESTS_PER_HOUR,
    DEFAULT_REQUESTS_PER_MINUTE,
};
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "sqlite://khatira.db?mode=rwc";
const DEFAULT_VOTER_SESSION_DAYS: i64 = 30;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub admin_password: String,
    /// Origins allowed to call the API with credentials. Empty disables CORS.
    pub allowed_origins: Vec<String>,
    /// Marks cookies `Secure` and `SameSite=None` so a front end on another site can send them.
    pub secure_cookies: bool,
    /// Take the client address from `X-Forwarded-For`. Only safe behind a proxy that sets it.
    pub trust_proxy: bool,
    pub voter_session_days: i64,
    pub rate_limit_per_minute: u32,
    pub rate_limit_per_hour: u32,
    pub max_author_chars: usize,
    pub max_content_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_password = lookup("ADMIN_PASSWORD")
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::Missing("ADMIN_PASSWORD"))?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", default_bind_addr())?,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| {
                tracing::info!("DATABASE_URL not set, using default: {}", DEFAULT_DATABASE_URL);
                DEFAULT_DATABASE_URL.to_string()
            }),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            admin_password,
            allowed_origins,
            secure_cookies: parse_or(&lookup, "SECURE_COOKIES", false)?,
            trust_proxy: parse_or(&lookup, "TRUST_PROXY", false)?,
            voter_session_days: parse_or(&lookup, "VOTER_SESSION_DAYS", DEFAULT_VOTER_SESSION_DAYS)?,
            rate_limit_per_minute: parse_or(&lookup, "RATE_LIMIT_PER_MINUTE", DEFAULT_REQUESTS_PER_MINUTE)?,
            rate_limit_per_hour: parse_or(&lookup, "RATE_LIMIT_PER_HOUR", DEFAULT_REQUESTS_PER_HOUR)?,
            max_author_chars: parse_or(&lookup, "MAX_AUTHOR_CHARS", DEFAULT_MAX_AUTHOR_CHARS)?,
            max_content_chars: parse_or(&lookup, "MAX_CONTENT_CHARS", DEFAULT_MAX_CONTENT_CHARS)?,
        })
    }
}

impl Default for Config {
    /// Local defaults with no admin password, so the dashboard stays locked.
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            admin_password: String::new(),
            allowed_origins: Vec::new(),
            secure_cookies: false,
            trust_proxy: false,
            voter_session_days: DEFAULT_VOTER_SESSION_DAYS,
            rate_limit_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            rate_limit_per_hour: DEFAULT_REQUESTS_PER_HOUR,
            max_author_chars: DEFAULT_MAX_AUTHOR_CHARS,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("db_max_connections", &self.db_max_connections)
            .field("allowed_origins", &self.allowed_origins)
            .field("secure_cookies", &self.secure_cookies)
            .field("trust_proxy", &self.trust_proxy)
            .field("voter_session_days", &self.voter_session_days)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("rate_limit_per_hour", &self.rate_limit_per_hour)
            .finish_non_exhaustive()
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
