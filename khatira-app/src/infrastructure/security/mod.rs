mod admin_password;
mod input_sanitizer;
mod rate_limiter;

pub use admin_password::AdminPassword;
pub use input_sanitizer::{InputSanitizer, DEFAULT_MAX_AUTHOR_CHARS, DEFAULT_MAX_CONTENT_CHARS};
pub use rate_limiter::{
    RateLimitError, RateLimiter, DEFAULT_REQUESTS_PER_HOUR, DEFAULT_REQUESTS_PER_MINUTE,
};
