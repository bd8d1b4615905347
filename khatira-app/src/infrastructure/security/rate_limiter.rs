use dashmap::DashMap;
use khatira_errors::AppError;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 10;
pub const DEFAULT_REQUESTS_PER_HOUR: u32 = 100;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);
const SWEEP_EVERY: Duration = Duration::from_secs(5 * 60);

/// One fixed counting window.
#[derive(Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

impl Window {
    fn new(now: Instant) -> Self {
        Self {
            started: now,
            count: 0,
        }
    }

    fn roll(&mut self, now: Instant, length: Duration) {
        if now.duration_since(self.started) > length {
            *self = Self::new(now);
        }
    }

    /// Seconds left in the window once `limit` is reached.
    fn exhausted(&self, now: Instant, length: Duration, limit: u32) -> Option<u64> {
        (self.count >= limit).then(|| {
            length
                .saturating_sub(now.duration_since(self.started))
                .as_secs()
        })
    }
}

#[derive(Clone, Copy)]
struct ClientWindows {
    minute: Window,
    hour: Window,
}

/// Per-IP minute and hour quotas for submissions and login attempts.
#[derive(Clone)]
pub struct RateLimiter {
    clients: Arc<DashMap<IpAddr, ClientWindows>>,
    last_sweep: Arc<Mutex<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new(per_minute: u32, per_hour: u32) -> Self {
        Self {
            clients: Arc::new(DashMap::new()),
            last_sweep: Arc::new(Mutex::new(Instant::now())),
            per_minute,
            per_hour,
        }
    }

    /// Counts one request from `ip`, or says how long it must wait.
    pub fn check(&self, ip: IpAddr) -> Result<(), RateLimitError> {
        self.sweep_idle();

        let now = Instant::now();
        let mut windows = self.clients.entry(ip).or_insert_with(|| ClientWindows {
            minute: Window::new(now),
            hour: Window::new(now),
        });
        windows.minute.roll(now, MINUTE);
        windows.hour.roll(now, HOUR);

        if let Some(wait) = windows.minute.exhausted(now, MINUTE, self.per_minute) {
            return Err(RateLimitError::PerMinute(wait));
        }
        if let Some(wait) = windows.hour.exhausted(now, HOUR, self.per_hour) {
            return Err(RateLimitError::PerHour(wait));
        }

        windows.minute.count += 1;
        windows.hour.count += 1;
        Ok(())
    }

    fn sweep_idle(&self) {
        let mut last_sweep = self.last_sweep.lock().unwrap_or_else(|e| e.into_inner());
        if last_sweep.elapsed() < SWEEP_EVERY {
            return;
        }
        let now = Instant::now();
        self.clients
            .retain(|_, windows| now.duration_since(windows.hour.started) <= HOUR);
        *last_sweep = now;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_REQUESTS_PER_MINUTE, DEFAULT_REQUESTS_PER_HOUR)
    }
}

/// Quota hit, with the seconds until the window resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitError {
    PerMinute(u64),
    PerHour(u64),
}

impl RateLimitError {
    pub fn message_ar(&self) -> String {
        match self {
            Self::PerMinute(secs) => {
                format!("طلبات كثيرة جدا! انتظر {} ثانية ثم حاول مرة أخرى.", secs)
            }
            Self::PerHour(secs) => {
                format!("لقد تجاوزت الحد المسموح في الساعة. انتظر {} دقيقة.", secs.div_ceil(60))
            }
        }
    }
}

impl From<RateLimitError> for AppError {
    fn from(err: RateLimitError) -> Self {
        AppError::RateLimited(err.message_ar())
    }
}
