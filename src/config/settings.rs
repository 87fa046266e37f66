//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use chrono::NaiveTime;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_REMINDER_TIME, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_TTL_HOURS, SECONDS_PER_HOUR,
};

/// SameSite attribute applied to the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSameSite {
    Strict,
    Lax,
    /// Cross-site frontend; browsers require `Secure` alongside it
    None,
}

impl FromStr for CookieSameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "none" => Ok(Self::None),
            other => Err(format!("unknown SameSite policy '{}'", other)),
        }
    }
}

/// How outgoing email is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailDelivery {
    /// Run the email handler inline
    Direct,
    /// Push onto the PostgreSQL job queue for `jobs work`
    Queue,
}

impl FromStr for MailDelivery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "queue" => Ok(Self::Queue),
            other => Err(format!("unknown mail delivery mode '{}'", other)),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub session_ttl_hours: u64,
    pub cookie_secure: bool,
    pub cookie_same_site: CookieSameSite,
    pub frontend_url: Option<String>,
    /// Daily reminder fire time, UTC
    pub reminder_time: NaiveTime,
    pub mail_delivery: MailDelivery,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("frontend_url", &self.frontend_url)
            .field("reminder_time", &self.reminder_time)
            .field("mail_delivery", &self.mail_delivery)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            cookie_secure: false,
            cookie_same_site: CookieSameSite::Lax,
            frontend_url: None,
            reminder_time: parse_reminder_time(DEFAULT_REMINDER_TIME).unwrap_or_default(),
            mail_delivery: MailDelivery::Direct,
        }
    }
}

impl Config {
    /// Load configuration from `.env` and environment variables.
    ///
    /// Unparseable values fall back to their defaults with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parsed_var("SERVER_PORT", defaults.server_port),
            session_ttl_hours: parsed_var("SESSION_TTL_HOURS", defaults.session_ttl_hours),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.cookie_secure),
            cookie_same_site: parsed_var("COOKIE_SAME_SITE", defaults.cookie_same_site),
            frontend_url: env::var("FRONTEND_URL").ok().filter(|v| !v.trim().is_empty()),
            reminder_time: match env::var("REMINDER_TIME") {
                Ok(raw) => parse_reminder_time(&raw).unwrap_or_else(|| {
                    tracing::warn!(value = %raw, "Invalid REMINDER_TIME, using default");
                    defaults.reminder_time
                }),
                Err(_) => defaults.reminder_time,
            },
            mail_delivery: parsed_var("MAIL_DELIVERY", defaults.mail_delivery),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Session lifetime in seconds.
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_hours.max(1) * SECONDS_PER_HOUR
    }

    /// Whether the session cookie must carry `Secure`.
    ///
    /// `SameSite=None` is rejected by browsers without it.
    pub fn cookie_requires_secure(&self) -> bool {
        self.cookie_secure || self.cookie_same_site == CookieSameSite::None
    }
}

fn parsed_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
{
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Parse an `HH:MM` (or `HH:MM:SS`) wall-clock time.
pub fn parse_reminder_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}
