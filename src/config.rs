//! Server configuration from the environment (and `.env`).

use chrono::Duration;
use std::path::PathBuf;
use thiserror::Error;
use crate::domain::aggregates::ChatTarget;

const DEFAULT_ADMIN_PASSWORD: &str = "change-me";
/// One year.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange { name: &'static str, value: i64, min: i64, max: i64 },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub admin_password: String,
    /// Publicly served assets.
    pub static_dir: PathBuf,
    /// Admin pages, only ever rendered through the session-checked routes.
    pub pages_dir: PathBuf,
    pub session_ttl_hours: i64,
    pub chat: ChatTarget,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            static_dir: PathBuf::from("static"),
            pages_dir: PathBuf::from("pages"),
            session_ttl_hours: 24,
            chat: ChatTarget { username: "your_username".into(), bot_username: "your_bot_username".into() },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(port) = lookup("PORT") { config.port = number("PORT", port)?; }
        if let Some(password) = lookup("ADMIN_PASSWORD") { config.admin_password = password; }
        if let Some(dir) = lookup("STATIC_DIR") { config.static_dir = PathBuf::from(dir); }
        if let Some(dir) = lookup("PAGES_DIR") { config.pages_dir = PathBuf::from(dir); }
        if let Some(ttl) = lookup("SESSION_TTL_HOURS") {
            config.session_ttl_hours = in_range("SESSION_TTL_HOURS", number("SESSION_TTL_HOURS", ttl)?, 1, MAX_SESSION_TTL_HOURS)?;
        }
        if let Some(username) = lookup("CHAT_USERNAME") { config.chat.username = username; }
        if let Some(bot) = lookup("CHAT_BOT_USERNAME") { config.chat.bot_username = bot; }
        Ok(config)
    }

    pub fn uses_default_password(&self) -> bool { self.admin_password == DEFAULT_ADMIN_PASSWORD }

    /// Session lifetime, clamped into the accepted range for configs built by hand.
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS))
    }
}

fn number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber { name, value })
}

fn in_range(name: &'static str, value: i64, min: i64, max: i64) -> Result<i64, ConfigError> {
    if (min..=max).contains(&value) { Ok(value) } else { Err(ConfigError::OutOfRange { name, value, min, max }) }
}
