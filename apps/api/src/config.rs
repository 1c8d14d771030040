use anyhow::{bail, Context, Result};

use crate::assistant::matcher::DEFAULT_MAX_INPUT_CHARS;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Longest chat message accepted, in characters.
    pub chat_max_input_chars: usize,
    pub chat_typing_min_ms: u64,
    pub chat_typing_max_ms: u64,
    /// Chat sessions untouched this long are dropped.
    pub chat_session_idle_secs: u64,
    pub chat_session_sweep_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key-to-value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let config = Config {
            database_url: require("DATABASE_URL")?,
            anthropic_api_key: require("ANTHROPIC_API_KEY")?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            chat_max_input_chars: parse_or(&lookup, "CHAT_MAX_INPUT_CHARS", DEFAULT_MAX_INPUT_CHARS)?,
            chat_typing_min_ms: parse_or(&lookup, "CHAT_TYPING_MIN_MS", 1_000)?,
            chat_typing_max_ms: parse_or(&lookup, "CHAT_TYPING_MAX_MS", 2_000)?,
            chat_session_idle_secs: parse_or(&lookup, "CHAT_SESSION_IDLE_SECS", 30 * 60)?,
            chat_session_sweep_secs: parse_or(&lookup, "CHAT_SESSION_SWEEP_SECS", 60)?,
        };

        if config.chat_max_input_chars == 0 {
            bail!("CHAT_MAX_INPUT_CHARS must be greater than zero");
        }
        if config.chat_typing_min_ms > config.chat_typing_max_ms {
            bail!("CHAT_TYPING_MIN_MS must not exceed CHAT_TYPING_MAX_MS");
        }
        if config.chat_session_idle_secs == 0 || config.chat_session_sweep_secs == 0 {
            bail!("CHAT_SESSION_IDLE_SECS and CHAT_SESSION_SWEEP_SECS must be greater than zero");
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
