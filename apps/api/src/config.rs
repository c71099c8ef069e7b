use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only malformed numeric values abort startup; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the service keeps its records in memory.
    pub database_url: Option<String>,
    /// When unset every model call fails locally and falls back.
    pub anthropic_api_key: Option<String>,
    /// Overrides the Messages API endpoint, e.g. for a proxy.
    pub anthropic_api_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    pub max_variations: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_api_url: optional_env("ANTHROPIC_API_URL"),
            port: parse_env("PORT", 5000).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            max_variations: parse_env("MAX_VARIATIONS", 10)
                .context("MAX_VARIATIONS must be a positive integer")?,
        })
    }

    pub fn storage_kind(&self) -> &'static str {
        if self.database_url.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            anthropic_api_key: None,
            anthropic_api_url: None,
            port: 5000,
            rust_log: "info".to_string(),
            llm_timeout_secs: 60,
            max_variations: 10,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}
