use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; the language model is only enabled when a key is present.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub llm_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub max_upload_bytes: usize,
    /// Pins template title/company selection. Unset means OS-seeded randomness per request.
    pub template_seed: Option<u64>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 20)?,
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", 15)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            template_seed: optional_env("TEMPLATE_SEED")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("TEMPLATE_SEED must be an unsigned integer")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            llm_timeout_secs: 20,
            fetch_timeout_secs: 15,
            max_upload_bytes: 10 * 1024 * 1024,
            template_seed: None,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Reads a variable, treating empty values and the sample placeholder as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "your_api_key_here")
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}
