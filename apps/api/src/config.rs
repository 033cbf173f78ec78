use anyhow::{Context, Result};
use uuid::Uuid;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Identity used for the single-user record endpoints until the
    /// authentication layer supplies a real actor.
    pub default_user_id: Uuid,
    /// Baseline policy for the daily summary: "fixed", "seasonal" or "observed".
    pub baseline_strategy: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            default_user_id: require_env("DEFAULT_USER_ID")?
                .parse::<Uuid>()
                .context("DEFAULT_USER_ID must be a valid UUID")?,
            baseline_strategy: std::env::var("BASELINE_STRATEGY")
                .unwrap_or_else(|_| "fixed".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
