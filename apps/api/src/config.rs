use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if the model key is missing; search and photo keys are optional
/// and their sources degrade to empty results when unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub news_api_key: Option<String>,
    pub serp_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,
    /// `utm_source` value required by Unsplash attribution links.
    pub unsplash_app_name: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            news_api_key: optional_env("NEWS_API_KEY"),
            serp_api_key: optional_env("SERP_API_KEY"),
            unsplash_access_key: optional_env("UNSPLASH_ACCESS_KEY"),
            unsplash_app_name: optional_env("UNSPLASH_APP_NAME")
                .unwrap_or_else(|| "blogsmith".to_string()),
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

/// Blank values count as unset so an empty line in `.env` doesn't produce 401s later.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
