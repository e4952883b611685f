use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    /// Backing file for the mood log (whole-file read-modify-write).
    pub mood_log_path: PathBuf,
    /// Directory for generated artifacts (speech audio, trend charts).
    pub media_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            mood_log_path: std::env::var("MOOD_LOG_PATH")
                .unwrap_or_else(|_| "mood_log.json".to_string())
                .into(),
            media_dir: std::env::var("MEDIA_DIR")
                .unwrap_or_else(|_| "media".to_string())
                .into(),
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
