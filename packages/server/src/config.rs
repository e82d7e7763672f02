use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub env: String,
    pub database_url: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            env: env::var("ENV").unwrap_or_else(|_| "development".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://students.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8082".to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }
}
