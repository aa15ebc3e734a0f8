//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Generation oracle base URL
    pub oracle_base_url: String,

    /// HTTP server port
    pub server_port: u16,

    /// Number of pages kept in memory before the least recently used is dropped
    pub max_pages: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            oracle_base_url: env::var("CHALLENGE_ORACLE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            max_pages: env::var("MAX_PAGES")
                .unwrap_or_else(|_| "256".to_string())
                .parse()
                .context("MAX_PAGES must be a positive integer")?,
        })
    }
}
