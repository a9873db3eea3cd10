use std::env;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub reading_collection: String,
    pub listening_collection: String,
    pub writing_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub allowed_origins: Vec<String>,
    pub content_fetch_timeout_secs: u64,
    pub session_ttl_minutes: i64,
    pub derive_maxima_from_content: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "pruefung-local".to_string()),
            reading_collection: env::var("READING_COLLECTION")
                .unwrap_or_else(|_| "LESEN".to_string()),
            listening_collection: env::var("LISTENING_COLLECTION")
                .unwrap_or_else(|_| "HÖREN".to_string()),
            writing_collection: env::var("WRITING_COLLECTION")
                .unwrap_or_else(|_| "SCHREIBEN".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_else(|_| vec!["http://localhost:5173".to_string()]),
            content_fetch_timeout_secs: env::var("CONTENT_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(180),
            derive_maxima_from_content: env::var("DERIVE_MAXIMA_FROM_CONTENT")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Fails on settings the server cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.mongo_db_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "MONGO_DB_NAME must not be empty".to_string(),
            ));
        }
        if self.web_server_port == 0 {
            return Err(AppError::ValidationError(
                "WEB_SERVER_PORT must be a non-zero port".to_string(),
            ));
        }
        if self.session_ttl_minutes <= 0 {
            return Err(AppError::ValidationError(format!(
                "SESSION_TTL_MINUTES must be positive, got {}",
                self.session_ttl_minutes
            )));
        }
        Ok(())
    }

    /// `None` when fetches may wait indefinitely.
    pub fn content_fetch_timeout(&self) -> Option<Duration> {
        (self.content_fetch_timeout_secs > 0)
            .then(|| Duration::from_secs(self.content_fetch_timeout_secs))
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "pruefung-test".to_string(),
            reading_collection: "LESEN".to_string(),
            listening_collection: "HÖREN".to_string(),
            writing_collection: "SCHREIBEN".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            allowed_origins: vec!["http://localhost:5173".to_string()],
            content_fetch_timeout_secs: 2,
            session_ttl_minutes: 30,
            derive_maxima_from_content: false,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
