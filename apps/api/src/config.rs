use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openrouter_api_key: String,
    pub jwt_secret: String,
    /// Sent as the `HTTP-Referer` attribution header on every model call.
    pub app_referer: String,
    /// Sent as the `X-Title` attribution header on every model call.
    pub app_title: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            app_referer: std::env::var("APP_REFERER")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            app_title: std::env::var("APP_TITLE")
                .unwrap_or_else(|_| "AI Resume Analyzer".to_string()),
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
