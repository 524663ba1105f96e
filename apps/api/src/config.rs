use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Enables the LLM block selector and block customization when set.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub blocks_source_path: String,
    /// JSON tax table; the built-in UK table is used when unset.
    pub tax_config_path: Option<String>,
    pub default_max_blocks: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            blocks_source_path: optional_env("BLOCKS_SOURCE_PATH")
                .unwrap_or_else(|| "cv_lego_blocks_master.md".to_string()),
            tax_config_path: optional_env("TAX_CONFIG_PATH"),
            default_max_blocks: std::env::var("DEFAULT_MAX_BLOCKS")
                .unwrap_or_else(|_| "6".to_string())
                .parse::<usize>()
                .context("DEFAULT_MAX_BLOCKS must be a non-negative integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
