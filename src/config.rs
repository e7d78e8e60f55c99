//! Application configuration for the loyalty desk.
//!
//! Settings come from an optional `config.toml` in the working directory
//! (path overridable via `LOYALTY_DESK_CONFIG`), with individual
//! environment-variable overrides layered on top. A `.env` file is honoured
//! when the binary loads it through `dotenvy` before calling in here.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The fixed company roster the product ships with. Extensible through
/// `config.toml`, which replaces the whole list.
pub const DEFAULT_COMPANIES: [&str; 4] = ["Reliance Digital", "Titan", "Peter England", "Bata"];

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TOKEN_STORE: &str = "data/auth_tokens.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the remote CRM API.
    pub api_base_url: String,
    /// Company roster used for revenue allocation and form choices.
    pub companies: Vec<String>,
    /// Where the session tokens are persisted between runs.
    pub token_store_path: PathBuf,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            companies: DEFAULT_COMPANIES.iter().map(ToString::to_string).collect(),
            token_store_path: PathBuf::from(DEFAULT_TOKEN_STORE),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Loads the application configuration from `config.toml` (if present) and
/// applies environment overrides (`CRM_API_URL`, `CRM_TOKEN_STORE`).
pub fn load_app_configuration() -> Result<AppConfig> {
    let config_path =
        env::var("LOYALTY_DESK_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let mut config = load_from_file(Path::new(&config_path))?;

    if let Ok(url) = env::var("CRM_API_URL") {
        debug!("Overriding api_base_url from CRM_API_URL");
        config.api_base_url = url;
    }
    if let Ok(store) = env::var("CRM_TOKEN_STORE") {
        debug!("Overriding token_store_path from CRM_TOKEN_STORE");
        config.token_store_path = PathBuf::from(store);
    }

    if config.companies.is_empty() {
        return Err(Error::Config {
            message: "company roster cannot be empty".to_string(),
        });
    }

    info!(
        api_base_url = %config.api_base_url,
        companies = config.companies.len(),
        "Application configuration loaded"
    );
    Ok(config)
}

fn load_from_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file found, using defaults");
        return Ok(AppConfig::default());
    }

    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn defaults_carry_the_shipped_roster() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.companies.len(), 4);
        assert!(config.companies.iter().any(|c| c == "Titan"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            api_base_url = "https://crm.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://crm.example.com");
        assert_eq!(config.companies.len(), 4);
    }

    #[test]
    fn roster_is_replaceable_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            companies = ["Titan", "Fabindia"]
            "#,
        )
        .unwrap();
        assert_eq!(config.companies, vec!["Titan", "Fabindia"]);
    }
}
