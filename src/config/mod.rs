use std::env;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("invalid {name} value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-wide configuration, loaded once at startup and passed by handle
/// into the router state. Read-only after construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed for cross-origin requests. When unset the server
    /// falls back to allowing all origins.
    pub frontend_url: Option<String>,
    /// Static bearer secret for the API key guard. Checked per request so a
    /// missing key surfaces as a server misconfiguration on authenticated
    /// routes rather than a startup failure.
    pub api_key: Option<String>,
    pub database_url: Url,
    pub database_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            Err(_) => 8000,
        };

        let frontend_url = env::var("FRONTEND_URL").ok().filter(|s| !s.is_empty());
        let api_key = env::var("API_KEY").ok().filter(|s| !s.is_empty());

        let raw_url = env::var("PROJECT_URL").map_err(|_| ConfigError::Missing("PROJECT_URL"))?;
        let database_url = Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            name: "PROJECT_URL",
            value: raw_url.clone(),
            reason: e.to_string(),
        })?;

        let database_key = env::var("ANON_KEY").map_err(|_| ConfigError::Missing("ANON_KEY"))?;

        Ok(Self {
            host,
            port,
            frontend_url,
            api_key,
            database_url,
            database_key,
        })
    }
}
