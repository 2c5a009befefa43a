//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `JOURNEY_*` environment variables, a configuration file,
//! or command-line flags. Every field is optional; accessors supply defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MOTIVATION_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MOTIVATION_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_MOTIVATION_TIMEOUT_SECS: u64 = 10;

/// Error raised when a configured value cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        /// Configured text.
        value: String,
        /// Parser diagnostics.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Settings for the weight journey service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOURNEY")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string for the record store.
    pub database_url: Option<String>,
    /// Use a process-local store instead of PostgreSQL.
    #[ortho_config(default = false)]
    pub in_memory_store: bool,
    /// JSON document replacing the built-in seed data.
    pub seed_path: Option<PathBuf>,
    /// API key enabling generated motivation text.
    pub motivation_api_key: Option<String>,
    /// Base URL of the text-generation API.
    pub motivation_endpoint: Option<String>,
    /// Model used for generated motivation text.
    pub motivation_model: Option<String>,
    /// Request timeout for the text-generation API.
    pub motivation_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self
            .bind_addr
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// API key for the text-generation service, ignoring blank values.
    pub fn motivation_api_key(&self) -> Option<&str> {
        non_blank(self.motivation_api_key.as_deref())
    }

    /// Text-generation base URL.
    pub fn motivation_endpoint(&self) -> &str {
        non_blank(self.motivation_endpoint.as_deref()).unwrap_or(DEFAULT_MOTIVATION_ENDPOINT)
    }

    /// Text-generation model name.
    pub fn motivation_model(&self) -> &str {
        non_blank(self.motivation_model.as_deref()).unwrap_or(DEFAULT_MOTIVATION_MODEL)
    }

    /// Text-generation request timeout.
    pub fn motivation_timeout(&self) -> Duration {
        Duration::from_secs(
            self.motivation_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_MOTIVATION_TIMEOUT_SECS),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
