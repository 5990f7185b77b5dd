//! Application configuration

use std::env;

use anyhow::{Context, Result};
use clap::Parser;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite:payments.db?mode=rwc";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:4200";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Interface to bind
    pub server_host: String,
    /// HTTP port
    pub server_port: u16,
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// CORS allowed origins (comma-separated, or "*" for any)
    pub cors_allowed_origins: Vec<String>,
    /// Request body limit for CSV and evidence uploads
    pub max_upload_bytes: usize,
}

/// Command-line flags; each one overrides its environment variable.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "payment-engine", version, about = "Payment backend management API server")]
pub struct CliArgs {
    /// Interface to bind (env: SERVER_HOST)
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on (env: SERVER_PORT or PORT)
    #[arg(long)]
    pub port: Option<u16>,
    /// SQLite URL, e.g. sqlite:payments.db?mode=rwc (env: DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = match non_empty("SERVER_PORT").or_else(|| non_empty("PORT")) {
            Some(raw) => raw.parse().with_context(|| {
                format!("SERVER_PORT must be a valid port number, got '{}'", raw)
            })?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match non_empty("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{}'", raw))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            server_host: non_empty("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port,
            database_url: non_empty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            max_upload_bytes,
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_cli(mut self, cli: &CliArgs) -> Self {
        if let Some(host) = &cli.host {
            self.server_host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server_port = port;
        }
        if let Some(url) = &cli.database_url {
            self.database_url = url.clone();
        }
        self
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_local_development() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.database_url, "sqlite:payments.db?mode=rwc");
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:4200"]);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = AppConfig::from_lookup(lookup(&[("PORT", "9100")])).unwrap();
        assert_eq!(config.server_port, 9100);

        let config =
            AppConfig::from_lookup(lookup(&[("PORT", "9100"), ("SERVER_PORT", "9200")])).unwrap();
        assert_eq!(config.server_port, 9200);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = AppConfig::from_lookup(lookup(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://a.test, http://b.test ,,",
        )]))
        .unwrap();
        assert_eq!(config.cors_allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn wildcard_origin_is_detected() {
        let config = AppConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "*")])).unwrap();
        assert!(config.allows_any_origin());
    }

    #[test]
    fn cli_flags_override_environment() {
        let config = AppConfig::from_lookup(lookup(&[("SERVER_HOST", "0.0.0.0")]))
            .unwrap()
            .with_cli(&CliArgs {
                host: None,
                port: Some(8081),
                database_url: Some("sqlite::memory:".to_string()),
            });
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 8081);
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn cli_parses_flags() {
        let cli = CliArgs::parse_from(["payment-engine", "--host", "0.0.0.0", "--port", "9000"]);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.database_url, None);
    }
}
