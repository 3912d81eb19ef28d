//! Layered service configuration.
//!
//! A TOML file provides the base values and `FLIGHTS__`-prefixed environment
//! variables override them, with `__` separating nested keys
//! (`FLIGHTS__SERVER__PORT` maps to `server.port`). Every section falls back
//! to its defaults when absent.

use config::{Config, Environment, File};
use log::info;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_NAME: &str = "flights";
const ENV_PREFIX: &str = "FLIGHTS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load config from `{path}`: {source}")]
    Load {
        path: String,
        source: config::ConfigError,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
            request_timeout_secs: 10,
        }
    }
}

/// SQLite location. `None` keeps everything in memory for the process lifetime.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rotating log files; stderr when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: flights_core::default_log_level().to_owned(),
            dir: None,
        }
    }
}

/// Loads configuration from `path` (required to exist) or from an optional
/// `flights.{toml,json,yaml,...}` in the working directory, then applies
/// environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (file, shown) = match path {
        Some(path) => (
            File::from(path).required(true),
            path.display().to_string(),
        ),
        None => (
            File::with_name(DEFAULT_CONFIG_NAME).required(false),
            DEFAULT_CONFIG_NAME.to_owned(),
        ),
    };

    info!("event=config_load module=config status=start source={shown}");

    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|cfg| cfg.try_deserialize::<AppConfig>())
        .map_err(|source| ConfigError::Load {
            path: shown,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::{load_config, AppConfig};
    use parking_lot::Mutex;
    use std::io::Write;
    use std::path::Path;

    // Serializes tests that read or write process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_listen_on_localhost_with_memory_database() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.socket_addr().to_string(), "127.0.0.1:8000");
        assert!(cfg.database.path.is_none());
        assert!(cfg.logging.dir.is_none());
    }

    #[test]
    fn file_values_override_defaults_per_field() {
        let _env = ENV_LOCK.lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[database]\npath = \"/tmp/flights-test.db\""
        )
        .unwrap();

        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.request_timeout_secs, 10);
        assert_eq!(
            cfg.database.path.as_deref().and_then(|p| p.to_str()),
            Some("/tmp/flights-test.db")
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let _env = ENV_LOCK.lock();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn env_overrides_defaults_and_file_values() {
        let _env = ENV_LOCK.lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[database]\npath = \"/tmp/flights-file.db\""
        )
        .unwrap();

        std::env::set_var("FLIGHTS__SERVER__PORT", "9333");
        std::env::set_var("FLIGHTS__DATABASE__PATH", "/tmp/flights-env.db");
        let from_defaults = load_config(None);
        let from_file = load_config(Some(file.path()));
        std::env::remove_var("FLIGHTS__SERVER__PORT");
        std::env::remove_var("FLIGHTS__DATABASE__PATH");

        for cfg in [from_defaults.unwrap(), from_file.unwrap()] {
            assert_eq!(cfg.server.port, 9333);
            assert_eq!(cfg.server.request_timeout_secs, 10);
            assert_eq!(
                cfg.database.path.as_deref(),
                Some(Path::new("/tmp/flights-env.db"))
            );
        }
    }
}
