//! Server configuration from environment variables
//!
//! - `BOT_STATUS_HOST`: bind address (default `0.0.0.0`)
//! - `BOT_STATUS_PORT`: bind port (default `5000`)
//! - `BOT_STATUS_DATA_DIR`: directory for data files (default: current dir)
//! - `BOT_STATUS_LOG_FILE`: request log file (default `access_logs.json`)
//! - `BOT_STATUS_BOTS_FILE`: bot snapshot file (default `bots_status.json`)
//!
//! Relative file names resolve against the data directory.

use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_FILE: &str = "access_logs.json";
pub const DEFAULT_BOTS_FILE: &str = "bots_status.json";

/// Errors raised while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected a port number")]
    InvalidPort { key: &'static str, value: String },
}

/// Runtime configuration for the server binary
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_file: PathBuf,
    pub bots_file: PathBuf,
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(&current_dir, |key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(current_dir: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BOT_STATUS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("BOT_STATUS_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                key: "BOT_STATUS_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let data_dir = match lookup("BOT_STATUS_DATA_DIR") {
            Some(dir) => resolve(current_dir, &dir),
            None => current_dir.to_path_buf(),
        };

        let log_file = resolve(
            &data_dir,
            &lookup("BOT_STATUS_LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        );
        let bots_file = resolve(
            &data_dir,
            &lookup("BOT_STATUS_BOTS_FILE").unwrap_or_else(|| DEFAULT_BOTS_FILE.to_string()),
        );

        Ok(Self {
            host,
            port,
            log_file,
            bots_file,
        })
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
