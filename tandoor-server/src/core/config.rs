use std::path::PathBuf;

use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | variable  | default      | meaning                                  |
/// |-----------|--------------|------------------------------------------|
/// | HOST      | 0.0.0.0      | bind address                             |
/// | HTTP_PORT | 5000         | HTTP service port                        |
/// | DATA_DIR  | ./data       | directory holding the embedded database  |
/// | TIMEZONE  | Asia/Kolkata | business timezone (stats day windows)    |
/// | LOG_LEVEL | info         | default tracing level                    |
/// | LOG_DIR   | (unset)      | when set, daily-rolled JSON log files    |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/var/lib/tandoor HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP listener
    pub host: String,
    /// HTTP API service port
    pub http_port: u16,
    /// Directory holding the embedded database
    pub data_dir: String,
    /// Business timezone; daily stats windows are computed in it
    pub timezone: Tz,
    /// Default tracing level (`RUST_LOG` still wins when set)
    pub log_level: String,
    /// Optional directory for rolling JSON log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Asia::Kolkata),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Path of the embedded database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("tandoor.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_joins_data_dir() {
        let config = Config {
            host: "127.0.0.1".into(),
            http_port: 0,
            data_dir: "/tmp/tandoor-test".into(),
            timezone: chrono_tz::Asia::Kolkata,
            log_level: "info".into(),
            log_dir: None,
        };
        assert_eq!(
            config.db_path(),
            PathBuf::from("/tmp/tandoor-test/tandoor.redb")
        );
    }
}
