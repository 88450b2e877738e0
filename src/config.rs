//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dataset::DatasetSource;
use crate::live::FeedConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub live: LiveConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode: detailed callback errors and verbose request tracing
    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_max_ws_connections")]
    pub max_ws_connections: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_max_ws_connections() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            max_ws_connections: default_max_ws_connections(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dataset configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetConfig {
    /// CSV file to load instead of the bundled sample
    pub path: Option<PathBuf>,
}

impl DatasetConfig {
    pub fn source(&self) -> DatasetSource {
        DatasetSource::from_path(self.path.clone())
    }
}

/// Live feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LiveConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_capacity")]
    pub capacity: usize,

    #[serde(default = "default_min_value")]
    pub min_value: i64,

    /// Exclusive upper bound
    #[serde(default = "default_max_value")]
    pub max_value: i64,
}

fn default_interval_ms() -> u64 {
    2000
}

fn default_capacity() -> usize {
    crate::live::DEFAULT_CAPACITY
}

fn default_min_value() -> i64 {
    50
}

fn default_max_value() -> i64 {
    200
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            capacity: default_capacity(),
            min_value: default_min_value(),
            max_value: default_max_value(),
        }
    }
}

impl LiveConfig {
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            period: Duration::from_millis(self.interval_ms),
            capacity: self.capacity,
            values: self.min_value..self.max_value,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Locations searched when no config file is given
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load `explicit` if given, else the first of `candidates` that exists,
    /// else defaults. Environment overrides apply in every case.
    ///
    /// Also returns the file that was used. A file that exists but cannot be
    /// read or parsed is an error, never skipped.
    pub fn load_from(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => candidates.iter().find(|p| p.exists()).cloned(),
        };

        match path {
            Some(path) => Ok((Self::load_with_env(&path)?, Some(path))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = var("DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("DASHBOARD_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(debug) = var("DASHBOARD_DEBUG") {
            self.server.debug = parse_flag(&debug);
        }

        // Dataset overrides
        if let Some(path) = var("DASHBOARD_DATASET") {
            self.dataset.path = Some(PathBuf::from(path));
        }

        // Live feed overrides
        if let Some(ms) = var("DASHBOARD_LIVE_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.live.interval_ms = ms;
        }

        // Logging overrides
        if let Some(level) = var("DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value != "false" && value != "0" && !value.is_empty()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Dashboard Configuration
#
# Environment variables override these settings:
# - DASHBOARD_HOST
# - DASHBOARD_PORT
# - DASHBOARD_DEBUG
# - DASHBOARD_DATASET
# - DASHBOARD_LIVE_INTERVAL_MS
# - DASHBOARD_LOG_LEVEL
# - DASHBOARD_LOG_FORMAT

[server]
# Host to bind to
host = "127.0.0.1"

# Port to listen on
port = 8050

# Debug mode shows full callback errors in the page
debug = false

# Maximum concurrent live-update connections
max_ws_connections = 1000

[dataset]
# CSV with header country,continent,year,lifeExp,pop,gdpPercap
# Omit to use the bundled Gapminder sample
# path = "./gapminder.csv"

[live]
# Time between simulated sensor samples (ms)
interval_ms = 2000

# Samples kept for the live chart
capacity = 15

# Generated values are in [min_value, max_value)
min_value = 50
max_value = 200

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "127.0.0.1:8050");
        assert!(!config.server.debug);
        assert!(config.dataset.path.is_none());
        assert_eq!(config.live.interval_ms, 2000);
        assert_eq!(config.live.capacity, 15);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.server.addr(), defaults.server.addr());
        assert_eq!(config.live.min_value, 50);
        assert_eq!(config.live.max_value, 200);
        assert_eq!(config.dataset.source(), DatasetSource::Embedded);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000\ndebug = true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(config.server.debug);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.live.interval_ms, 2000);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Config::load(Path::new("/nonexistent/dashboard.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_from_uses_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[server]\nport = 9100").unwrap();

        let (config, used) = Config::load_from(None, &[missing, present.clone()]).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(used, Some(present));
    }

    #[test]
    fn test_load_from_malformed_default_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"oops\"").unwrap();

        assert!(matches!(
            Config::load_from(None, &[path]),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_from_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, used) = Config::load_from(None, &[dir.path().join("none.toml")]).unwrap();
        assert!(used.is_none());
        assert_eq!(config.live.capacity, 15);
    }

    #[test]
    fn test_load_from_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("config.toml");
        std::fs::write(&fallback, "[server]\nport = 9100").unwrap();

        assert!(matches!(
            Config::load_from(Some(dir.path().join("absent.toml").as_path()), &[fallback]),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("DASHBOARD_PORT", "8123"),
            ("DASHBOARD_DEBUG", "true"),
            ("DASHBOARD_DATASET", "/data/g.csv"),
            ("DASHBOARD_LIVE_INTERVAL_MS", "500"),
            ("DASHBOARD_LOG_FORMAT", "json"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 8123);
        assert!(config.server.debug);
        assert_eq!(
            config.dataset.source(),
            DatasetSource::File(PathBuf::from("/data/g.csv"))
        );
        assert_eq!(config.live.feed_config().period, Duration::from_millis(500));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_unparseable_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "DASHBOARD_PORT").then(|| "abc".to_string()));
        assert_eq!(config.server.port, 8050);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag("0"));
    }
}
