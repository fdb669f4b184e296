use crate::constants::{cache_ttl, env_vars, retry};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path, get_snapshot_dir_path, get_storage_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// REST API root. Empty selects the file-backed source under `data_dir`.
    #[serde(default)]
    pub api_domain: String,
    /// Directory with JSON fixtures for the file-backed source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Directory for local snapshots. Defaults to the platform cache directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<String>,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    #[serde(default = "default_http_max_retries")]
    pub http_max_retries: u32,
    /// Artificial delay added by the file-backed source
    #[serde(default)]
    pub simulated_latency_ms: u64,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// In-memory cache sizing and per-family staleness thresholds
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    #[serde(default = "default_games_max_age")]
    pub games_max_age_seconds: u64,
    #[serde(default = "default_players_max_age")]
    pub players_max_age_seconds: u64,
    #[serde(default = "default_teams_max_age")]
    pub teams_max_age_seconds: u64,
    #[serde(default = "default_leaders_max_age")]
    pub leaders_max_age_seconds: u64,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_http_max_retries() -> u32 {
    retry::MAX_ATTEMPTS
}

fn default_cache_capacity() -> usize {
    crate::constants::cache::DEFAULT_CAPACITY
}

fn default_games_max_age() -> u64 {
    cache_ttl::GAMES_MAX_AGE_SECONDS
}

fn default_players_max_age() -> u64 {
    cache_ttl::PLAYERS_MAX_AGE_SECONDS
}

fn default_teams_max_age() -> u64 {
    cache_ttl::TEAMS_MAX_AGE_SECONDS
}

fn default_leaders_max_age() -> u64 {
    cache_ttl::LEADERS_MAX_AGE_SECONDS
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            capacity: default_cache_capacity(),
            games_max_age_seconds: default_games_max_age(),
            players_max_age_seconds: default_players_max_age(),
            teams_max_age_seconds: default_teams_max_age(),
            leaders_max_age_seconds: default_leaders_max_age(),
        }
    }
}

impl CacheConfig {
    pub fn games_max_age(&self) -> Duration {
        Duration::from_secs(self.games_max_age_seconds)
    }

    pub fn players_max_age(&self) -> Duration {
        Duration::from_secs(self.players_max_age_seconds)
    }

    pub fn teams_max_age(&self) -> Duration {
        Duration::from_secs(self.teams_max_age_seconds)
    }

    pub fn leaders_max_age(&self) -> Duration {
        Duration::from_secs(self.leaders_max_age_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: String::new(),
            data_dir: None,
            snapshot_dir: None,
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            http_max_retries: default_http_max_retries(),
            simulated_latency_ms: 0,
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing file yields the defaults. Environment variables override
    /// file values.
    ///
    /// # Environment Variables
    /// - `COURTSIDE_API_DOMAIN` - Override API domain
    /// - `COURTSIDE_DATA_DIR` - Override fixture directory
    /// - `COURTSIDE_SNAPSHOT_DIR` - Override snapshot directory
    /// - `COURTSIDE_LOG_FILE` - Override log file path
    /// - `COURTSIDE_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies the `COURTSIDE_*` environment variables on top of the current values.
    /// A timeout that does not parse as a number is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Ok(data_dir) = std::env::var(env_vars::DATA_DIR) {
            self.data_dir = Some(data_dir);
        }

        if let Ok(snapshot_dir) = std::env::var(env_vars::SNAPSHOT_DIR) {
            self.snapshot_dir = Some(snapshot_dir);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Whether data comes from the REST API rather than the fixture directory
    pub fn uses_http(&self) -> bool {
        !self.api_domain.is_empty()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Snapshot directory in effect: the configured one or the platform default
    pub fn effective_snapshot_dir(&self) -> PathBuf {
        self.snapshot_dir
            .clone()
            .unwrap_or_else(get_snapshot_dir_path)
            .into()
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Returns the platform-specific path for the favorites storage file.
    pub fn get_storage_path() -> String {
        get_storage_path()
    }

    /// Displays the effective configuration (file plus environment) to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !Path::new(&config_path).exists() {
            println!("(Not created yet, showing defaults)");
        }
        println!("────────────────────────────────────");
        println!("Data Source:");
        if config.uses_http() {
            println!("{}", config.api_domain);
            println!("HTTP timeout {} seconds", config.http_timeout_seconds);
        } else {
            match &config.data_dir {
                Some(dir) => println!("Fixture directory {dir}"),
                None => println!("Not configured"),
            }
        }
        println!("────────────────────────────────────");
        println!("Snapshot Directory:");
        println!("{}", config.effective_snapshot_dir().display());
        println!("────────────────────────────────────");
        println!("Cache:");
        println!(
            "{} entries, max age games {}s / players {}s / teams {}s / leaders {}s",
            config.cache.capacity,
            config.cache.games_max_age_seconds,
            config.cache.players_max_age_seconds,
            config.cache.teams_max_age_seconds,
            config.cache.leaders_max_age_seconds
        );
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{}/courtside.log", get_log_dir_path());
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and ensures a
    /// non-empty API domain carries the https:// prefix.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let api_domain = if self.api_domain.is_empty() || self.api_domain.starts_with("https://") {
            self.api_domain.clone()
        } else {
            format!("https://{}", self.api_domain.trim_start_matches("http://"))
        };
        let content = toml::to_string_pretty(&Config {
            api_domain,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without applying the environment.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
