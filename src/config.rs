//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATABASE_URL="sqlite://shortlink.db"
//! export LISTEN="0.0.0.0:8080"
//! export CODE_LENGTH="6"
//! ```
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite database (default: `sqlite://shortlink.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CODE_LENGTH` - Initial short code length (default: 6, max: 64)
//! - `CODE_ATTEMPTS_PER_LENGTH` - Collisions tolerated before the code grows (default: 5)
//! - `CODE_MAX_ESCALATIONS` - How many times the code may grow (default: 3)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)
//! - `DB_BUSY_TIMEOUT` - SQLite busy timeout in seconds (default: 5)
//! - `SHUTDOWN_TIMEOUT_SECS` - Drain deadline for in-flight requests (default: 30)

use anyhow::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::RetryPolicy;
use crate::infrastructure::storage::StorageOptions;

/// Upper bound for `CODE_LENGTH`.
const MAX_CODE_LENGTH: usize = 64;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Length of generated codes before any collision escalation.
    pub code_length: usize,
    pub code_attempts_per_length: u32,
    pub code_max_escalations: u32,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    /// How long a statement waits on a locked database in seconds
    /// (`DB_BUSY_TIMEOUT`, default: 5).
    pub db_busy_timeout: u64,

    /// Seconds to wait for in-flight requests on shutdown.
    pub shutdown_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable numeric variables fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://shortlink.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            code_length: env_or("CODE_LENGTH", 6),
            code_attempts_per_length: env_or("CODE_ATTEMPTS_PER_LENGTH", 5),
            code_max_escalations: env_or("CODE_MAX_ESCALATIONS", 3),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            db_connect_timeout: env_or("DB_CONNECT_TIMEOUT", 30),
            db_busy_timeout: env_or("DB_BUSY_TIMEOUT", 5),
            shutdown_timeout: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `database_url` is not a SQLite URL
    /// - `code_length` is outside `1..=64`
    /// - `code_attempts_per_length`, `db_max_connections` or a timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            anyhow::bail!(
                "CODE_LENGTH must be between 1 and {}, got {}",
                MAX_CODE_LENGTH,
                self.code_length
            );
        }

        if self.code_attempts_per_length == 0 {
            anyhow::bail!("CODE_ATTEMPTS_PER_LENGTH must be at least 1");
        }

        if self.code_length + self.code_max_escalations as usize > MAX_CODE_LENGTH {
            anyhow::bail!(
                "CODE_LENGTH + CODE_MAX_ESCALATIONS must not exceed {}",
                MAX_CODE_LENGTH
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }
        if self.shutdown_timeout == 0 {
            anyhow::bail!("SHUTDOWN_TIMEOUT_SECS must be greater than 0");
        }

        Ok(())
    }

    /// Pool settings for [`crate::infrastructure::storage::SqliteStorage::connect`].
    pub fn storage_options(&self) -> StorageOptions {
        StorageOptions {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_connect_timeout),
            busy_timeout: Duration::from_secs(self.db_busy_timeout),
        }
    }

    /// Collision handling for code creation.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.code_attempts_per_length, self.code_max_escalations)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!(
            "  Code length: {} (+{} on repeated collisions)",
            self.code_length,
            self.code_max_escalations
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            code_length: 6,
            code_attempts_per_length: 5,
            code_max_escalations: 3,
            db_max_connections: 5,
            db_connect_timeout: 30,
            db_busy_timeout: 5,
            shutdown_timeout: 30,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:8080".to_string();

        config.database_url = "postgres://localhost/test".to_string();
        assert!(config.validate().is_err());

        config.database_url = "sqlite://data/links.db".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_code_settings_validation() {
        let mut config = valid_config();

        config.code_length = 0;
        assert!(config.validate().is_err());

        config.code_length = 65;
        assert!(config.validate().is_err());

        config.code_length = 62;
        config.code_max_escalations = 3;
        assert!(config.validate().is_err());

        config.code_length = 6;
        config.code_attempts_per_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pool_settings_validation() {
        let mut config = valid_config();

        config.db_max_connections = 0;
        assert!(config.validate().is_err());

        config.db_max_connections = 5;
        config.db_connect_timeout = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_settings() {
        let config = valid_config();

        let options = config.storage_options();
        assert_eq!(options.max_connections, 5);
        assert_eq!(options.acquire_timeout, Duration::from_secs(30));
        assert_eq!(options.busy_timeout, Duration::from_secs(5));

        let policy = config.retry_policy();
        assert_eq!(policy.attempts_per_length(), 5);
        assert_eq!(policy.max_length_escalations(), 3);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("CODE_LENGTH");
            env::remove_var("LISTEN");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://shortlink.db");
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.code_length, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("DATABASE_URL", "sqlite://override.db");
            env::set_var("CODE_LENGTH", "10");
            env::set_var("CODE_MAX_ESCALATIONS", "not-a-number");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://override.db");
        assert_eq!(config.code_length, 10);
        // Unparsable values fall back to the default
        assert_eq!(config.code_max_escalations, 3);

        // Cleanup
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("CODE_LENGTH");
            env::remove_var("CODE_MAX_ESCALATIONS");
        }
    }
}
