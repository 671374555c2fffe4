//! Configuration management for Aswa.
//!
//! This module loads configuration values from environment variables and an
//! optional `.env` file, and assembles them into the [`DiscoveryConfig`] that
//! is injected into the discovery engine. The engine itself never reads the
//! environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    deezer::MAX_SEARCH_LIMIT,
    discovery::RetryPolicy,
};

pub const DEFAULT_DEEZER_API_URL: &str = "https://api.deezer.com";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under the platform-specific local data directory:
/// - Linux: `~/.local/share/aswa/.env`
/// - macOS: `~/Library/Application Support/aswa/.env`
/// - Windows: `%LOCALAPPDATA%/aswa/.env`
///
/// The directory is created when missing. A missing `.env` file is not an
/// error, every setting has a default.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("aswa/.env");
    path
}

/// Returns the Deezer API base URL (`DEEZER_API_URL`).
pub fn deezer_api_url() -> String {
    env::var("DEEZER_API_URL").unwrap_or_else(|_| DEFAULT_DEEZER_API_URL.to_string())
}

/// Returns the bind address of the HTTP server (`ASWA_SERVER_ADDRESS`).
pub fn server_addr() -> String {
    env::var("ASWA_SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Tunables of the discovery engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Tracks fetched on startup.
    pub preload_count: usize,
    /// Served ids remembered before the seen set is cleared.
    pub seen_capacity: usize,
    /// Refill once this many or fewer tracks remain ahead of the cursor.
    pub refill_threshold: usize,
    /// Tracks fetched per refill.
    pub refill_batch: usize,
    /// Records requested per search, at most 100.
    pub search_limit: u32,
    /// Largest random result offset.
    pub max_offset: u32,
    pub retry: RetryPolicy,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            preload_count: 10,
            seen_capacity: 5000,
            refill_threshold: 3,
            refill_batch: 5,
            search_limit: MAX_SEARCH_LIMIT,
            max_offset: 200,
            retry: RetryPolicy::default(),
        }
    }
}

impl DiscoveryConfig {
    /// Builds the configuration from `ASWA_*` environment variables, using
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let retry = RetryPolicy {
            max_attempts: env_or("ASWA_MAX_ATTEMPTS", defaults.retry.max_attempts),
            strategies_per_attempt: env_or(
                "ASWA_STRATEGIES_PER_ATTEMPT",
                defaults.retry.strategies_per_attempt,
            ),
            request_timeout: Duration::from_secs(env_or(
                "ASWA_REQUEST_TIMEOUT_SECS",
                defaults.retry.request_timeout.as_secs(),
            )),
            backoff: Duration::from_millis(env_or(
                "ASWA_BACKOFF_MS",
                defaults.retry.backoff.as_millis() as u64,
            )),
        };

        Self {
            preload_count: env_or("ASWA_PRELOAD_COUNT", defaults.preload_count),
            seen_capacity: env_or("ASWA_SEEN_CAPACITY", defaults.seen_capacity),
            refill_threshold: env_or("ASWA_REFILL_THRESHOLD", defaults.refill_threshold),
            refill_batch: env_or("ASWA_REFILL_BATCH", defaults.refill_batch),
            search_limit: env_or("ASWA_SEARCH_LIMIT", defaults.search_limit).min(MAX_SEARCH_LIMIT),
            max_offset: env_or("ASWA_MAX_OFFSET", defaults.max_offset),
            retry,
        }
    }
}

/// Shorthand for [`DiscoveryConfig::from_env`].
pub fn discovery_config() -> DiscoveryConfig {
    DiscoveryConfig::from_env()
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring invalid value {:?} for {}", raw, key);
                default
            }
        },
        Err(_) => default,
    }
}
