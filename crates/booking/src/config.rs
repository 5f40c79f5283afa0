//! Booking configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MEDIFLUX_STORE_PATH` - JSON file backing the store (default: in-memory)
//! - `MEDIFLUX_KEY_PREFIX` - Namespace prepended to every storage key (default: none)
//! - `MEDIFLUX_TOKEN_MAX_AGE_HOURS` - Session token lifetime (default: 24)
//! - `MEDIFLUX_SIMULATED_LATENCY` - Sleep before each service call (default: true)
//! - `MEDIFLUX_ENFORCE_STATUS_TRANSITIONS` - Reject status changes outside
//!   the appointment lifecycle (default: false)

use std::path::PathBuf;

use chrono::TimeDelta;
use thiserror::Error;

use crate::services::auth::DEFAULT_TOKEN_MAX_AGE_HOURS;
use crate::services::latency::Latency;

const STORE_PATH: &str = "MEDIFLUX_STORE_PATH";
const KEY_PREFIX: &str = "MEDIFLUX_KEY_PREFIX";
const TOKEN_MAX_AGE_HOURS: &str = "MEDIFLUX_TOKEN_MAX_AGE_HOURS";
const SIMULATED_LATENCY: &str = "MEDIFLUX_SIMULATED_LATENCY";
const ENFORCE_STATUS_TRANSITIONS: &str = "MEDIFLUX_ENFORCE_STATUS_TRANSITIONS";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Booking core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// File backing the store; `None` keeps everything in memory
    pub store_path: Option<PathBuf>,
    /// Prefix applied to every storage key
    pub key_prefix: String,
    /// Maximum session token age
    pub token_max_age: TimeDelta,
    /// Whether service calls sleep to mimic network latency
    pub simulated_latency: bool,
    /// Whether status updates must follow the appointment lifecycle
    pub enforce_status_transitions: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            key_prefix: String::new(),
            token_max_age: TimeDelta::hours(DEFAULT_TOKEN_MAX_AGE_HOURS),
            simulated_latency: true,
            enforce_status_transitions: false,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let token_max_age = match get(TOKEN_MAX_AGE_HOURS) {
            Some(raw) => {
                let hours = raw.trim().parse::<u32>().map_err(|e| {
                    ConfigError::InvalidEnvVar(TOKEN_MAX_AGE_HOURS.to_string(), e.to_string())
                })?;
                TimeDelta::hours(i64::from(hours))
            }
            None => defaults.token_max_age,
        };

        Ok(Self {
            store_path: get(STORE_PATH).map(PathBuf::from),
            key_prefix: get(KEY_PREFIX).unwrap_or(defaults.key_prefix),
            token_max_age,
            simulated_latency: get(SIMULATED_LATENCY)
                .map(|raw| parse_bool(SIMULATED_LATENCY, &raw))
                .transpose()?
                .unwrap_or(defaults.simulated_latency),
            enforce_status_transitions: get(ENFORCE_STATUS_TRANSITIONS)
                .map(|raw| parse_bool(ENFORCE_STATUS_TRANSITIONS, &raw))
                .transpose()?
                .unwrap_or(defaults.enforce_status_transitions),
        })
    }

    /// Use `path` as the backing file.
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Turn simulated latency off.
    #[must_use]
    pub const fn without_latency(mut self) -> Self {
        self.simulated_latency = false;
        self
    }

    /// The latency switch the services should use.
    #[must_use]
    pub const fn latency(&self) -> Latency {
        if self.simulated_latency {
            Latency::simulated()
        } else {
            Latency::none()
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
