// crates/qualreg-config/src/env.rs
// ============================================================================
// Module: Load Run Environment
// Description: Environment-backed configuration for suite runs.
// Purpose: Centralize env parsing with strict UTF-8 validation and bounds.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid
//! silent misconfiguration. Invalid UTF-8, empty strings, and out-of-bounds
//! numbers fail closed. `ENDPOINT_URL` keeps its historical name; every
//! other knob lives under the `QUALREG_` prefix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::thresholds::Thresholds;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default target base URL when `ENDPOINT_URL` is unset.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8506";
/// Default number of virtual users.
const DEFAULT_VIRTUAL_USERS: u32 = 1;
/// Default suite iterations per virtual user.
const DEFAULT_ITERATIONS: u32 = 1;
/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default pause between scenario groups in milliseconds.
const DEFAULT_SLEEP_MS: u64 = 100;
/// Upper bound on virtual users.
const MAX_VIRTUAL_USERS: u32 = 1024;
/// Upper bound on suite iterations per virtual user.
const MAX_ITERATIONS: u32 = 100_000;
/// Upper bound on the per-request timeout in seconds.
const MAX_TIMEOUT_SECS: u64 = 600;
/// Upper bound on the inter-group pause in milliseconds.
const MAX_SLEEP_MS: u64 = 60_000;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTestEnv {
    /// Target base URL of the service under test.
    EndpointUrl,
    /// Number of concurrent virtual users.
    VirtualUsers,
    /// Suite iterations per virtual user.
    Iterations,
    /// Per-request timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Pause between scenario groups in milliseconds.
    SleepMillis,
    /// Optional artifact run-root override.
    RunRoot,
    /// Latency threshold: maximum allowed p99 in milliseconds.
    MaxP99Millis,
    /// Check threshold: minimum allowed pass rate (0.0 to 1.0).
    MinCheckRate,
}

impl LoadTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndpointUrl => "ENDPOINT_URL",
            Self::VirtualUsers => "QUALREG_VUS",
            Self::Iterations => "QUALREG_ITERATIONS",
            Self::TimeoutSeconds => "QUALREG_TIMEOUT_SEC",
            Self::SleepMillis => "QUALREG_SLEEP_MS",
            Self::RunRoot => "QUALREG_RUN_ROOT",
            Self::MaxP99Millis => "QUALREG_MAX_P99_MS",
            Self::MinCheckRate => "QUALREG_MIN_CHECK_RATE",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised when an environment value fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The variable contained invalid UTF-8.
    #[error("{name} must be valid UTF-8")]
    NotUtf8 {
        /// Environment variable name.
        name: &'static str,
    },
    /// The variable was set but empty or whitespace.
    #[error("{name} must not be empty")]
    Empty {
        /// Environment variable name.
        name: &'static str,
    },
    /// The variable failed semantic validation.
    #[error("{name} {reason}")]
    Invalid {
        /// Environment variable name.
        name: &'static str,
        /// Validation failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed run configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadConfig {
    /// Target base URL of the service under test.
    pub endpoint_url: Url,
    /// Number of concurrent virtual users.
    pub virtual_users: u32,
    /// Suite iterations per virtual user.
    pub iterations: u32,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Pause between scenario groups.
    pub group_sleep: Duration,
    /// Optional artifact run-root override.
    pub run_root: Option<PathBuf>,
    /// Pass/fail thresholds for the whole run.
    pub thresholds: Thresholds,
}

impl LoadConfig {
    /// Loads configuration from environment variables over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an environment value is not valid UTF-8,
    /// is empty, or fails bounds validation.
    pub fn load() -> Result<Self, ConfigError> {
        let endpoint_url = match read_env_nonempty(LoadTestEnv::EndpointUrl.as_str())? {
            Some(raw) => parse_endpoint(LoadTestEnv::EndpointUrl.as_str(), &raw)?,
            None => parse_endpoint(LoadTestEnv::EndpointUrl.as_str(), DEFAULT_ENDPOINT_URL)?,
        };
        let virtual_users = read_bounded_u32(
            LoadTestEnv::VirtualUsers.as_str(),
            DEFAULT_VIRTUAL_USERS,
            MAX_VIRTUAL_USERS,
        )?;
        let iterations =
            read_bounded_u32(LoadTestEnv::Iterations.as_str(), DEFAULT_ITERATIONS, MAX_ITERATIONS)?;
        let timeout_secs = read_bounded_u64(
            LoadTestEnv::TimeoutSeconds.as_str(),
            DEFAULT_TIMEOUT_SECS,
            MAX_TIMEOUT_SECS,
        )?;
        let sleep_ms = read_bounded_millis(
            LoadTestEnv::SleepMillis.as_str(),
            DEFAULT_SLEEP_MS,
            MAX_SLEEP_MS,
        )?;
        let run_root = read_env_nonempty(LoadTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let thresholds = Thresholds {
            max_p99_ms: read_bounded_u64(
                LoadTestEnv::MaxP99Millis.as_str(),
                Thresholds::DEFAULT_MAX_P99_MS,
                Thresholds::MAX_MAX_P99_MS,
            )?,
            min_check_rate: read_check_rate(LoadTestEnv::MinCheckRate.as_str())?,
        };
        Ok(Self {
            endpoint_url,
            virtual_users,
            iterations,
            request_timeout: Duration::from_secs(timeout_secs),
            group_sleep: Duration::from_millis(sleep_ms),
            run_root,
            thresholds,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::NotUtf8`] when the value contains invalid UTF-8.
pub fn read_env_strict(name: &'static str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::NotUtf8 {
            name,
        })
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &'static str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty {
            name,
        }),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses and validates the endpoint base URL.
fn parse_endpoint(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::Invalid {
        name,
        reason: format!("must be a valid URL: {err}"),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            name,
            reason: "must use the http or https scheme".to_string(),
        });
    }
    Ok(url)
}

/// Reads a positive bounded integer, applying the default when unset.
fn read_bounded_u32(name: &'static str, default: u32, max: u32) -> Result<u32, ConfigError> {
    let Some(raw) = read_env_nonempty(name)? else {
        return Ok(default);
    };
    let value: u32 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: "must be a positive integer".to_string(),
    })?;
    if value == 0 || value > max {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("must be between 1 and {max}"),
        });
    }
    Ok(value)
}

/// Reads a positive bounded 64-bit integer, applying the default when unset.
fn read_bounded_u64(name: &'static str, default: u64, max: u64) -> Result<u64, ConfigError> {
    let Some(raw) = read_env_nonempty(name)? else {
        return Ok(default);
    };
    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: "must be a positive integer".to_string(),
    })?;
    if value == 0 || value > max {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("must be between 1 and {max}"),
        });
    }
    Ok(value)
}

/// Reads a bounded millisecond value; zero disables the pause.
fn read_bounded_millis(name: &'static str, default: u64, max: u64) -> Result<u64, ConfigError> {
    let Some(raw) = read_env_nonempty(name)? else {
        return Ok(default);
    };
    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: "must be a non-negative integer".to_string(),
    })?;
    if value > max {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("must be at most {max}"),
        });
    }
    Ok(value)
}

/// Reads the minimum check rate, a fraction between 0.0 and 1.0.
fn read_check_rate(name: &'static str) -> Result<f64, ConfigError> {
    let Some(raw) = read_env_nonempty(name)? else {
        return Ok(Thresholds::DEFAULT_MIN_CHECK_RATE);
    };
    let value: f64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: "must be a number between 0.0 and 1.0".to_string(),
    })?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be between 0.0 and 1.0".to_string(),
        });
    }
    Ok(value)
}
