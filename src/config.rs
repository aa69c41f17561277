//! Registry configuration.
//!
//! Settings come from code, from environment variables (`IOC_` prefix) or,
//! with the `config` feature, from JSON.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{IocError, IocResult};

const DEFAULT_PREFIX: &str = "IOC";

/// Registry settings
///
/// # Examples
///
/// ```rust
/// use token_ioc::{Registry, RegistryConfig};
///
/// let config = RegistryConfig {
///     name: "services".to_string(),
///     initial_capacity: 32,
///     trace_resolutions: false,
/// };
/// let registry = Registry::with_config(&config);
/// assert_eq!(registry.name(), "services");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RegistryConfig {
    /// Name used in log output
    pub name: String,
    /// Number of bindings to reserve room for
    pub initial_capacity: usize,
    /// Install a [`LoggingObserver`](crate::LoggingObserver) on construction
    pub trace_resolutions: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "registry".to_string(),
            initial_capacity: 0,
            trace_resolutions: false,
        }
    }
}

impl RegistryConfig {
    /// Reads `IOC_REGISTRY_NAME`, `IOC_INITIAL_CAPACITY` and
    /// `IOC_TRACE_RESOLUTIONS`, keeping defaults for unset variables.
    pub fn from_env() -> IocResult<Self> {
        Self::from_env_with_prefix(DEFAULT_PREFIX)
    }

    /// Like [`from_env`](Self::from_env) with a custom variable prefix.
    pub fn from_env_with_prefix(prefix: &str) -> IocResult<Self> {
        let mut config = Self::default();
        let var = |key: &str| env::var(format!("{}_{}", prefix, key)).ok();

        if let Some(name) = var("REGISTRY_NAME") {
            config.name = name;
        }
        if let Some(raw) = var("INITIAL_CAPACITY") {
            config.initial_capacity = raw.trim().parse().map_err(|_| {
                IocError::Config(format!("{}_INITIAL_CAPACITY is not a number: {}", prefix, raw))
            })?;
        }
        if let Some(raw) = var("TRACE_RESOLUTIONS") {
            config.trace_resolutions = parse_bool(&raw).ok_or_else(|| {
                IocError::Config(format!("{}_TRACE_RESOLUTIONS is not a boolean: {}", prefix, raw))
            })?;
        }
        Ok(config)
    }

    /// Parses a JSON object; missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json_str(json: &str) -> IocResult<Self> {
        serde_json::from_str(json).map_err(|e| IocError::Config(e.to_string()))
    }

    /// Serializes the configuration as JSON.
    #[cfg(feature = "config")]
    pub fn to_json_string(&self) -> IocResult<String> {
        serde_json::to_string(self).map_err(|e| IocError::Config(e.to_string()))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
