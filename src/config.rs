//! Engine configuration.
//!
//! Defaults can be overridden from a JSON file named by `RIFTBOT_CONFIG` and
//! then by individual `RIFTBOT_<NAME>` environment variables, which go through
//! the same `set_option` path as named options.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::strategy::FallbackPool;
use crate::world::TURN_BUDGET_MS;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "RIFTBOT_CONFIG";

/// Prefix for per-option environment overrides.
const OPTION_ENV_PREFIX: &str = "RIFTBOT_";

/// Default number of turn summaries kept in the rolling history.
const DEFAULT_HISTORY_LEN: usize = 8;

/// Largest accepted rolling history length.
pub const MAX_HISTORY_LEN: usize = 1024;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Which movement policy drives pods each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Never move.
    #[default]
    Hold,
    /// Push one pod per zone towards the richest adjacent zone not yet ours.
    Expand,
}

impl MovementKind {
    fn from_name(s: &str) -> Option<MovementKind> {
        match s.to_ascii_lowercase().as_str() {
            "hold" => Some(MovementKind::Hold),
            "expand" => Some(MovementKind::Expand),
            _ => None,
        }
    }
}

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Random seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub movement: MovementKind,
    /// Pool the random acquisition fallback draws from.
    pub fallback: FallbackPool,
    /// Number of turn summaries retained for strategies.
    pub history_len: usize,
    /// Per-turn time budget (milliseconds); overruns are logged, not enforced.
    pub turn_budget_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            seed: None,
            movement: MovementKind::Hold,
            fallback: FallbackPool::NeutralOnly,
            history_len: DEFAULT_HISTORY_LEN,
            turn_budget_ms: TURN_BUDGET_MS,
        }
    }
}

impl EngineConfig {
    /// Parses a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value bounds that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_len > MAX_HISTORY_LEN {
            return Err(ConfigError::InvalidValue {
                name: "history_len".to_string(),
                value: self.history_len.to_string(),
            });
        }
        Ok(())
    }

    /// Loads a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Builds a config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Builds a config from `(name, value)` pairs shaped like environment
    /// variables. Variables without the `RIFTBOT_` prefix are ignored.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let mut config = match vars.iter().find(|(k, _)| k == CONFIG_ENV) {
            Some((_, path)) => Self::from_file(Path::new(path))?,
            None => EngineConfig::default(),
        };

        for (key, value) in &vars {
            if key == CONFIG_ENV {
                continue;
            }
            if let Some(name) = key.strip_prefix(OPTION_ENV_PREFIX) {
                config.set_option(name, value)?;
            }
        }

        Ok(config)
    }

    /// Sets a single named option. Names are case-insensitive.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        let value = value.trim();

        match name.to_ascii_lowercase().as_str() {
            "seed" => {
                self.seed = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| invalid())?)
                };
            }
            "movement" => {
                self.movement = MovementKind::from_name(value).ok_or_else(invalid)?;
            }
            "fallback" => {
                self.fallback = FallbackPool::from_name(value).ok_or_else(invalid)?;
            }
            "history_len" => {
                let len: usize = value.parse().map_err(|_| invalid())?;
                if len > MAX_HISTORY_LEN {
                    return Err(invalid());
                }
                self.history_len = len;
            }
            "turn_budget_ms" => {
                self.turn_budget_ms = value.parse().map_err(|_| invalid())?;
            }
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}
