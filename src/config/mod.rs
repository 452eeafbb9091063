mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;

/// Upper bound on candidates sent to duration resolution per request
pub const MAX_CANDIDATES: usize = 20;

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            max_time_hours: default_max_time_hours(),
            concurrency: default_concurrency(),
            planner: PlannerConfig::default(),
            directions: DirectionsConfig::default(),
            completion: CompletionConfig::default(),
            embedder: EmbedderConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_time_hours > 0.0) {
            return Err(invalid("max_time_hours", "must be positive"));
        }
        if self.concurrency == 0 {
            return Err(invalid("concurrency", "must be at least 1"));
        }
        if !(self.planner.walking_speed_kmh > 0.0) {
            return Err(invalid("planner.walking_speed_kmh", "must be positive"));
        }
        if self.planner.max_candidates == 0 || self.planner.max_candidates > MAX_CANDIDATES {
            return Err(invalid(
                "planner.max_candidates",
                format!("must be between 1 and {}", MAX_CANDIDATES),
            ));
        }
        if self.planner.max_stops == 0 {
            return Err(invalid("planner.max_stops", "must be at least 1"));
        }
        if self.planner.visit.default_minutes < 0.0 {
            return Err(invalid("planner.visit.default_minutes", "must not be negative"));
        }
        for rule in &self.planner.visit.rules {
            if rule.token.trim().is_empty() {
                return Err(invalid("planner.visit.rules", "token must not be empty"));
            }
            if rule.minutes < 0.0 {
                return Err(invalid(
                    "planner.visit.rules",
                    format!("minutes for '{}' must not be negative", rule.token),
                ));
            }
        }
        if self.completion.retry.max_attempts == 0 {
            return Err(invalid("completion.retry.max_attempts", "must be at least 1"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
