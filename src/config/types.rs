use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    /// Path to the place catalog (JSON array of places with embeddings)
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// Largest accepted time budget, in hours
    #[serde(default = "default_max_time_hours")]
    pub max_time_hours: f64,

    /// Max external calls in flight per fan-out
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default)]
    pub planner: PlannerConfig,

    #[serde(default)]
    pub directions: DirectionsConfig,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub embedder: EmbedderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PlannerConfig {
    #[serde(default = "default_walking_speed_kmh")]
    pub walking_speed_kmh: f64,

    /// Candidates kept after the radius filter
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    #[serde(default = "default_max_stops")]
    pub max_stops: usize,

    #[serde(default)]
    pub visit: VisitConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            walking_speed_kmh: default_walking_speed_kmh(),
            max_candidates: default_max_candidates(),
            max_stops: default_max_stops(),
            visit: VisitConfig::default(),
        }
    }
}

/// Visit duration heuristics: first matching rule wins
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct VisitConfig {
    #[serde(default = "default_visit_minutes")]
    pub default_minutes: f64,

    #[serde(default = "default_visit_rules")]
    pub rules: Vec<VisitRule>,
}

impl Default for VisitConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_visit_minutes(),
            rules: default_visit_rules(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct VisitRule {
    /// Case-insensitive substring matched against title and description
    pub token: String,

    pub minutes: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct DirectionsConfig {
    #[serde(default = "default_directions_url")]
    pub base_url: String,

    #[serde(default = "default_directions_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_directions_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_directions_url(),
            api_key_env: default_directions_key_env(),
            timeout_sec: default_directions_timeout_sec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CompletionConfig {
    #[serde(default = "default_completion_url")]
    pub base_url: String,

    #[serde(default = "default_completion_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_completion_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_completion_timeout_sec")]
    pub timeout_sec: u64,

    #[serde(default)]
    pub retry: RetryConfig,

    /// Placeholders: `{interests}`, `{title}`, `{description}`
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    /// Placeholder: `{interests}`
    #[serde(default = "default_fallback_template")]
    pub fallback_template: String,

    /// Description characters included in the prompt
    #[serde(default = "default_description_chars")]
    pub description_chars: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_completion_url(),
            api_key_env: default_completion_key_env(),
            model: default_completion_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            timeout_sec: default_completion_timeout_sec(),
            retry: RetryConfig::default(),
            prompt_template: default_prompt_template(),
            fallback_template: default_fallback_template(),
            description_chars: default_description_chars(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct EmbedderConfig {
    #[serde(default = "default_embedder_url")]
    pub base_url: String,

    #[serde(default = "default_embedder_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_embedder_model")]
    pub model: String,

    #[serde(default = "default_embedder_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedder_url(),
            api_key_env: default_embedder_key_env(),
            model: default_embedder_model(),
            timeout_sec: default_embedder_timeout_sec(),
        }
    }
}
