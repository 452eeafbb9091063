mod completion;
mod directions;
mod embedder;

pub use completion::ChatCompletion;
pub use directions::OrsDirections;
pub use embedder::HttpEmbedder;

use crate::config::Config;
use crate::error::ProviderError;
use crate::geo::{Coordinate, WalkLeg};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Maps free text to a vector in the catalog's embedding space.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// Foot-walking directions between two points.
#[async_trait]
pub trait DirectionsService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn walking_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
        timeout: Duration,
    ) -> Result<WalkLeg, ProviderError>;
}

/// Single-prompt text generation.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, ProviderError>;
}

/// Stand-in used when a service has no credentials configured.
pub struct Unavailable;

#[async_trait]
impl DirectionsService for Unavailable {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn walking_leg(
        &self,
        _from: Coordinate,
        _to: Coordinate,
        _timeout: Duration,
    ) -> Result<WalkLeg, ProviderError> {
        Err(ProviderError::NotConfigured("directions"))
    }
}

#[async_trait]
impl TextCompletion for Unavailable {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn complete(&self, _prompt: &str, _timeout: Duration) -> Result<String, ProviderError> {
        Err(ProviderError::NotConfigured("completion"))
    }
}

/// Collaborators the planner talks to, constructed once at startup
#[derive(Clone)]
pub struct Services {
    pub embedder: Arc<dyn Embedder>,
    pub directions: Arc<dyn DirectionsService>,
    pub completion: Arc<dyn TextCompletion>,
}

fn api_key(env_name: &str) -> Option<String> {
    std::env::var(env_name).ok().filter(|k| !k.trim().is_empty())
}

/// Create service clients from config, reading API keys from the environment
pub fn create_services(config: &Config) -> Services {
    let client = reqwest::Client::new();

    let directions: Arc<dyn DirectionsService> = match api_key(&config.directions.api_key_env) {
        Some(key) => Arc::new(OrsDirections::new(
            client.clone(),
            config.directions.base_url.clone(),
            key,
        )),
        None => {
            warn!(
                "{} not set; walking times will be estimated from straight-line distance",
                config.directions.api_key_env
            );
            Arc::new(Unavailable)
        }
    };

    let completion: Arc<dyn TextCompletion> = match api_key(&config.completion.api_key_env) {
        Some(key) => Arc::new(ChatCompletion::new(client.clone(), &config.completion, key)),
        None => {
            warn!(
                "{} not set; stop explanations will use the fallback template",
                config.completion.api_key_env
            );
            Arc::new(Unavailable)
        }
    };

    let embedder = Arc::new(HttpEmbedder::new(
        client,
        &config.embedder,
        api_key(&config.embedder.api_key_env),
    ));

    Services {
        embedder,
        directions,
        completion,
    }
}

/// Read a non-success response into a status error
pub(crate) async fn status_error(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ProviderError::Status { status, body }
}
