use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Place '{title}' has embedding of dimension {actual}, expected {expected}")]
    DimensionMismatch {
        title: String,
        expected: usize,
        actual: usize,
    },

    #[error("Catalog contains no usable places")]
    Empty,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0} service is not configured")]
    NotConfigured(&'static str),
}

impl ProviderError {
    /// Whether another attempt at the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Timeout(_) | ProviderError::Http(_) => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderError::MalformedResponse(_) | ProviderError::NotConfigured(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid time budget {hours}h: must be greater than 0 and at most {max_hours}h")]
    InvalidTimeBudget { hours: f64, max_hours: f64 },

    #[error("No places found within {radius_km:.2} km of the starting point")]
    NoCandidatesInRadius { radius_km: f64 },

    #[error("No places reachable on foot within the time budget")]
    NoCandidatesWithinDuration,

    #[error("Could not build a route within the time budget")]
    RouteUnbuildable,

    #[error("Failed to embed interests: {0}")]
    Embedding(#[source] ProviderError),

    #[error("Interest embedding has dimension {actual}, catalog uses {expected}")]
    EmbeddingDimension { expected: usize, actual: usize },

    #[error("Failed to acquire semaphore: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write itinerary: {0}")]
    Write(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_provider_errors() {
        let status = |status| ProviderError::Status {
            status,
            body: String::new(),
        };
        assert!(ProviderError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(status(429).is_retryable());
        assert!(status(503).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!ProviderError::MalformedResponse("empty".to_string()).is_retryable());
        assert!(!ProviderError::NotConfigured("completion").is_retryable());
    }
}
