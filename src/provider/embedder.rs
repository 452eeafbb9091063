use super::{status_error, Embedder};
use crate::config::EmbedderConfig;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout as tokio_timeout;

/// OpenAI-compatible `/embeddings` client.
///
/// The model must be the one the catalog embeddings were produced with.
pub struct HttpEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl HttpEmbedder {
    pub fn new(client: reqwest::Client, config: &EmbedderConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_sec),
        }
    }

    async fn request(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut request = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .json(&serde_json::json!({
                "model": &self.model,
                "input": text
            }));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let text = response.text().await?;
        parse_embedding(&text)
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        tokio_timeout(self.timeout, self.request(text))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))?
    }
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

fn parse_embedding(raw: &str) -> Result<Vec<f32>, ProviderError> {
    let parsed: EmbeddingResponse = serde_json::from_str(raw)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
    parsed
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ProviderError::MalformedResponse("no embedding returned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embedding() {
        let raw = r#"{"object": "list", "data": [{"index": 0, "embedding": [0.1, -0.2, 0.3]}]}"#;
        assert_eq!(parse_embedding(raw).unwrap(), vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_parse_embedding_empty() {
        assert!(parse_embedding(r#"{"data": []}"#).is_err());
        assert!(parse_embedding(r#"{"data": [{"embedding": []}]}"#).is_err());
    }
}
