use super::{status_error, TextCompletion};
use crate::config::CompletionConfig;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout as tokio_timeout;

/// OpenAI-compatible chat completions client
pub struct ChatCompletion {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

impl ChatCompletion {
    pub fn new(client: reqwest::Client, config: &CompletionConfig, api_key: String) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
        }
    }

    async fn request(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "top_p": self.top_p,
            "presence_penalty": 0
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let text = response.text().await?;
        parse_content(&text)
    }
}

#[async_trait]
impl TextCompletion for ChatCompletion {
    fn name(&self) -> &'static str {
        "chat_completion"
    }

    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, ProviderError> {
        tokio_timeout(timeout, self.request(prompt))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
    }
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

fn parse_content(raw: &str) -> Result<String, ProviderError> {
    let parsed: ApiResponse = serde_json::from_str(raw)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "empty completion".to_string(),
        ));
    }
    Ok(content)
}
