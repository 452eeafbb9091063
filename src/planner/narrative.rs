//! Per-stop explanations from the text-completion service

use crate::catalog::Place;
use crate::config::{CompletionConfig, RetryConfig};
use crate::error::PlannerError;
use crate::provider::TextCompletion;
use futures::stream::{FuturesUnordered, StreamExt};
use regex::{Captures, Regex};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::retry::with_retry;
use super::types::RouteStep;

pub struct NarrativeGenerator {
    completion: Arc<dyn TextCompletion>,
    timeout: Duration,
    retry: RetryConfig,
    prompt_template: String,
    fallback_template: String,
    description_chars: usize,
    semaphore: Arc<Semaphore>,
}

impl NarrativeGenerator {
    pub fn new(
        completion: Arc<dyn TextCompletion>,
        config: &CompletionConfig,
        semaphore: Arc<Semaphore>,
    ) -> Self {
        Self {
            completion,
            timeout: Duration::from_secs(config.timeout_sec),
            retry: config.retry.clone(),
            prompt_template: config.prompt_template.clone(),
            fallback_template: config.fallback_template.clone(),
            description_chars: config.description_chars,
            semaphore,
        }
    }

    pub fn build_prompt(&self, interests: &str, place: &Place) -> String {
        let description: String = place.description.chars().take(self.description_chars).collect();
        render(
            &self.prompt_template,
            &[
                ("interests", interests),
                ("title", place.title.as_str()),
                ("description", description.as_str()),
            ],
        )
    }

    pub fn fallback(&self, interests: &str) -> String {
        render(&self.fallback_template, &[("interests", interests)])
    }

    /// One explanation per step, in step order. Never fails on a single
    /// stop: failed requests get the fallback sentence.
    pub async fn explain_all(
        &self,
        interests: &str,
        steps: &[RouteStep<'_>],
    ) -> Result<Vec<String>, PlannerError> {
        let mut futures = FuturesUnordered::new();

        for (idx, step) in steps.iter().enumerate() {
            let permit = self.semaphore.clone().acquire_owned().await?;
            let completion = self.completion.clone();
            let retry = self.retry.clone();
            let timeout = self.timeout;
            let prompt = self.build_prompt(interests, step.place);
            let title = step.place.title.clone();

            futures.push(tokio::spawn(async move {
                let _permit = permit;
                let result = with_retry(&retry, &title, || {
                    let completion = completion.clone();
                    let prompt = prompt.clone();
                    async move { completion.complete(&prompt, timeout).await }
                })
                .await;
                match result {
                    Ok(text) => (idx, Some(text)),
                    Err(e) => {
                        warn!("{} explanation for '{}' failed: {}", completion.name(), title, e);
                        (idx, None)
                    }
                }
            }));
        }

        let mut texts: Vec<Option<String>> = vec![None; steps.len()];
        while let Some(result) = futures.next().await {
            match result {
                Ok((idx, text)) => texts[idx] = text,
                Err(e) => warn!("Explanation task panicked: {}", e),
            }
        }

        let fallbacks = texts.iter().filter(|t| t.is_none()).count();
        debug!(
            "Generated {} explanations ({} fallback)",
            steps.len(),
            fallbacks
        );

        Ok(texts
            .into_iter()
            .map(|t| t.unwrap_or_else(|| self.fallback(interests)))
            .collect())
    }
}

/// Substitute `{key}` placeholders in one pass, so values containing braces
/// are never re-expanded. Unknown placeholders are left as written.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let Ok(re) = Regex::new(r"\{([a-z_]+)\}") else {
        return template.to_string();
    };
    re.replace_all(template, |caps: &Captures| {
        let key = &caps[1];
        values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::planner::testing::{place, StubCompletion, ORIGIN};

    fn generator_with(completion: Arc<StubCompletion>, retry: RetryConfig) -> NarrativeGenerator {
        let mut config = CompletionConfig::default();
        config.retry = retry;
        NarrativeGenerator::new(completion, &config, Arc::new(Semaphore::new(20)))
    }

    fn generator(completion: Arc<StubCompletion>) -> NarrativeGenerator {
        generator_with(
            completion,
            RetryConfig {
                max_attempts: 1,
                backoff_base_ms: 0,
            },
        )
    }

    fn step(place: &Place) -> RouteStep<'_> {
        RouteStep {
            place,
            walk_minutes: 5.0,
            walk_distance_m: 400.0,
            visit_minutes: 25.0,
            elapsed_minutes: 30.0,
        }
    }

    #[test]
    fn test_render_single_pass() {
        let out = render(
            "«{interests}» / {title} / {unknown}",
            &[("interests", "{title}"), ("title", "Кремль")],
        );
        assert_eq!(out, "«{title}» / Кремль / {unknown}");
    }

    #[test]
    fn test_prompt_truncates_description_by_chars() {
        let gen = generator(StubCompletion::down());
        let long = "ж".repeat(1000);
        let p = place("Кремль", &long, ORIGIN, &[1.0]);
        let prompt = gen.build_prompt("история", &p);
        assert!(prompt.contains(&"ж".repeat(600)));
        assert!(!prompt.contains(&"ж".repeat(601)));
        assert!(prompt.contains("«история»"));
        assert!(prompt.contains("«Кремль»"));
    }

    #[test]
    fn test_fallback_mentions_interests() {
        let gen = generator(StubCompletion::down());
        assert_eq!(
            gen.fallback("архитектура"),
            "Подобрано по вашему интересу: «архитектура»."
        );
    }

    #[tokio::test]
    async fn test_one_failure_does_not_affect_others() {
        let completion = StubCompletion::new(|prompt| {
            if prompt.contains("«B»") {
                Err(ProviderError::Status {
                    status: 429,
                    body: "quota".to_string(),
                })
            } else {
                Ok("Здесь вы сможете отдохнуть.".to_string())
            }
        });
        let gen = generator(completion.clone());
        let places = vec![
            place("A", "", ORIGIN, &[1.0]),
            place("B", "", ORIGIN, &[1.0]),
            place("C", "", ORIGIN, &[1.0]),
        ];
        let steps: Vec<_> = places.iter().map(step).collect();

        let texts = gen.explain_all("парки", &steps).await.unwrap();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0], "Здесь вы сможете отдохнуть.");
        assert_eq!(texts[1], "Подобрано по вашему интересу: «парки».");
        assert_eq!(texts[2], "Здесь вы сможете отдохнуть.");
        assert_eq!(completion.calls(), 3);
    }

    #[tokio::test]
    async fn test_results_keep_step_order() {
        // Earlier steps answer later
        let completion = StubCompletion::with_delay(
            |prompt| {
                let title = ["first", "second", "third"]
                    .into_iter()
                    .find(|t| prompt.contains(&format!("«{t}»")))
                    .unwrap_or("?");
                Ok(format!("about {title}"))
            },
            |prompt| {
                if prompt.contains("«first»") {
                    Duration::from_millis(40)
                } else if prompt.contains("«second»") {
                    Duration::from_millis(20)
                } else {
                    Duration::ZERO
                }
            },
        );
        let gen = generator(completion);
        let places = vec![
            place("first", "", ORIGIN, &[1.0]),
            place("second", "", ORIGIN, &[1.0]),
            place("third", "", ORIGIN, &[1.0]),
        ];
        let steps: Vec<_> = places.iter().map(step).collect();

        let texts = gen.explain_all("x", &steps).await.unwrap();
        assert_eq!(texts, vec!["about first", "about second", "about third"]);
    }

    #[tokio::test]
    async fn test_all_down_gives_templates() {
        let gen = generator(StubCompletion::down());
        let places = vec![place("A", "", ORIGIN, &[1.0])];
        let steps: Vec<_> = places.iter().map(step).collect();

        let texts = gen.explain_all("музеи", &steps).await.unwrap();
        assert_eq!(texts, vec!["Подобрано по вашему интересу: «музеи»."]);
    }

    #[tokio::test]
    async fn test_unconfigured_service_falls_back_without_retry() {
        let completion = StubCompletion::new(|_| Err(ProviderError::NotConfigured("completion")));
        // Default policy: 2 attempts with a 500 ms base
        let gen = generator_with(completion.clone(), RetryConfig::default());
        let places = vec![place("A", "", ORIGIN, &[1.0]), place("B", "", ORIGIN, &[1.0])];
        let steps: Vec<_> = places.iter().map(step).collect();

        let started = std::time::Instant::now();
        let texts = gen.explain_all("музеи", &steps).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(500));
        assert_eq!(completion.calls(), 2);
        assert!(texts.iter().all(|t| t == "Подобрано по вашему интересу: «музеи»."));
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let completion = StubCompletion::new(|_| {
            Err(ProviderError::Status {
                status: 503,
                body: "busy".to_string(),
            })
        });
        let gen = generator_with(
            completion.clone(),
            RetryConfig {
                max_attempts: 2,
                backoff_base_ms: 1,
            },
        );
        let places = vec![place("A", "", ORIGIN, &[1.0])];
        let steps: Vec<_> = places.iter().map(step).collect();

        let texts = gen.explain_all("музеи", &steps).await.unwrap();
        assert_eq!(completion.calls(), 2);
        assert_eq!(texts, vec!["Подобрано по вашему интересу: «музеи»."]);
    }
}
