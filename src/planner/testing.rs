//! Collaborator doubles shared by planner tests

use crate::catalog::{Catalog, Place};
use crate::error::ProviderError;
use crate::geo::{estimate_leg, Coordinate, WalkLeg};
use crate::provider::{DirectionsService, Embedder, TextCompletion};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ORIGIN: Coordinate = Coordinate::new(56.3269, 44.0059);

pub fn place(title: &str, description: &str, location: Coordinate, embedding: &[f32]) -> Place {
    Place {
        title: title.to_string(),
        description: description.to_string(),
        location,
        embedding: Some(embedding.to_vec()),
    }
}

pub fn catalog(places: Vec<Place>) -> Arc<Catalog> {
    Arc::new(Catalog::new(places).unwrap())
}

/// Point due east of `origin` at roughly `km` kilometers.
pub fn east_of(origin: Coordinate, km: f64) -> Coordinate {
    let d_lon = (km / (crate::geo::EARTH_RADIUS_KM * origin.lat.to_radians().cos())).to_degrees();
    Coordinate::new(origin.lat, origin.lon + d_lon)
}

pub struct FixedEmbedder {
    pub vector: Vec<f32>,
    pub calls: AtomicUsize,
}

impl FixedEmbedder {
    pub fn new(vector: &[f32]) -> Arc<Self> {
        Arc::new(Self {
            vector: vector.to_vec(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector.clone())
    }
}

type LegFn = dyn Fn(Coordinate, Coordinate) -> Result<WalkLeg, ProviderError> + Send + Sync;

/// Directions double driven by a closure
pub struct StubDirections {
    leg: Box<LegFn>,
    pub calls: AtomicUsize,
}

impl StubDirections {
    pub fn new(
        leg: impl Fn(Coordinate, Coordinate) -> Result<WalkLeg, ProviderError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            leg: Box::new(leg),
            calls: AtomicUsize::new(0),
        })
    }

    /// Every lookup fails as if the service were unreachable
    pub fn down() -> Arc<Self> {
        Self::new(|_, _| Err(ProviderError::Status {
            status: 503,
            body: "unavailable".to_string(),
        }))
    }

    /// Straight-line legs at the given speed
    pub fn straight_line(speed_kmh: f64) -> Arc<Self> {
        Self::new(move |from, to| Ok(estimate_leg(from, to, speed_kmh)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectionsService for StubDirections {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn walking_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
        _timeout: Duration,
    ) -> Result<WalkLeg, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.leg)(from, to)
    }
}

type CompleteFn = dyn Fn(&str) -> Result<String, ProviderError> + Send + Sync;

/// Completion double driven by a closure; records every prompt
pub struct StubCompletion {
    reply: Box<CompleteFn>,
    delay: Box<dyn Fn(&str) -> Duration + Send + Sync>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn new(
        reply: impl Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Self::with_delay(reply, |_| Duration::ZERO)
    }

    pub fn with_delay(
        reply: impl Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static,
        delay: impl Fn(&str) -> Duration + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            delay: Box::new(delay),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn down() -> Arc<Self> {
        Self::new(|_| Err(ProviderError::Timeout(Duration::from_secs(30))))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextCompletion for StubCompletion {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(&self, prompt: &str, _timeout: Duration) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let delay = (self.delay)(prompt);
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
        (self.reply)(prompt)
    }
}
