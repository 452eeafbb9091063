use super::{status_error, DirectionsService};
use crate::error::ProviderError;
use crate::geo::{Coordinate, WalkLeg};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout as tokio_timeout;

/// openrouteservice foot-walking directions
pub struct OrsDirections {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl OrsDirections {
    pub fn new(client: reqwest::Client, url: String, api_key: String) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    async fn request(&self, from: Coordinate, to: Coordinate) -> Result<WalkLeg, ProviderError> {
        // ORS takes [lon, lat] pairs
        let body = serde_json::json!({
            "coordinates": [[from.lon, from.lat], [to.lon, to.lat]]
        });

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let text = response.text().await?;
        parse_leg(&text)
    }
}

#[async_trait]
impl DirectionsService for OrsDirections {
    fn name(&self) -> &'static str {
        "openrouteservice"
    }

    async fn walking_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
        timeout: Duration,
    ) -> Result<WalkLeg, ProviderError> {
        tokio_timeout(timeout, self.request(from, to))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
    }
}

#[derive(Deserialize)]
struct Segment {
    duration: f64,
    distance: f64,
}

#[derive(Deserialize)]
struct Route {
    segments: Vec<Segment>,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    routes: Vec<Route>,
}

/// Extract the first segment of the first route
fn parse_leg(raw: &str) -> Result<WalkLeg, ProviderError> {
    let parsed: DirectionsResponse = serde_json::from_str(raw)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let segment = parsed
        .routes
        .first()
        .and_then(|r| r.segments.first())
        .ok_or_else(|| ProviderError::MalformedResponse("no route segments".to_string()))?;

    let valid = |v: f64| v.is_finite() && v >= 0.0;
    if !valid(segment.duration) || !valid(segment.distance) {
        return Err(ProviderError::MalformedResponse(format!(
            "invalid segment duration={} distance={}",
            segment.duration, segment.distance
        )));
    }

    Ok(WalkLeg {
        duration_sec: segment.duration,
        distance_m: segment.distance,
    })
}
