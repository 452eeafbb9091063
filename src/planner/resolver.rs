//! Walking-time resolution with straight-line fallback

use crate::error::PlannerError;
use crate::geo::{estimate_leg, Coordinate, WalkLeg};
use crate::provider::DirectionsService;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Outcome of a single directions lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegLookup {
    Resolved(WalkLeg),
    Unavailable,
}

impl LegLookup {
    /// Resolved leg, or one estimated from straight-line distance
    pub fn or_estimate(self, from: Coordinate, to: Coordinate, speed_kmh: f64) -> WalkLeg {
        match self {
            LegLookup::Resolved(leg) => leg,
            LegLookup::Unavailable => estimate_leg(from, to, speed_kmh),
        }
    }
}

/// A destination to resolve, labelled for logging
#[derive(Debug, Clone)]
pub struct Target {
    pub label: String,
    pub location: Coordinate,
}

pub struct DurationResolver {
    directions: Arc<dyn DirectionsService>,
    timeout: Duration,
    speed_kmh: f64,
    semaphore: Arc<Semaphore>,
}

impl DurationResolver {
    pub fn new(
        directions: Arc<dyn DirectionsService>,
        timeout: Duration,
        speed_kmh: f64,
        semaphore: Arc<Semaphore>,
    ) -> Self {
        Self {
            directions,
            timeout,
            speed_kmh,
            semaphore,
        }
    }

    /// Resolve legs from `from` to every target concurrently. The result is
    /// in target order and always complete: unavailable lookups are replaced
    /// by the straight-line estimate.
    pub async fn resolve_from(
        &self,
        from: Coordinate,
        targets: &[Target],
    ) -> Result<Vec<WalkLeg>, PlannerError> {
        let mut futures = FuturesUnordered::new();

        for (idx, target) in targets.iter().enumerate() {
            let permit = self.semaphore.clone().acquire_owned().await?;
            let directions = self.directions.clone();
            let timeout = self.timeout;
            let target = target.clone();

            futures.push(tokio::spawn(async move {
                let _permit = permit;
                let lookup =
                    lookup_leg(directions.as_ref(), from, target.location, timeout, &target.label)
                        .await;
                (idx, lookup)
            }));
        }

        let mut lookups = vec![LegLookup::Unavailable; targets.len()];
        while let Some(result) = futures.next().await {
            match result {
                Ok((idx, lookup)) => lookups[idx] = lookup,
                Err(e) => warn!("Duration lookup task panicked: {}", e),
            }
        }

        let estimated = lookups
            .iter()
            .filter(|l| **l == LegLookup::Unavailable)
            .count();
        if estimated > 0 {
            debug!(
                "{} of {} legs from {} estimated from straight-line distance",
                estimated,
                targets.len(),
                from
            );
        }

        Ok(lookups
            .into_iter()
            .zip(targets)
            .map(|(lookup, target)| lookup.or_estimate(from, target.location, self.speed_kmh))
            .collect())
    }
}

/// Single lookup; failures come back as `Unavailable`
async fn lookup_leg(
    directions: &dyn DirectionsService,
    from: Coordinate,
    to: Coordinate,
    timeout: Duration,
    label: &str,
) -> LegLookup {
    match directions.walking_leg(from, to, timeout).await {
        Ok(leg) if leg.duration_sec.is_finite() && leg.duration_sec >= 0.0 => {
            LegLookup::Resolved(leg)
        }
        Ok(leg) => {
            warn!(
                "{} returned invalid duration {} for '{}'",
                directions.name(),
                leg.duration_sec,
                label
            );
            LegLookup::Unavailable
        }
        Err(e) => {
            warn!("{} lookup for '{}' failed: {}", directions.name(), label, e);
            LegLookup::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::north_of;
    use crate::planner::testing::{StubDirections, ORIGIN};

    fn resolver(directions: Arc<StubDirections>) -> DurationResolver {
        DurationResolver::new(
            directions,
            Duration::from_secs(10),
            5.0,
            Arc::new(Semaphore::new(4)),
        )
    }

    fn targets(kms: &[f64]) -> Vec<Target> {
        kms.iter()
            .map(|km| Target {
                label: format!("{km} km"),
                location: north_of(ORIGIN, *km),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_lookup_unavailable_when_service_down() {
        let directions = StubDirections::down();
        let lookup = lookup_leg(
            directions.as_ref(),
            ORIGIN,
            north_of(ORIGIN, 1.0),
            Duration::from_secs(10),
            "a",
        )
        .await;
        assert_eq!(lookup, LegLookup::Unavailable);
    }

    #[tokio::test]
    async fn test_lookup_rejects_negative_duration() {
        let directions = StubDirections::new(|_, _| {
            Ok(WalkLeg {
                duration_sec: -5.0,
                distance_m: 10.0,
            })
        });
        let lookup =
            lookup_leg(directions.as_ref(), ORIGIN, ORIGIN, Duration::from_secs(10), "a").await;
        assert_eq!(lookup, LegLookup::Unavailable);
    }

    #[tokio::test]
    async fn test_fallback_five_km_is_sixty_minutes() {
        let resolver = resolver(StubDirections::down());
        let legs = resolver.resolve_from(ORIGIN, &targets(&[5.0])).await.unwrap();
        assert!((legs[0].minutes() - 60.0).abs() < 1e-9);
        assert!((legs[0].distance_m - 5000.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_resolve_from_keeps_target_order() {
        // Service walks at 4 km/h, fallback would use 5 km/h
        let directions = StubDirections::straight_line(4.0);
        let resolver = resolver(directions.clone());
        let legs = resolver
            .resolve_from(ORIGIN, &targets(&[2.0, 0.5, 1.0, 3.0, 0.1]))
            .await
            .unwrap();

        let minutes: Vec<f64> = legs.iter().map(|l| (l.minutes() * 10.0).round() / 10.0).collect();
        assert_eq!(minutes, vec![30.0, 7.5, 15.0, 45.0, 1.5]);
        assert_eq!(directions.calls(), 5);
    }

    #[tokio::test]
    async fn test_partial_outage_mixes_resolved_and_estimated() {
        let far = north_of(ORIGIN, 2.0);
        let directions = StubDirections::new(move |_, to| {
            if to == far {
                Err(crate::error::ProviderError::Timeout(Duration::from_secs(10)))
            } else {
                Ok(WalkLeg {
                    duration_sec: 100.0,
                    distance_m: 120.0,
                })
            }
        });
        let legs = resolver(directions)
            .resolve_from(ORIGIN, &targets(&[1.0, 2.0]))
            .await
            .unwrap();

        assert_eq!(legs[0].duration_sec, 100.0);
        assert!((legs[1].minutes() - 24.0).abs() < 1e-9);
    }
}
