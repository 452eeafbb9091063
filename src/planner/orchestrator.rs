//! Itinerary pipeline: rank -> duration prefilter -> route -> narrate -> assemble

use crate::catalog::SharedCatalog;
use crate::config::Config;
use crate::error::PlannerError;
use crate::provider::{Embedder, Services};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use super::assembler::{assemble, Itinerary};
use super::narrative::NarrativeGenerator;
use super::ranker::rank_candidates;
use super::resolver::{DurationResolver, Target};
use super::route::{KeywordClassifier, RouteBuilder, VisitClassifier};
use super::types::{PlanRequest, PlannerSettings, ResolvedCandidate};

/// A budget is usable when it is finite, positive and at most `max_hours`
pub fn validate_budget(time_hours: f64, max_hours: f64) -> Result<(), PlannerError> {
    if !time_hours.is_finite() || time_hours <= 0.0 || time_hours > max_hours {
        return Err(PlannerError::InvalidTimeBudget {
            hours: time_hours,
            max_hours,
        });
    }
    Ok(())
}

pub struct ItineraryPlanner {
    catalog: SharedCatalog,
    embedder: Arc<dyn Embedder>,
    resolver: DurationResolver,
    narrator: NarrativeGenerator,
    classifier: Arc<dyn VisitClassifier>,
    settings: PlannerSettings,
}

impl ItineraryPlanner {
    pub fn new(config: &Config, catalog: SharedCatalog, services: Services) -> Self {
        let settings = PlannerSettings::from_config(config);
        let semaphore = Arc::new(Semaphore::new(config.concurrency));

        let resolver = DurationResolver::new(
            services.directions,
            Duration::from_secs(config.directions.timeout_sec),
            settings.walking_speed_kmh,
            semaphore.clone(),
        );
        let narrator = NarrativeGenerator::new(services.completion, &config.completion, semaphore);
        let classifier = Arc::new(KeywordClassifier::from_config(&config.planner.visit));

        Self {
            catalog,
            embedder: services.embedder,
            resolver,
            narrator,
            classifier,
            settings,
        }
    }

    pub async fn build_itinerary(&self, request: &PlanRequest) -> Result<Itinerary, PlannerError> {
        let span = info_span!("itinerary", request_id = %Uuid::new_v4());
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &PlanRequest) -> Result<Itinerary, PlannerError> {
        validate_budget(request.time_hours, self.settings.max_time_hours)?;
        let budget_minutes = request.time_hours * 60.0;

        info!(
            "Planning {:.1}h from {} for interests '{}'",
            request.time_hours, request.start, request.interests
        );

        let interest = self
            .embedder
            .embed(&request.interests)
            .await
            .map_err(PlannerError::Embedding)?;

        let scored = rank_candidates(
            &self.catalog,
            &interest,
            request.start,
            request.time_hours,
            &self.settings,
        )?;
        info!("{} candidates within walking radius", scored.len());

        let targets: Vec<Target> = scored
            .iter()
            .map(|c| Target {
                label: c.place.title.clone(),
                location: c.place.location,
            })
            .collect();
        let from_start = self.resolver.resolve_from(request.start, &targets).await?;

        let budget_sec = request.time_hours * 3600.0;
        let candidates: Vec<ResolvedCandidate<'_>> = scored
            .into_iter()
            .zip(from_start)
            .filter(|(_, leg)| leg.duration_sec <= budget_sec)
            .map(|(scored, from_start)| ResolvedCandidate { scored, from_start })
            .collect();
        if candidates.is_empty() {
            return Err(PlannerError::NoCandidatesWithinDuration);
        }
        info!("{} candidates reachable within budget", candidates.len());
        for c in &candidates {
            debug!(
                "'{}' similarity {:.3}, {:.1} min from start",
                c.place().title,
                c.scored.similarity,
                c.from_start.minutes()
            );
        }

        let steps = RouteBuilder::new(
            &self.resolver,
            self.classifier.as_ref(),
            self.settings.max_stops,
        )
        .build(&candidates, request.start, budget_minutes)
        .await?;

        let explanations = self.narrator.explain_all(&request.interests, &steps).await?;
        let itinerary = assemble(&steps, explanations);

        info!(
            "Built itinerary: {} stops, {:.1} min walking, {:.1}h total",
            itinerary.summary.total_places,
            itinerary.summary.total_walking_time_min,
            itinerary.summary.total_duration_hours
        );
        Ok(itinerary)
    }
}
