//! Greedy budget-constrained route construction.
//!
//! From the current walker position, every unused candidate is re-resolved
//! and the nearest one (by walking time) is tried next. The loop stops at
//! the first stop that would overrun the budget; it never skips ahead to a
//! cheaper candidate.

use crate::catalog::Place;
use crate::config::{VisitConfig, VisitRule};
use crate::error::PlannerError;
use crate::geo::Coordinate;
use std::collections::HashSet;
use tracing::{debug, info};

use super::resolver::{DurationResolver, Target};
use super::types::{round1, ResolvedCandidate, RouteStep};

/// Assigns the expected dwell time at a place
pub trait VisitClassifier: Send + Sync {
    fn visit_minutes(&self, place: &Place) -> f64;
}

/// Case-insensitive substring rules over title and description
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<VisitRule>,
    default_minutes: f64,
}

impl KeywordClassifier {
    pub fn new(rules: Vec<VisitRule>, default_minutes: f64) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| VisitRule {
                token: r.token.to_lowercase(),
                minutes: r.minutes,
            })
            .collect();
        Self {
            rules,
            default_minutes,
        }
    }

    pub fn from_config(config: &VisitConfig) -> Self {
        Self::new(config.rules.clone(), config.default_minutes)
    }
}

impl VisitClassifier for KeywordClassifier {
    fn visit_minutes(&self, place: &Place) -> f64 {
        let text = format!("{} {}", place.title, place.description).to_lowercase();
        self.rules
            .iter()
            .find(|rule| text.contains(&rule.token))
            .map(|rule| rule.minutes)
            .unwrap_or(self.default_minutes)
    }
}

/// Index of the strictly smallest value; the first wins on ties.
pub fn select_nearest(minutes: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in minutes.into_iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

pub struct RouteBuilder<'r> {
    resolver: &'r DurationResolver,
    classifier: &'r dyn VisitClassifier,
    max_stops: usize,
}

impl<'r> RouteBuilder<'r> {
    pub fn new(
        resolver: &'r DurationResolver,
        classifier: &'r dyn VisitClassifier,
        max_stops: usize,
    ) -> Self {
        Self {
            resolver,
            classifier,
            max_stops,
        }
    }

    pub async fn build<'a>(
        &self,
        candidates: &[ResolvedCandidate<'a>],
        start: Coordinate,
        budget_minutes: f64,
    ) -> Result<Vec<RouteStep<'a>>, PlannerError> {
        let mut current = start;
        let mut used: HashSet<&str> = HashSet::new();
        let mut total_minutes = 0.0;
        let mut steps: Vec<RouteStep<'a>> = Vec::new();

        for iteration in 0..self.max_stops {
            let remaining: Vec<&'a Place> = candidates
                .iter()
                .map(|c| c.place())
                .filter(|p| !used.contains(p.title.as_str()))
                .collect();
            if remaining.is_empty() {
                debug!("All candidates used after {} stops", steps.len());
                break;
            }

            let targets: Vec<Target> = remaining
                .iter()
                .map(|p| Target {
                    label: p.title.clone(),
                    location: p.location,
                })
                .collect();
            let legs = self.resolver.resolve_from(current, &targets).await?;

            let Some(best) = select_nearest(legs.iter().map(|l| l.minutes())) else {
                debug!("No resolvable candidate at iteration {}", iteration);
                break;
            };
            let place = remaining[best];
            let leg = legs[best];

            // Budget is checked against the minutes the itinerary reports
            let walk_minutes = round1(leg.minutes());
            let visit_minutes = self.classifier.visit_minutes(place);
            let candidate_total = total_minutes + walk_minutes + visit_minutes;
            if candidate_total > budget_minutes {
                info!(
                    "Stopping before '{}': {:.1} min would exceed budget of {:.1} min",
                    place.title, candidate_total, budget_minutes
                );
                break;
            }

            debug!(
                "Stop {}: '{}' walk {:.1} min, visit {:.0} min, elapsed {:.1} min",
                steps.len() + 1,
                place.title,
                walk_minutes,
                visit_minutes,
                candidate_total
            );
            steps.push(RouteStep {
                place,
                walk_minutes,
                walk_distance_m: leg.distance_m,
                visit_minutes,
                elapsed_minutes: candidate_total,
            });
            total_minutes = candidate_total;
            current = place.location;
            used.insert(place.title.as_str());
        }

        if steps.is_empty() {
            return Err(PlannerError::RouteUnbuildable);
        }
        Ok(steps)
    }
}
