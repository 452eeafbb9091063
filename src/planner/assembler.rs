//! Final itinerary shape returned to callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{round1, RouteStep};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub summary: ItinerarySummary,
    pub plan: Vec<ItineraryStop>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySummary {
    pub total_places: usize,
    pub total_walking_time_min: f64,
    pub total_duration_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryStop {
    pub title: String,
    pub why: String,
    pub walking_time_min: f64,
    pub walking_distance_m: f64,
    pub visit_duration_min: f64,
    /// Minutes since the start once this stop is finished
    pub elapsed_min: f64,
    pub lat: f64,
    pub lon: f64,
}

/// Zip steps with their explanations. Totals are summed from step values
/// and rounded once.
pub fn assemble(steps: &[RouteStep<'_>], explanations: Vec<String>) -> Itinerary {
    let mut total_walking_min = 0.0;
    let mut total_visit_min = 0.0;

    let plan: Vec<ItineraryStop> = steps
        .iter()
        .zip(explanations)
        .map(|(step, why)| {
            total_walking_min += step.walk_minutes;
            total_visit_min += step.visit_minutes;
            ItineraryStop {
                title: step.place.title.clone(),
                why,
                walking_time_min: round1(step.walk_minutes),
                walking_distance_m: step.walk_distance_m.round(),
                visit_duration_min: step.visit_minutes,
                elapsed_min: round1(step.elapsed_minutes),
                lat: step.place.location.lat,
                lon: step.place.location.lon,
            }
        })
        .collect();

    Itinerary {
        summary: ItinerarySummary {
            total_places: plan.len(),
            total_walking_time_min: round1(total_walking_min),
            total_duration_hours: round1((total_walking_min + total_visit_min) / 60.0),
        },
        plan,
        generated_at: Utc::now(),
    }
}
