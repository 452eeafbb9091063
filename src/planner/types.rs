//! Per-request value types passed through the planning pipeline

use crate::catalog::Place;
use crate::config::{Config, MAX_CANDIDATES};
use crate::geo::{Coordinate, WalkLeg};

/// What the caller asks for
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub interests: String,
    pub time_hours: f64,
    pub start: Coordinate,
}

/// Numeric knobs lifted out of config
#[derive(Debug, Clone)]
pub struct PlannerSettings {
    pub max_time_hours: f64,
    pub walking_speed_kmh: f64,
    pub max_candidates: usize,
    pub max_stops: usize,
}

impl PlannerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_time_hours: config.max_time_hours,
            walking_speed_kmh: config.planner.walking_speed_kmh,
            max_candidates: config.planner.max_candidates.min(MAX_CANDIDATES),
            max_stops: config.planner.max_stops,
        }
    }
}

/// A place ranked against the stated interests
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub place: &'a Place,
    pub similarity: f32,
    /// Great-circle distance from the starting point
    pub straight_km: f64,
}

/// A scored candidate with its walking leg from the starting point
#[derive(Debug, Clone)]
pub struct ResolvedCandidate<'a> {
    pub scored: ScoredCandidate<'a>,
    pub from_start: WalkLeg,
}

impl<'a> ResolvedCandidate<'a> {
    pub fn place(&self) -> &'a Place {
        self.scored.place
    }
}

/// Round to the 0.1 minute precision itineraries are reported in
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One committed stop, in visiting order
#[derive(Debug, Clone)]
pub struct RouteStep<'a> {
    pub place: &'a Place,
    /// Walk from the previous position, at reporting precision
    pub walk_minutes: f64,
    pub walk_distance_m: f64,
    pub visit_minutes: f64,
    /// Itinerary time used once this stop is finished
    pub elapsed_minutes: f64,
}
