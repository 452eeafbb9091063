//! Semantic ranking and radius prefilter over the catalog

use crate::catalog::Catalog;
use crate::error::PlannerError;
use crate::geo::{haversine_km, Coordinate};
use tracing::debug;

use super::types::{PlannerSettings, ScoredCandidate};

/// Cosine similarity; zero when either vector has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if sim.is_finite() {
        sim
    } else {
        0.0
    }
}

/// Rank the catalog by similarity to `interest`, keep places within the
/// walkable radius, and cap the result at `max_candidates`.
pub fn rank_candidates<'a>(
    catalog: &'a Catalog,
    interest: &[f32],
    start: Coordinate,
    time_hours: f64,
    settings: &PlannerSettings,
) -> Result<Vec<ScoredCandidate<'a>>, PlannerError> {
    if let Some(expected) = catalog.dimension() {
        if expected != interest.len() {
            return Err(PlannerError::EmbeddingDimension {
                expected,
                actual: interest.len(),
            });
        }
    }

    let mut ranked: Vec<ScoredCandidate<'a>> = catalog
        .places()
        .iter()
        .filter_map(|place| {
            let embedding = place.embedding.as_deref()?;
            Some(ScoredCandidate {
                place,
                similarity: cosine_similarity(interest, embedding),
                straight_km: haversine_km(start, place.location),
            })
        })
        .collect();

    // sort_by is stable: equal scores keep catalog order
    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    let radius_km = time_hours * settings.walking_speed_kmh;
    let ranked_count = ranked.len();
    let candidates: Vec<_> = ranked
        .into_iter()
        .filter(|c| c.straight_km <= radius_km)
        .take(settings.max_candidates)
        .collect();

    debug!(
        "Ranked {} places, {} kept within {:.2} km",
        ranked_count,
        candidates.len(),
        radius_km
    );

    if candidates.is_empty() {
        return Err(PlannerError::NoCandidatesInRadius { radius_km });
    }
    Ok(candidates)
}
