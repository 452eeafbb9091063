//! Itinerary construction engine
//!
//! 1. Rank the catalog against the interest embedding and keep places that
//!    are walkable in principle (straight-line radius)
//! 2. Resolve walking time from the start, dropping what cannot be reached
//!    within the budget
//! 3. Greedily chain nearest stops until the budget or stop cap is hit
//! 4. Ask the completion service for one explanation per stop, in parallel
//! 5. Assemble the itinerary and its summary
//!
//! External failures never fail a request: durations fall back to the
//! straight-line estimate and explanations to a fixed template.

pub mod assembler;
pub mod narrative;
pub mod orchestrator;
pub mod ranker;
pub mod resolver;
pub mod retry;
pub mod route;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::Itinerary;
pub use orchestrator::{validate_budget, ItineraryPlanner};
pub use types::PlanRequest;
