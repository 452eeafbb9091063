//! Great-circle geometry and the walking-time fallback estimator.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for all straight-line distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A walking segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkLeg {
    pub duration_sec: f64,
    pub distance_m: f64,
}

impl WalkLeg {
    pub fn minutes(&self) -> f64 {
        self.duration_sec / 60.0
    }
}

/// Gets distance in kilometers between two points using haversine formula.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.).sin().powi(2);
    let c = 2. * a.sqrt().atan2((1. - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Synthesizes a walking leg from straight-line distance at a constant speed.
pub fn estimate_leg(from: Coordinate, to: Coordinate, speed_kmh: f64) -> WalkLeg {
    let km = haversine_km(from, to);
    WalkLeg {
        duration_sec: km / speed_kmh * 3600.0,
        distance_m: km * 1000.0,
    }
}

/// Point due north of `origin` at `km` kilometers along the meridian.
#[cfg(test)]
pub(crate) fn north_of(origin: Coordinate, km: f64) -> Coordinate {
    let d_lat = (km / EARTH_RADIUS_KM).to_degrees();
    Coordinate::new(origin.lat + d_lat, origin.lon)
}
