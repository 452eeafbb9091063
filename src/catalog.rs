//! Place catalog: loaded once at startup and shared read-only.

use crate::error::CatalogError;
use crate::geo::Coordinate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// A point of interest. Titles are unique and act as identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub title: String,
    pub description: String,
    pub location: Coordinate,
    pub embedding: Option<Vec<f32>>,
}

pub type SharedCatalog = Arc<Catalog>;

#[derive(Debug, Default)]
pub struct Catalog {
    places: Vec<Place>,
    dimension: Option<usize>,
}

/// Raw catalog record as stored on disk
#[derive(Debug, Deserialize)]
struct PlaceRecord {
    title: String,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    lat: Option<f64>,

    #[serde(default)]
    lon: Option<f64>,

    /// "lon lat" pair in free form, e.g. `POINT (44.0059 56.3269)`
    #[serde(default)]
    coordinate: Option<String>,

    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

impl Catalog {
    /// Build a catalog from already-parsed places.
    pub fn new(places: Vec<Place>) -> Result<Self, CatalogError> {
        let mut dimension = None;
        for place in &places {
            if let Some(embedding) = &place.embedding {
                match dimension {
                    None => dimension = Some(embedding.len()),
                    Some(expected) if expected != embedding.len() => {
                        return Err(CatalogError::DimensionMismatch {
                            title: place.title.clone(),
                            expected,
                            actual: embedding.len(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(Self { places, dimension })
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let records: Vec<PlaceRecord> = serde_json::from_str(content)?;
        let total = records.len();

        let mut places = Vec::with_capacity(total);
        for record in records {
            let description = record.description.unwrap_or_default().trim().to_string();
            let title = record.title.trim().to_string();
            if title.is_empty() && description.is_empty() {
                debug!("Skipping record with empty title and description");
                continue;
            }

            let location = match (record.lat, record.lon) {
                (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
                _ => record.coordinate.as_deref().and_then(parse_coordinate),
            };
            let Some(location) = location else {
                warn!("Skipping '{}': no usable coordinates", title);
                continue;
            };

            let embedding = record.embedding.map(|v| {
                v.into_iter()
                    .map(|x| if x.is_finite() { x } else { 0.0 })
                    .collect::<Vec<_>>()
            });

            places.push(Place {
                title,
                description,
                location,
                embedding,
            });
        }

        if places.is_empty() {
            return Err(CatalogError::Empty);
        }

        debug!("Loaded {} of {} catalog records", places.len(), total);
        Self::new(places)
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Embedding dimension shared by all places, if any carry one
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }
}

/// Parse a free-form coordinate string. The first number is longitude,
/// the second latitude.
pub fn parse_coordinate(raw: &str) -> Option<Coordinate> {
    let re = Regex::new(r"[-+]?\d*\.\d+|[-+]?\d+").ok()?;
    let mut numbers = re.find_iter(raw).filter_map(|m| m.as_str().parse::<f64>().ok());
    let lon = numbers.next()?;
    let lat = numbers.next()?;
    Some(Coordinate::new(lat, lon))
}
