pub mod report;

use crate::error::OutputError;
use crate::planner::Itinerary;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
}

pub fn render(itinerary: &Itinerary, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(itinerary)?),
        OutputFormat::Markdown => Ok(report::render_markdown(itinerary)),
    }
}

/// Write rendered output, creating parent directories as needed
pub fn write_itinerary(path: &Path, content: &str) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(OutputError::Write)?;
    }
    fs::write(path, content).map_err(OutputError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::assembler::{ItineraryStop, ItinerarySummary};
    use chrono::Utc;

    fn sample() -> Itinerary {
        Itinerary {
            summary: ItinerarySummary {
                total_places: 1,
                total_walking_time_min: 10.0,
                total_duration_hours: 0.6,
            },
            plan: vec![ItineraryStop {
                title: "Кремль".to_string(),
                why: "Здесь вы увидите историю города.".to_string(),
                walking_time_min: 10.0,
                walking_distance_m: 833.0,
                visit_duration_min: 25.0,
                elapsed_min: 35.0,
                lat: 56.3287,
                lon: 44.0036,
            }],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_json_round_trips_structure() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_duration_hours"], 0.6);
        assert_eq!(value["plan"][0]["title"], "Кремль");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/plan.md");
        write_itinerary(&path, "# plan\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "# plan\n");
    }
}
