use crate::catalog::Catalog;
use crate::cli::{PlanArgs, SourceArgs};
use crate::config::Config;
use crate::geo::Coordinate;
use crate::output::{render, write_itinerary};
use crate::planner::{validate_budget, ItineraryPlanner, PlanRequest};
use crate::provider::create_services;
use std::sync::Arc;
use tracing::info;

/// Load config and apply the catalog override shared by all commands
pub fn load_config(source: &SourceArgs) -> anyhow::Result<Config> {
    info!("Loading config from {:?}", source.config);
    let mut config = Config::load_or_default(&source.config)?;
    if let Some(catalog) = &source.catalog {
        config.catalog = catalog.clone();
    }
    Ok(config)
}

pub async fn execute(args: PlanArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.source)?;

    // Apply CLI overrides
    if let Some(max_stops) = args.max_stops {
        config.planner.max_stops = max_stops;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    config.validate()?;
    validate_budget(args.hours, config.max_time_hours)?;

    let catalog = Arc::new(Catalog::load(&config.catalog)?);
    info!("Loaded {} places from {:?}", catalog.len(), config.catalog);

    let services = create_services(&config);
    let planner = ItineraryPlanner::new(&config, catalog, services);

    let request = PlanRequest {
        interests: args.interests,
        time_hours: args.hours,
        start: Coordinate::new(args.lat, args.lon),
    };
    let itinerary = planner.build_itinerary(&request).await?;
    let rendered = render(&itinerary, args.format)?;

    match args.output {
        Some(path) => {
            write_itinerary(&path, &rendered)?;
            info!("Itinerary written to {:?}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
