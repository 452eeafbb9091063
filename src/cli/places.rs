use crate::catalog::Catalog;
use crate::cli::plan::load_config;
use crate::cli::PlacesArgs;

pub fn execute(args: PlacesArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    let catalog = Catalog::load(&config.catalog)?;

    for place in catalog.places() {
        let marker = if place.embedding.is_some() { "" } else { "  (no embedding)" };
        println!("{}\t{}{}", place.title, place.location, marker);
    }

    match catalog.dimension() {
        Some(dim) => println!("\n{} places, embedding dimension {}", catalog.len(), dim),
        None => println!("\n{} places, no embeddings", catalog.len()),
    }
    Ok(())
}
