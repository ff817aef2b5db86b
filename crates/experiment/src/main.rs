//! Rock-Cutting Classification Experiment - Main Entry Point

use std::path::Path;

use experiment::{init_logging, run, write_results, ExperimentConfig};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    info!("=== Rig Experiment v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1);
    let config = ExperimentConfig::load(config_path.as_deref().map(Path::new))?;

    let results = run(&config)?;
    write_results(&config.output_path, &results)?;

    info!(
        "Wrote {} results to {}",
        results.len(),
        config.output_path.display()
    );
    Ok(())
}
