use std::process::ExitCode;

use movie_similarity::{pipeline, PipelineConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PipelineConfig::default();
    match pipeline::run(&config)? {
        Some(summary) => {
            info!(
                rows = summary.rows,
                vocabulary = summary.vocabulary_size,
                degraded_cells = summary.degraded_cells,
                "model built and saved successfully"
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            error!("failed to load data, nothing written");
            Ok(ExitCode::FAILURE)
        }
    }
}
