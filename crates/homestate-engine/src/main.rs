//! Dataset generator binary for homestate.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `homestate-config.yaml` (or the file named by
//!    `HOMESTATE_CONFIG`), falling back to defaults when it does not exist
//! 2. Initialize structured logging (tracing), `RUST_LOG` first, then the
//!    configured level
//! 3. Build the timeline driver (validates config and the domain)
//! 4. Run each dataset into `{output.directory}/dataset_{i}` with seed
//!    `world.seed + i`

mod error;

use std::path::PathBuf;

use homestate_core::config::GeneratorConfig;
use homestate_core::persist::DirectorySink;
use homestate_core::timeline::TimelineDriver;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "HOMESTATE_CONFIG";

/// Configuration file used when `HOMESTATE_CONFIG` is unset.
const DEFAULT_CONFIG_FILE: &str = "homestate-config.yaml";

/// Application entry point.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        source = %source,
        seed = config.world.seed,
        max_rooms = config.world.max_rooms,
        max_items = config.world.max_items,
        num_queries = config.timeline.num_queries,
        state_changes_per_query = config.timeline.state_changes_per_query,
        datasets = config.output.datasets,
        "Configuration loaded"
    );

    // 3. Build the driver.
    let driver = TimelineDriver::new(config)?;
    let config = driver.config();

    // 4. Run every dataset.
    for dataset in 0..config.output.datasets {
        let seed = config.world.seed.wrapping_add(u64::from(dataset));
        let dir = config.output.directory.join(format!("dataset_{dataset}"));
        let mut sink = DirectorySink::create(&dir)?;
        let summary = driver
            .run(seed, &mut sink)
            .map_err(|source| EngineError::Run { dataset, source })?;
        info!(
            dataset,
            seed,
            dir = %dir.display(),
            state_changes = summary.state_changes,
            queries = summary.queries,
            goals = summary.goals,
            "Dataset complete"
        );
    }

    info!("homestate-engine finished");
    Ok(())
}

/// Load the generator configuration and report where it came from.
///
/// A missing file is not an error: defaults are used, with environment
/// overrides still applied.
fn load_config() -> Result<(GeneratorConfig, String), EngineError> {
    let path = std::env::var(CONFIG_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
    if path.exists() {
        let config = GeneratorConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        let config = GeneratorConfig::parse("")?;
        Ok((config, String::from("defaults")))
    }
}
