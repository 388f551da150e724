pub mod types;
pub mod logging;

use clap::Parser;
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;

use crate::builder::{run_generation, start_watcher, SiteGenerator};
use crate::config;
use crate::server;

/// Run the command-line interface
pub async fn run() -> ExitCode {
    let cli = types::Cli::parse();

    logging::init_logging(cli.debug);

    let config = match config::load_config(cli.source_dir(), &cli.overrides()) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let generator = Arc::new(SiteGenerator::new(Arc::clone(&config)));

    // Kept alive while serving; dropping it stops the watch pipeline
    let mut _watcher = None;

    if !config.no_generation {
        info!("Generating site into {}...", config.public_dir().display());
        run_generation(&generator).await;

        if config.generate_only {
            return ExitCode::SUCCESS;
        }

        match start_watcher(Arc::clone(&config), generator) {
            Ok(watcher) => _watcher = Some(watcher),
            Err(e) => {
                error!("Failed to watch for changes: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    match server::serve(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
