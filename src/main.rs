//! ClipSift CLI
//!
//! # Usage
//!
//! ```bash
//! clipsift run --input-dir videos --sample-dir samples \
//!     --selected-dir selected_clip --output-dir clips
//! clipsift retain --dry-run
//! clipsift resolve selected_clip/movieA_clip_2_frame_1.jpg
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use clipsift::app::DefaultAppContainer;
use clipsift::cli::{commands, Cli, Commands};
use clipsift::config_initialization::initialize_configuration;
use clipsift::utils::logging::init_logging;

/// Main entry point for the ClipSift CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli)?;
    init_logging(&config.logging)?;
    debug!(?config, "Effective configuration");

    let options = config.pipeline_options()?;
    let container = DefaultAppContainer::new(&options, &config.encoder)?;
    let json = cli.json;

    match cli.command {
        Commands::Run(args) => {
            info!("Executing run command");
            commands::run(&container, args, json).await?;
        }
        Commands::Scan => {
            info!("Executing scan command");
            commands::scan(&container, json).await?;
        }
        Commands::Extract => {
            info!("Executing extract command");
            commands::extract(&container, &options.routes, json).await?;
        }
        Commands::Retain(args) => {
            info!("Executing retain command");
            commands::retain(&container, args, json).await?;
        }
        Commands::Resolve(args) => commands::resolve(&container, args, json).await?,
        Commands::Inspect(args) => commands::inspect(&container, args, json).await?,
    }

    Ok(())
}
