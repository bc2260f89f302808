//! match-video CLI
//!
//! Clip broadcast match video by period and match clock.
//!
//! # Usage
//!
//! ```bash
//! match-video set-half-starts broadcast.mp4 0:35 61:50
//! match-video read-anchors broadcast.mp4
//! match-video clip broadcast.mp4 --range 1@0:00-1:00 --output kickoff.mp4
//! match-video clip broadcast.mp4 -r 1@0:00-0:10 -r 2@45:00-45:10 -o half-starts.mp4
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use match_video::adapters::{init_logging, Config};
use match_video::cli::{commands, Cli, Commands};
use match_video::AppContainer;

/// Main entry point for the match-video CLI application
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config_overrides()).context("Failed to load configuration")?;
    init_logging(&config)?;

    match &config.source {
        Some(path) => info!(path = %path.display(), "Loaded configuration"),
        None => debug!("Using default configuration"),
    }

    let container = AppContainer::new(&config).context("Failed to set up media backend")?;

    match cli.command {
        Commands::SetHalfStarts(args) => commands::set_half_starts(&container, args)?,
        Commands::ReadAnchors(args) => {
            let stdout = std::io::stdout();
            commands::read_anchors(&container, args, &mut stdout.lock())?
        }
        Commands::Clip(args) => commands::clip(&container, args)?,
    }

    Ok(())
}
