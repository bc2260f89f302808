//! CLI module for match-video
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::ConfigOverrides;

pub mod args;
pub mod commands;

/// match-video
///
/// Clip broadcast match video by period and match clock, using anchors stored
/// as chapters in the video itself.
#[derive(Parser, Debug)]
#[command(name = "match-video")]
#[command(about = "Clip broadcast match video by period and match clock")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: match_video.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration values given on the command line
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set the video time at which each half starts
    SetHalfStarts(args::SetHalfStartsArgs),
    /// List the anchors set for a video
    ReadAnchors(args::ReadAnchorsArgs),
    /// Extract one or more clips by period and match clock
    Clip(args::ClipArgs),
}
