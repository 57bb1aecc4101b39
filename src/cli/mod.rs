//! CLI module for ClipSift
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

/// ClipSift - sample long videos, let a curator pick clips, cut the picks
///
/// Each run segments new videos into fixed-length clip units with preview
/// images, cuts every clip whose preview was moved into a selected-clip
/// directory, and deletes source videos none of whose previews remain.
#[derive(Parser, Debug)]
#[command(name = "clipsift")]
#[command(about = "Video clip sampling, selection and extraction pipeline")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: ./clipsift.toml when present)
    #[arg(long, global = true, env = "CLIPSIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "CLIPSIFT_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, env = "CLIPSIFT_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Print the report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: args::PipelineOverrides,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan, extract every route, then enforce retention
    Run(args::RunArgs),
    /// Segment new videos from the input directory
    Scan,
    /// Cut the clips selected in every selected-clip directory
    Extract,
    /// Delete source videos whose sample images are all gone
    Retain(args::RetainArgs),
    /// Show the clip table row a selection marker points to
    Resolve(args::ResolveArgs),
    /// Print the clip table of a video
    Inspect(args::InspectArgs),
}
