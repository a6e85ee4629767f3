//! CLI Module
//!
//! Command-line interface for validating configuration and simulating the
//! audio coordinator and the viewer from scripted input.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vitrine - background audio and cinematic viewer simulator
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (JSON); built-in defaults when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a configuration file and print the route table
    #[command(name = "check-config")]
    CheckConfig {
        /// Path to the configuration file
        path: PathBuf,
    },

    /// Drive the audio coordinator with a script
    ///
    /// Steps are separated by ';' or whitespace:
    /// bind:<route>, gesture, toggle:<route>, suppress, resume, wait:<ms>
    #[command(name = "audio")]
    Audio {
        /// Script to run
        #[arg(short, long)]
        script: String,

        /// Reject this many play requests before allowing playback
        #[arg(short, long, default_value_t = 0)]
        blocked: u32,
    },

    /// Drive the cinematic viewer with a script
    ///
    /// Steps are separated by ';' or whitespace:
    /// next, prev, select:<i>, key:<name>, swipe:<dx>,<dy>, wait:<ms>,
    /// toggle, close
    #[command(name = "viewer")]
    Viewer {
        /// Comma-separated items, each `photo:<id>` or `video:<id>`
        #[arg(short, long)]
        items: String,

        /// Starting index
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Script to run
        #[arg(short, long)]
        script: String,
    },
}
