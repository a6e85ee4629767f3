//! Vitrine CLI
//!
//! Command-line front end for validating configuration and simulating the
//! background audio coordinator and the cinematic viewer.

use clap::Parser;
use env_logger::Env;
use log::info;

use vitrine::cli::{commands, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Vitrine v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => commands::run(cmd, cli.config.as_deref()),
        None => {
            println!("Vitrine v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}
