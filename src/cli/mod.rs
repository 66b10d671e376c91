//! CLI module for Sketchify
//!
//! Provides commands:
//! - `serve`: Start the relay server
//! - `config`: Print the effective configuration

use anyhow::Context;
use clap::{Parser, Subcommand};
use sketchify::server;

/// Sketchify CLI
#[derive(Parser, Debug)]
#[command(name = "sketchify")]
#[command(about = "Turn sketches into images with a generative model")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server
    Serve,
    /// Print the effective configuration as TOML
    Config,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) => server::run().await,
        Some(Commands::Config) => {
            let config = server::load_config()?;
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render configuration")?;
            print!("{rendered}");
            Ok(())
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
