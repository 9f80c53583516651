//! Command-line interface for the bot binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aggregator-bot", about = "Telegram front end for the articles archive")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot (long polling).
    Run {
        /// Overrides the BOT_TOKEN environment variable.
        #[arg(long)]
        token: Option<String>,
    },
}
