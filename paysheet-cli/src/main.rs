use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod export;
mod services;
mod sheets;

use cli::{Cli, Commands};
use cli::commands::compare::{handle_compare_command, handle_headers_command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Headers(args) => handle_headers_command(args).await,
        Commands::Compare(args) => handle_compare_command(args).await,
    }
}
