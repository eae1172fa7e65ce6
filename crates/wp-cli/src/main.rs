//! Waypoint CLI - a linear SQL schema migration tracker

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands, StatusArgs, StatusFormat};
use commands::{down, merge, new, reset, run, status, up};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Status(args)) => status::execute(args, &cli.global).await,
        None => {
            let args = StatusArgs {
                format: StatusFormat::Text,
            };
            status::execute(&args, &cli.global).await
        }
        Some(Commands::Up) => up::execute(&cli.global).await,
        Some(Commands::Down) => down::execute(&cli.global).await,
        Some(Commands::New(args)) => new::execute(args, &cli.global).await,
        Some(Commands::Merge) => merge::execute(&cli.global).await,
        Some(Commands::Reset) => reset::execute(&cli.global).await,
        Some(Commands::Run(args)) => run::execute(args, &cli.global).await,
    }
}
