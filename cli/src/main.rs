mod commands;
mod runner;

use crate::commands::Commands;
use crate::runner::{Runnable, Runner};
use clap::Parser;
use stackaudit::logger::Logger;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Derive a runner from the command and run it
async fn run(command: impl Runnable) -> bool {
    let run = command.runner().run().await;

    if let Err(error) = &run {
        eprintln!("\n{}\n{error}", console::style("Error").red().bold());
    }

    run.is_ok()
}

#[tokio::main]
async fn main() {
    Logger::init();

    // Match all commands here, in one place
    let success = match Cli::parse().command {
        Commands::Collect(cmd) => run(cmd).await,
    };

    if !success {
        std::process::exit(1);
    }
}
