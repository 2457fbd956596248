//! qtictactoe CLI - train a Q-learning agent by self-play and play against it

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qtictactoe")]
#[command(version, about = "Tic-Tac-Toe against a self-taught Q-learning agent", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent by self-play and report what it learned
    Train(qtictactoe::cli::commands::train::TrainArgs),

    /// Play against the agent in the terminal
    Play(qtictactoe::cli::commands::play::PlayArgs),
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => qtictactoe::cli::commands::train::execute(args),
        Commands::Play(args) => qtictactoe::cli::commands::play::execute(args),
    }
}
