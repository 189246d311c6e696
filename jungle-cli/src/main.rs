//! Jungle CLI - Command-line interface
//!
//! Commands:
//! - show: Print the board
//! - moves: List the moves available to the side to move
//! - replay: Apply a scripted list of moves
//! - play: Play an interactive game on the terminal

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jungle_core::{GameState, Setup};

mod inspect;
mod play;
mod replay;

#[derive(Parser)]
#[command(name = "jungle")]
#[command(about = "Jungle (Dou Shou Qi) rules engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board
    Show(inspect::InspectArgs),
    /// List movable pieces and their destinations
    Moves(inspect::InspectArgs),
    /// Apply moves such as "6,6-6,5" and report the outcome
    Replay(replay::ReplayArgs),
    /// Play an interactive game
    Play(play::PlayArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show(args) => inspect::run_show(args),
        Commands::Moves(args) => inspect::run_moves(args),
        Commands::Replay(args) => replay::run(args),
        Commands::Play(args) => play::run(args),
    }
}

/// Starting position from a setup file, or the standard opening
pub(crate) fn load_game(setup: Option<&Path>) -> Result<GameState> {
    let setup = match setup {
        Some(path) => {
            let setup = Setup::load(path)?;
            tracing::info!("Loaded setup {} from {}", setup.name, path.display());
            setup
        }
        None => Setup::standard(),
    };
    Ok(setup.to_game_state()?)
}
