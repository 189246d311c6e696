//! Replay command - apply a scripted move list
//!
//! - Level 1: run() - orchestration
//! - Level 2: parse_moves(), replay(), report()

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use jungle_core::{GameState, Move, Snapshot};

use crate::load_game;

#[derive(Args)]
pub struct ReplayArgs {
    /// Moves as "col,row-col,row", applied in order
    #[arg(value_name = "MOVE")]
    pub moves: Vec<String>,

    /// Setup JSON file (defaults to the standard opening)
    #[arg(long, value_name = "FILE")]
    pub setup: Option<PathBuf>,

    /// Print the board after every move
    #[arg(long)]
    pub verbose: bool,

    /// Output the final position as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of a replay
#[derive(Clone, Debug, Serialize)]
struct ReplayReport {
    moves_applied: usize,
    captures: usize,
    #[serde(flatten)]
    snapshot: Snapshot,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let mut game = load_game(args.setup.as_deref())?;
    let moves = parse_moves(&args.moves)?;

    tracing::info!("Replaying {} moves", moves.len());
    let captures = replay(&mut game, &moves, |game, mv| {
        if args.verbose && !args.json {
            println!("{}\n{}\n", mv, game);
        }
    })?;

    report(&game, moves.len(), captures, args.json)
}

fn parse_moves(raw: &[String]) -> Result<Vec<Move>> {
    raw.iter()
        .map(|s| s.parse::<Move>().map_err(anyhow::Error::from))
        .collect()
}

/// Apply moves in order, returning the number of captures
fn replay<F>(game: &mut GameState, moves: &[Move], mut after_move: F) -> Result<usize>
where
    F: FnMut(&GameState, &Move),
{
    let mut captures = 0;
    for (i, mv) in moves.iter().enumerate() {
        let captured = game
            .apply_move(mv.from, mv.to)
            .with_context(|| format!("move {} ({})", i + 1, mv))?;
        if let Some(victim) = captured {
            tracing::info!("{} captured {} at {}", mv, victim.name(), mv.to);
            captures += 1;
        }
        after_move(game, mv);
    }
    Ok(captures)
}

fn report(game: &GameState, moves_applied: usize, captures: usize, json: bool) -> Result<()> {
    if json {
        let report = ReplayReport { moves_applied, captures, snapshot: Snapshot::of(game) };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", game);
    println!("{} moves, {} captures.", moves_applied, captures);
    match game.winner() {
        Some(winner) => println!("The {} player has won!", winner),
        None => println!("{} to move.", game.current_player()),
    }
    Ok(())
}

/// Moves that walk the White rat into Black's den while Black shuffles
#[cfg(test)]
pub(crate) const RAT_RUN: [&str; 17] = [
    "6,6-6,5", "0,0-0,1",
    "6,5-5,5", "0,1-0,0",
    "5,5-5,4", "0,0-0,1",
    "5,4-5,3", "5,1-5,0",
    "5,3-5,2", "0,1-0,0",
    "5,2-5,1", "0,0-0,1",
    "5,1-4,1", "0,1-0,0",
    "4,1-3,1", "0,0-0,1",
    "3,1-3,0",
];
