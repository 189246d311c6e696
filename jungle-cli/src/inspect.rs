//! Show and moves commands - read-only views of a position

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use jungle_core::{GameState, Pos, Snapshot};

use crate::load_game;

#[derive(Args)]
pub struct InspectArgs {
    /// Setup JSON file (defaults to the standard opening)
    #[arg(long, value_name = "FILE")]
    pub setup: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Movable piece with its destinations
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieceMoves {
    pub glyph: char,
    pub name: &'static str,
    pub from: Pos,
    pub destinations: Vec<Pos>,
}

pub fn run_show(args: InspectArgs) -> Result<()> {
    let game = load_game(args.setup.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&Snapshot::of(&game))?);
    } else {
        println!("{}", game);
        match game.winner() {
            Some(winner) => println!("{} has won.", winner),
            None => println!("{} to move.", game.current_player()),
        }
    }
    Ok(())
}

pub fn run_moves(args: InspectArgs) -> Result<()> {
    let game = load_game(args.setup.as_deref())?;
    let moves = movable_pieces(&game);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&moves)?);
        return Ok(());
    }

    if let Some(winner) = game.winner() {
        println!("{} has won.", winner);
        return Ok(());
    }
    println!("{} to move:", game.current_player());
    for piece in &moves {
        let dests: Vec<String> = piece.destinations.iter().map(|d| d.to_string()).collect();
        println!("  {} {:<8} {} -> {}", piece.glyph, piece.name, piece.from, dests.join("  "));
    }
    if moves.is_empty() {
        println!("  (no legal moves)");
    }
    Ok(())
}

/// Active pieces sorted by glyph, destinations sorted by position; empty once
/// the game is decided
pub fn movable_pieces(game: &GameState) -> Vec<PieceMoves> {
    if game.winner().is_some() {
        return Vec::new();
    }
    let mut moves: Vec<PieceMoves> = game
        .active_pieces()
        .into_iter()
        .map(|piece| {
            let mut destinations = piece.legal_destinations(game);
            destinations.sort();
            PieceMoves { glyph: piece.glyph(), name: piece.name(), from: piece.pos, destinations }
        })
        .collect();
    moves.sort_by_key(|m| m.glyph);
    moves
}
