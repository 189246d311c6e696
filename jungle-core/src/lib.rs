//! Jungle Core - Rules engine
//!
//! This crate provides the game logic for Jungle (Dou Shou Qi):
//! - Board geometry and terrain (7x9 grid with water, traps and dens)
//! - Animal ranks and movement capabilities
//! - Game state, legal destinations, capture rules and win detection
//! - Starting positions loadable from JSON
//! - Text and JSON views of a game

pub mod board;
pub mod error;
pub mod pieces;
pub mod game;
pub mod setup;
pub mod render;

// Re-exports for convenient access
pub use board::{Board, Pos, Terrain, DIRECTIONS, HEIGHT, WIDTH};
pub use error::{GameError, Result};
pub use pieces::{Animal, Movement, Rank, ANIMALS, get_animal};
pub use game::{GameState, Move, Piece, Player};
pub use setup::{Placement, Setup};
pub use render::{render_with_hints, Snapshot};
