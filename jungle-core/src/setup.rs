//! Setup - starting position definition

use crate::board::{Board, Pos, Terrain};
use crate::error::{GameError, Result};
use crate::game::{GameState, Player};
use crate::pieces::{get_animal, is_valid_rank, Rank};
use anyhow::Context;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One piece in a starting position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub rank: Rank,
    pub pos: Pos,
}

impl Placement {
    pub const fn new(rank: Rank, col: i8, row: i8) -> Self {
        Self { rank, pos: Pos::new(col, row) }
    }
}

/// Starting position: who moves first and where every piece stands
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub name: String,
    pub first_player: Player,
    pub white: Vec<Placement>,
    pub black: Vec<Placement>,
}

/// Black's standard placements; White's are their mirror images
const STANDARD_BLACK: [Placement; 8] = [
    Placement::new(7, 0, 0),  // Lion
    Placement::new(6, 6, 0),  // Tiger
    Placement::new(3, 1, 1),  // Dog
    Placement::new(2, 5, 1),  // Cat
    Placement::new(1, 0, 2),  // Rat
    Placement::new(5, 2, 2),  // Leopard
    Placement::new(4, 4, 2),  // Wolf
    Placement::new(8, 6, 2),  // Elephant
];

impl Setup {
    /// The fixed 16-piece opening, White to move
    pub fn standard() -> Self {
        let white = STANDARD_BLACK
            .iter()
            .map(|p| Placement { rank: p.rank, pos: p.pos.mirrored() })
            .collect();

        Self {
            name: "standard".to_string(),
            first_player: Player::White,
            white,
            black: STANDARD_BLACK.to_vec(),
        }
    }

    /// (rank, position) pairs for one side
    pub fn placements(&self, player: Player) -> Vec<(Rank, Pos)> {
        let side = match player {
            Player::White => &self.white,
            Player::Black => &self.black,
        };
        side.iter().map(|p| (p.rank, p.pos)).collect()
    }

    /// Check placements against the board
    pub fn validate(&self) -> Result<()> {
        validate_placements(&self.placements(Player::White), &self.placements(Player::Black))
    }

    /// Convert to GameState
    pub fn to_game_state(&self) -> Result<GameState> {
        GameState::new(
            &self.placements(Player::White),
            &self.placements(Player::Black),
            self.first_player,
        )
    }

    /// Parse from JSON text
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let setup: Setup = serde_json::from_str(content).context("malformed setup JSON")?;
        setup.validate()?;
        Ok(setup)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading setup {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("loading setup {}", path.display()))
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::standard()
    }
}

/// Ranks valid and unique per color, cells on the board, distinct, and
/// never a piece's own den
pub(crate) fn validate_placements(white: &[(Rank, Pos)], black: &[(Rank, Pos)]) -> Result<()> {
    let board = Board::standard();
    let mut occupied = FxHashSet::default();

    for (player, placements) in [(Player::White, white), (Player::Black, black)] {
        let mut ranks = FxHashSet::default();
        for &(rank, pos) in placements {
            if !is_valid_rank(rank) {
                return Err(invalid(format!("{} piece has rank {}", player, rank)));
            }
            if !ranks.insert(rank) {
                return Err(invalid(format!("{} has two pieces of rank {}", player, rank)));
            }
            let terrain = board
                .get(pos)
                .ok_or_else(|| invalid(format!("{} {} at {} is off the board", player, get_animal(rank).name, pos)))?;
            if terrain == Terrain::Den(player) {
                return Err(invalid(format!("{} {} starts in its own den", player, get_animal(rank).name)));
            }
            if !occupied.insert(pos) {
                return Err(invalid(format!("two pieces placed at {}", pos)));
            }
        }
    }

    Ok(())
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidSetup(reason)
}
