//! Text and JSON views of a game

use std::fmt;

use serde::Serialize;

use crate::board::{Board, Pos, HEIGHT, WIDTH};
use crate::game::{GameState, Piece, Player};

/// Board as rows of glyphs: terrain with pieces overlaid
fn glyph_rows(game: &GameState) -> Vec<Vec<char>> {
    let board = game.board();
    (0..HEIGHT)
        .map(|row| {
            (0..WIDTH)
                .map(|col| {
                    let pos = Pos::new(col, row);
                    match game.piece_at(pos) {
                        Some(piece) => piece.glyph(),
                        None => board.get(pos).map(|t| t.glyph()).unwrap_or(' '),
                    }
                })
                .collect()
        })
        .collect()
}

fn join_rows(rows: Vec<Vec<char>>) -> String {
    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_rows(glyph_rows(self)))
    }
}

/// Board text with hint characters drawn over the given cells
pub fn render_with_hints(game: &GameState, hints: &[(char, Pos)]) -> String {
    let mut rows = glyph_rows(game);
    for &(hint, pos) in hints {
        if game.contains(pos) {
            rows[pos.row as usize][pos.col as usize] = hint;
        }
    }
    join_rows(rows)
}

/// Serializable copy of a game for collaborators
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    /// Terrain glyph rows, Black's den on top
    pub terrain: Vec<String>,
    /// Pieces sorted by position
    pub pieces: Vec<PieceView>,
    pub current_player: Player,
    pub winner: Option<Player>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PieceView {
    pub name: &'static str,
    pub glyph: char,
    #[serde(flatten)]
    pub piece: Piece,
}

impl Snapshot {
    pub fn of(game: &GameState) -> Self {
        let board: &Board = game.board();
        let terrain = (0..HEIGHT)
            .map(|row| {
                (0..WIDTH)
                    .filter_map(|col| board.get(Pos::new(col, row)).map(|t| t.glyph()))
                    .collect()
            })
            .collect();

        let mut pieces: Vec<PieceView> = game
            .pieces()
            .map(|&piece| PieceView { name: piece.name(), glyph: piece.glyph(), piece })
            .collect();
        pieces.sort_by_key(|v| (v.piece.pos.row, v.piece.pos.col));

        Self {
            terrain,
            pieces,
            current_player: game.current_player(),
            winner: game.winner(),
        }
    }
}
