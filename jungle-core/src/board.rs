//! Board geometry and terrain

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::game::Player;

/// Number of columns
pub const WIDTH: i8 = 7;

/// Number of rows
pub const HEIGHT: i8 = 9;

/// Orthogonal direction vectors (dcol, drow)
/// Index: 0=S, 1=E, 2=N, 3=W (rows grow towards White's side)
pub const DIRECTIONS: [(i8, i8); 4] = [
    (0, 1),   // S
    (1, 0),   // E
    (0, -1),  // N
    (-1, 0),  // W
];

const G: Terrain = Terrain::Ground;
const W: Terrain = Terrain::Water;
const T: Terrain = Terrain::Trap;
const BD: Terrain = Terrain::Den(Player::Black);
const WD: Terrain = Terrain::Den(Player::White);

/// Terrain rows, Black's den on top
const LAYOUT: [[Terrain; WIDTH as usize]; HEIGHT as usize] = [
    [G, G, T, BD, T, G, G],
    [G, G, G, T, G, G, G],
    [G, G, G, G, G, G, G],
    [G, W, W, G, W, W, G],
    [G, W, W, G, W, W, G],
    [G, W, W, G, W, W, G],
    [G, G, G, G, G, G, G],
    [G, G, G, T, G, G, G],
    [G, G, T, WD, T, G, G],
];

/// Board cell coordinates (column, row), 0-indexed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub col: i8,
    pub row: i8,
}

impl Pos {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// Cell one step away in the given direction (may be off the board)
    pub fn offset(&self, (dcol, drow): (i8, i8)) -> Pos {
        Pos::new(self.col + dcol, self.row + drow)
    }

    /// Orthogonal neighbours, including off-board ones
    pub fn neighbors(&self) -> impl Iterator<Item = Pos> + '_ {
        DIRECTIONS.iter().map(move |&dir| self.offset(dir))
    }

    /// Point reflection through the board centre
    pub fn mirrored(&self) -> Pos {
        Pos::new(WIDTH - 1 - self.col, HEIGHT - 1 - self.row)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

impl FromStr for Pos {
    type Err = GameError;

    /// Parses `"col,row"`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GameError::InvalidPosition(s.to_string());
        let (col, row) = s.trim().split_once(',').ok_or_else(invalid)?;
        let col = col.trim().parse::<i8>().map_err(|_| invalid())?;
        let row = row.trim().parse::<i8>().map_err(|_| invalid())?;
        Ok(Pos::new(col, row))
    }
}

/// Kind of a board cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Ground,
    Water,
    Trap,
    Den(Player),
}

impl Terrain {
    pub fn glyph(self) -> char {
        match self {
            Terrain::Ground => '.',
            Terrain::Water => '~',
            Terrain::Trap => '^',
            Terrain::Den(Player::Black) => 'Z',
            Terrain::Den(Player::White) => 'z',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Terrain::Ground),
            '~' => Some(Terrain::Water),
            '^' => Some(Terrain::Trap),
            'Z' => Some(Terrain::Den(Player::Black)),
            'z' => Some(Terrain::Den(Player::White)),
            _ => None,
        }
    }
}

/// Immutable terrain grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Terrain; WIDTH as usize]; HEIGHT as usize],
}

impl Board {
    /// The fixed 7x9 layout: three water blocks per side of a land strip,
    /// traps around each den
    pub fn standard() -> Self {
        Self { cells: LAYOUT }
    }

    /// Check if a position is on the board
    pub fn contains(&self, pos: Pos) -> bool {
        (0..WIDTH).contains(&pos.col) && (0..HEIGHT).contains(&pos.row)
    }

    /// Terrain at `pos`, `None` off the board
    pub fn get(&self, pos: Pos) -> Option<Terrain> {
        if self.contains(pos) {
            Some(self.cells[pos.row as usize][pos.col as usize])
        } else {
            None
        }
    }

    pub fn terrain_at(&self, pos: Pos) -> Result<Terrain> {
        self.get(pos).ok_or(GameError::OutOfBounds(pos))
    }

    pub fn is_wet(&self, pos: Pos) -> Result<bool> {
        Ok(self.terrain_at(pos)? == Terrain::Water)
    }

    /// Water check for positions already known to be on the board
    pub(crate) fn is_water(&self, pos: Pos) -> bool {
        self.get(pos) == Some(Terrain::Water)
    }

    /// Den cell of a player
    pub fn den(&self, player: Player) -> Pos {
        match player {
            Player::Black => Pos::new(3, 0),
            Player::White => Pos::new(3, HEIGHT - 1),
        }
    }

    /// All cells in row-major order
    pub fn positions() -> impl Iterator<Item = Pos> {
        (0..HEIGHT).flat_map(|row| (0..WIDTH).map(move |col| Pos::new(col, row)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
