//! Game state and move generation

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Pos, Terrain, DIRECTIONS};
use crate::error::{GameError, Result};
use crate::pieces::{get_animal, glyph_rank, rank_glyph, Movement, Rank};
use crate::setup::{validate_placements, Setup};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, Level};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => f.write_str("White"),
            Player::Black => f.write_str("Black"),
        }
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub rank: Rank,
    pub owner: Player,
    pub pos: Pos,
}

impl Piece {
    pub fn new(rank: Rank, owner: Player, pos: Pos) -> Self {
        Self { rank, owner, pos }
    }

    pub fn name(&self) -> &'static str {
        get_animal(self.rank).name
    }

    pub fn movement(&self) -> Movement {
        get_animal(self.rank).movement
    }

    /// Rank letter, uppercase for Black
    pub fn glyph(&self) -> char {
        let glyph = rank_glyph(self.rank);
        match self.owner {
            Player::White => glyph,
            Player::Black => glyph.to_ascii_uppercase(),
        }
    }

    /// Cells this piece may move to, captures included
    pub fn legal_destinations(&self, game: &GameState) -> Vec<Pos> {
        let mut dests = Vec::with_capacity(DIRECTIONS.len());
        for dest in self.candidates(game) {
            if !dests.contains(&dest) && self.accepts(game, dest) {
                dests.push(dest);
            }
        }
        dests
    }

    /// Reachable cells before occupancy rules
    fn candidates(&self, game: &GameState) -> Vec<Pos> {
        let board = &game.board;
        let mut candidates = Vec::with_capacity(DIRECTIONS.len());

        for &dir in &DIRECTIONS {
            let next = self.pos.offset(dir);
            let terrain = match board.get(next) {
                Some(t) => t,
                None => continue,
            };

            if terrain != Terrain::Water {
                candidates.push(next);
                continue;
            }

            match self.movement() {
                Movement::Walk => {}
                Movement::Swim => candidates.push(next),
                Movement::Jump => {
                    if let Some(landing) = game.jump_landing(next, dir) {
                        candidates.push(landing);
                    }
                }
            }
        }

        candidates
    }

    fn accepts(&self, game: &GameState, dest: Pos) -> bool {
        // Own den is closed even when an intruder stands in it
        if game.board.get(dest) == Some(Terrain::Den(self.owner)) {
            return false;
        }
        match game.pieces.get(&dest) {
            None => true,
            Some(victim) if victim.owner == self.owner => false,
            Some(victim) => self.can_capture(game, victim),
        }
    }

    /// Combat between this piece and an enemy piece it can reach
    fn can_capture(&self, game: &GameState, victim: &Piece) -> bool {
        let board = &game.board;

        // Attacks only water->water or ground->ground
        if board.is_water(self.pos) != board.is_water(victim.pos) {
            return false;
        }
        if board.get(victim.pos) == Some(Terrain::Trap) {
            return true;
        }
        // Rat beats Elephant when it strikes first
        if self.rank == 1 && victim.rank == 8 {
            return true;
        }
        self.rank >= victim.rank
    }
}

/// A move from one cell to another
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    pub fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = GameError;

    /// Parses `"col,row-col,row"`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GameError::InvalidMove(s.to_string());
        let (from, to) = s.trim().split_once('-').ok_or_else(invalid)?;
        let from = from.parse::<Pos>().map_err(|_| invalid())?;
        let to = to.parse::<Pos>().map_err(|_| invalid())?;
        Ok(Move::new(from, to))
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state: terrain, occupancy and side to move
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,

    /// Board: position -> piece (sparse representation)
    pieces: FxHashMap<Pos, Piece>,

    /// Side to move
    current_player: Player,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create new game from piece placements on the standard board
    ///
    /// Fails if a rank is outside 1..=8 or repeated within a color, a cell is
    /// off the board or taken twice, or a piece starts in its own den.
    pub fn new(
        white_pieces: &[(Rank, Pos)],
        black_pieces: &[(Rank, Pos)],
        first_player: Player,
    ) -> Result<Self> {
        validate_placements(white_pieces, black_pieces)?;
        Ok(Self::from_placements(white_pieces, black_pieces, first_player))
    }

    /// Standard opening position, White to move
    pub fn standard() -> Self {
        let setup = Setup::standard();
        let white = setup.placements(Player::White);
        let black = setup.placements(Player::Black);
        Self::from_placements(&white, &black, setup.first_player)
    }

    /// Placements already checked by `validate_placements`
    fn from_placements(
        white_pieces: &[(Rank, Pos)],
        black_pieces: &[(Rank, Pos)],
        first_player: Player,
    ) -> Self {
        let mut pieces = FxHashMap::default();

        for &(rank, pos) in white_pieces {
            pieces.insert(pos, Piece::new(rank, Player::White, pos));
        }
        for &(rank, pos) in black_pieces {
            pieces.insert(pos, Piece::new(rank, Player::Black, pos));
        }

        Self {
            board: Board::standard(),
            pieces,
            current_player: first_player,
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.board.contains(pos)
    }

    pub fn terrain_at(&self, pos: Pos) -> Result<Terrain> {
        self.board.terrain_at(pos)
    }

    pub fn is_wet(&self, pos: Pos) -> Result<bool> {
        self.board.is_wet(pos)
    }

    pub fn piece_at(&self, pos: Pos) -> Option<&Piece> {
        self.pieces.get(&pos)
    }

    /// Iterate pieces on board
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.values()
    }

    /// Piece of the side to move with the given rank
    pub fn piece_by_rank(&self, rank: Rank) -> Option<&Piece> {
        self.pieces
            .values()
            .find(|p| p.rank == rank && p.owner == self.current_player)
    }

    /// Piece of the side to move shown by `glyph` (case selects the color)
    pub fn piece_by_glyph(&self, glyph: char) -> Option<&Piece> {
        let rank = glyph_rank(glyph)?;
        self.piece_by_rank(rank).filter(|p| p.glyph() == glyph)
    }

    /// Legal destinations of the piece at `pos`, empty if there is none
    pub fn legal_destinations(&self, pos: Pos) -> Vec<Pos> {
        self.pieces
            .get(&pos)
            .map(|piece| piece.legal_destinations(self))
            .unwrap_or_default()
    }

    /// Pieces of the side to move that have at least one legal destination
    pub fn active_pieces(&self) -> Vec<Piece> {
        self.pieces
            .values()
            .filter(|p| p.owner == self.current_player && !p.legal_destinations(self).is_empty())
            .copied()
            .collect()
    }

    /// All legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.pieces.values() {
            if piece.owner != self.current_player {
                continue;
            }
            for to in piece.legal_destinations(self) {
                moves.push(Move::new(piece.pos, to));
            }
        }
        moves
    }

    /// Winner if the game is over
    ///
    /// Den capture is checked first; otherwise a side to move without any
    /// legal move loses.
    pub fn winner(&self) -> Option<Player> {
        for piece in self.pieces.values() {
            if self.board.get(piece.pos) == Some(Terrain::Den(piece.owner.opponent())) {
                return Some(piece.owner);
            }
        }

        let can_move = self
            .pieces
            .values()
            .any(|p| p.owner == self.current_player && !p.legal_destinations(self).is_empty());
        if !can_move {
            return Some(self.current_player.opponent());
        }

        None
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Move the piece at `from` to `to`, returning the captured piece
    ///
    /// The move must be one of the piece's legal destinations and the piece
    /// must belong to the side to move. On error the state is unchanged.
    pub fn apply_move(&mut self, from: Pos, to: Pos) -> Result<Option<Piece>> {
        if let Some(winner) = self.winner() {
            return Err(GameError::GameOver(winner));
        }

        let piece = *self.pieces.get(&from).ok_or(GameError::NoPiece(from))?;
        if piece.owner != self.current_player {
            return Err(GameError::WrongTurn { pos: from, owner: piece.owner });
        }
        if !piece.legal_destinations(self).contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }

        Ok(self.relocate(from, to))
    }

    /// Relocate a piece, no questions asked
    fn relocate(&mut self, from: Pos, to: Pos) -> Option<Piece> {
        let Some(mut piece) = self.pieces.remove(&from) else {
            return None;
        };
        piece.pos = to;
        let captured = self.pieces.insert(to, piece);

        if let Some(victim) = captured {
            debug!(%from, %to, attacker = piece.name(), victim = victim.name(), "capture");
        }

        self.current_player = piece.owner.opponent();
        debug!(%from, %to, next = %self.current_player, "move applied");

        if tracing::enabled!(Level::DEBUG) {
            if let Some(winner) = self.winner() {
                debug!(%winner, "game over");
            }
        }

        captured
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// WATER CROSSING
// ============================================================================

impl GameState {
    /// Landing cell of a leap that enters water at `first` heading `dir`
    ///
    /// Any piece in the water blocks the leap, as does running off the board.
    fn jump_landing(&self, first: Pos, dir: (i8, i8)) -> Option<Pos> {
        let mut current = first;
        while self.board.is_water(current) {
            if self.pieces.contains_key(&current) {
                return None;
            }
            current = current.offset(dir);
        }
        self.board.contains(current).then_some(current)
    }
}

// ============================================================================
// TESTS
// ============================================================================
