//! Error types

use crate::board::Pos;
use crate::game::Player;

pub type Result<T, E = GameError> = std::result::Result<T, E>;

/// Errors raised by the rules engine
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("position {0} is off the board")]
    OutOfBounds(Pos),

    #[error("no piece at {0}")]
    NoPiece(Pos),

    #[error("piece at {pos} belongs to {owner:?}, who is not to move")]
    WrongTurn { pos: Pos, owner: Player },

    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: Pos, to: Pos },

    #[error("game is over, {0:?} has won")]
    GameOver(Player),

    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    #[error("invalid position {0:?}, expected \"col,row\"")]
    InvalidPosition(String),

    #[error("invalid move {0:?}, expected \"col,row-col,row\"")]
    InvalidMove(String),
}
