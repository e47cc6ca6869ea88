//! Error types shared across the rules engine, FEN parsing, and weight persistence.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};
use crate::moves::move_descriptions::GameOver;

/// Rejections produced by the game state machine. A failed request never mutates state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid coordinates: {0} is off the board")]
    InvalidCoordinates(Square),

    #[error("no piece at {0}")]
    NoPieceAtSource(Square),

    #[error("unknown player `{0}`")]
    UnknownPlayer(String),

    #[error("not your turn: {expected} is to move")]
    NotYourTurn { expected: Color },

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("move from {from} to {to} would leave the {color} king in check")]
    LeavesKingInCheck { from: Square, to: Square, color: Color },

    #[error("game is already over ({0})")]
    GameOver(GameOver),

    /// Corrupted position, e.g. a side without a king. Not a user error.
    #[error("board invariant violated: {0}")]
    Invariant(String),
}

pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 space-separated fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: usize },

    #[error("invalid piece character `{0}`")]
    InvalidPiece(char),

    #[error("invalid side to move `{0}`")]
    InvalidSideToMove(String),

    #[error("invalid castling field `{0}`")]
    InvalidCastling(String),

    #[error("invalid en passant field `{0}`")]
    InvalidEnPassant(String),

    #[error("invalid move counter `{0}`")]
    InvalidCounter(String),

    #[error("position has no {0} king")]
    MissingKing(Color),

    #[error("position has more than one {0} king")]
    DuplicateKing(Color),
}

#[derive(Error, Debug)]
pub enum WeightsStoreError {
    #[error("weights file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("weights serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no weights have been stored yet")]
    NotFound,
}
