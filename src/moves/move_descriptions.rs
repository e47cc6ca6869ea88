use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{Board, Color, Piece, Square};

/// A legal move as produced by the rules engine. Carries no score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Token on `from` when the move was generated.
    pub piece: Piece,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece) -> Self {
        Self { from, to, piece }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// A move ranked by the evaluator. Scores are centipawns from the mover's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    #[serde(flatten)]
    pub mv: Move,
    pub score: i32,
}

/// Terminal classification of a position, reported for the side that just moved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOver {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
}

impl fmt::Display for GameOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameOver::Checkmate => "checkmate",
            GameOver::Stalemate => "stalemate",
            GameOver::InsufficientMaterial => "insufficient_material",
        })
    }
}

/// Snapshot of one committed move, detached from the live game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    /// Captured token, including a pawn taken en passant.
    pub capture: Option<Piece>,
    pub promotion: bool,
    pub promotion_piece: Option<Piece>,
    pub en_passant: bool,
    pub castling: bool,
    pub board: Board,
    /// Side to move after the commit.
    pub turn: Color,
    /// Color whose king is now attacked, if any.
    pub check: Option<Color>,
    pub game_over: Option<GameOver>,
    pub winner: Option<Color>,
}
