use thiserror::Error;

use crate::errors::GameError;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::MoveContext;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::king_destinations;
use crate::moves::knight_moves::knight_destinations;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::pawn_destinations;
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    #[error("no piece on {0}")]
    EmptySource(Square),
    #[error("move {0} does not match the piece on its source square")]
    PieceMismatch(Move),
    #[error("{0} king is missing")]
    MissingKing(Color),
}

impl From<MoveGenerationError> for GameError {
    fn from(err: MoveGenerationError) -> Self {
        GameError::Invariant(err.to_string())
    }
}

/// Produces the legal moves of one side, independent of whose turn it is.
pub trait MoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState, color: Color) -> Vec<Move>;
}

/// Pseudo-legal destinations for the piece on `from`, dispatched by kind.
/// An empty square yields nothing.
pub fn pseudo_legal_destinations(ctx: &MoveContext<'_>, from: Square, out: &mut Vec<Square>) {
    let Some(piece) = ctx.board.get(from) else {
        return;
    };
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(ctx, from, piece.color, out),
        PieceKind::Knight => knight_destinations(ctx, from, piece.color, out),
        PieceKind::Bishop => bishop_destinations(ctx, from, piece.color, out),
        PieceKind::Rook => rook_destinations(ctx, from, piece.color, out),
        PieceKind::Queen => queen_destinations(ctx, from, piece.color, out),
        PieceKind::King => king_destinations(ctx, from, piece.color, out),
    }
}
