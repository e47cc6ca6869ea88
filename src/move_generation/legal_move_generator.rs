//! Legal move generation.
//!
//! Pseudo-legal destinations come from the per-piece generators; each candidate is
//! then played on a disposable board copy and discarded if it leaves the mover's
//! king attacked.

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_to_copy, classify_move};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::legal_move_shared::MoveContext;
use crate::move_generation::move_generator::{pseudo_legal_destinations, MoveGenerator};
use crate::moves::move_descriptions::Move;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState, color: Color) -> Vec<Move> {
        legal_moves_for(game_state, color)
    }
}

/// Legal moves of the piece on `from`, whatever its color. Empty or off-board squares yield none.
pub fn legal_moves_from(game_state: &GameState, from: Square) -> Vec<Move> {
    let Some(piece) = game_state.board.get(from) else {
        return Vec::new();
    };

    let ctx = move_context(game_state);
    let mut destinations = Vec::with_capacity(28);
    pseudo_legal_destinations(&ctx, from, &mut destinations);

    destinations
        .into_iter()
        .map(|to| Move::new(from, to, piece))
        .filter(|mv| is_legal_candidate(game_state, mv))
        .collect()
}

/// All legal moves for `color`, in board order.
pub fn legal_moves_for(game_state: &GameState, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (square, _) in game_state.board.pieces_of(color) {
        moves.extend(legal_moves_from(game_state, square));
    }
    moves
}

pub fn has_any_legal_move(game_state: &GameState, color: Color) -> bool {
    game_state
        .board
        .pieces_of(color)
        .any(|(square, _)| !legal_moves_from(game_state, square).is_empty())
}

/// Rejects a pseudo-legal move that leaves the mover in check.
///
/// Castling is also rejected when the king starts in check or crosses an attacked
/// square; the landing square is covered by the ordinary self-check test.
pub fn is_legal_candidate(game_state: &GameState, mv: &Move) -> bool {
    let color = mv.piece.color;
    let board = &game_state.board;

    if classify_move(board, mv).is_castling() {
        let transit = Square::new(mv.from.row, (mv.from.col + mv.to.col) / 2);
        if is_king_in_check(board, color) || is_square_attacked(board, transit, color.opposite()) {
            return false;
        }
    }

    !is_king_in_check(&apply_to_copy(board, mv), color)
}

pub(crate) fn move_context(game_state: &GameState) -> MoveContext<'_> {
    MoveContext {
        board: &game_state.board,
        castling: &game_state.castling,
        last_move: game_state.last_move,
    }
}
