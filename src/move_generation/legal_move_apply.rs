//! Move application, both onto disposable board copies and in place with undo.

use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoState};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::king_moves::{KINGSIDE_TARGET_COL, QUEENSIDE_TARGET_COL};
use crate::moves::move_descriptions::Move;

/// Side effects a move has beyond relocating its piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveEffects {
    /// Captured piece and the square it stood on (differs from `to` for en passant).
    pub captured: Option<(Square, Piece)>,
    pub en_passant: bool,
    /// Rook relocation for castling.
    pub castling_rook: Option<(Square, Square)>,
    /// Piece placed on `to` when a pawn promotes.
    pub promotion: Option<Piece>,
}

impl MoveEffects {
    pub fn is_castling(&self) -> bool {
        self.castling_rook.is_some()
    }
}

/// Derives the effects of `mv` from the board it will be played on.
pub fn classify_move(board: &Board, mv: &Move) -> MoveEffects {
    let mut effects = MoveEffects {
        captured: board.get(mv.to).map(|piece| (mv.to, piece)),
        ..MoveEffects::default()
    };
    let color = mv.piece.color;

    match mv.piece.kind {
        PieceKind::Pawn => {
            // A diagonal step onto an empty square can only be en passant.
            if mv.from.col != mv.to.col && effects.captured.is_none() {
                let passed = Square::new(mv.from.row, mv.to.col);
                if let Some(victim) = board.get(passed).filter(|p| p.color != color) {
                    effects.captured = Some((passed, victim));
                    effects.en_passant = true;
                }
            }
            if mv.to.row == color.promotion_row() {
                effects.promotion = Some(Piece::new(PieceKind::Queen, color));
            }
        }
        PieceKind::King if (mv.to.col - mv.from.col).abs() == 2 => {
            let row = mv.from.row;
            effects.castling_rook = match mv.to.col {
                KINGSIDE_TARGET_COL => Some((Square::new(row, 7), Square::new(row, 5))),
                QUEENSIDE_TARGET_COL => Some((Square::new(row, 0), Square::new(row, 3))),
                _ => None,
            };
        }
        _ => {}
    }

    effects
}

/// Writes `mv` and its effects onto `board`.
pub fn apply_to_board(board: &mut Board, mv: &Move, effects: &MoveEffects) {
    board.set(mv.from, None);
    if let Some((square, _)) = effects.captured {
        board.set(square, None);
    }
    board.set(mv.to, Some(effects.promotion.unwrap_or(mv.piece)));
    if let Some((rook_from, rook_to)) = effects.castling_rook {
        let rook = board.take(rook_from);
        board.set(rook_to, rook);
    }
}

/// Board after `mv`, leaving the original untouched.
pub fn apply_to_copy(board: &Board, mv: &Move) -> Board {
    let mut copy = *board;
    let effects = classify_move(board, mv);
    apply_to_board(&mut copy, mv, &effects);
    copy
}

/// Plays `mv` on the live state and returns what is needed to revert it.
///
/// Updates castling flags, last move, turn, move count and halfmove clock. The game
/// outcome is left to the caller.
pub fn make_move_in_place(
    game_state: &mut GameState,
    mv: &Move,
) -> MoveGenResult<(UndoState, MoveEffects)> {
    match game_state.board.get(mv.from) {
        None => return Err(MoveGenerationError::EmptySource(mv.from)),
        Some(piece) if piece != mv.piece => return Err(MoveGenerationError::PieceMismatch(*mv)),
        Some(_) => {}
    }

    let effects = classify_move(&game_state.board, mv);
    let mut undo = UndoState::capture(game_state);
    undo.record_square(&game_state.board, mv.from);
    undo.record_square(&game_state.board, mv.to);
    if let Some((square, _)) = effects.captured.filter(|_| effects.en_passant) {
        undo.record_square(&game_state.board, square);
    }
    if let Some((rook_from, rook_to)) = effects.castling_rook {
        undo.record_square(&game_state.board, rook_from);
        undo.record_square(&game_state.board, rook_to);
    }

    apply_to_board(&mut game_state.board, mv, &effects);
    update_castling_rights(&mut game_state.castling, mv, &effects);

    game_state.halfmove_clock = if mv.piece.kind == PieceKind::Pawn || effects.captured.is_some() {
        0
    } else {
        game_state.halfmove_clock + 1
    };
    game_state.last_move = Some(LastMove {
        from: mv.from,
        to: mv.to,
        piece: mv.piece,
    });
    game_state.turn = mv.piece.color.opposite();
    game_state.move_count += 1;

    Ok((undo, effects))
}

/// Restores the state captured in `undo`.
pub fn unmake_move(game_state: &mut GameState, undo: UndoState) {
    for (square, piece) in undo.touched_squares() {
        game_state.board.set(square, piece);
    }
    game_state.turn = undo.prev_turn;
    game_state.castling = undo.prev_castling;
    game_state.last_move = undo.prev_last_move;
    game_state.move_count = undo.prev_move_count;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.outcome = undo.prev_outcome;
}

fn update_castling_rights(castling: &mut CastlingRights, mv: &Move, effects: &MoveEffects) {
    let color = mv.piece.color;
    match mv.piece.kind {
        PieceKind::King => castling.side_mut(color).king_moved = true,
        PieceKind::Rook => castling.revoke_rook_at(color, mv.from),
        _ => {}
    }
    // A rook captured in its corner can no longer castle either.
    if let Some((square, piece)) = effects.captured {
        if piece.kind == PieceKind::Rook {
            castling.revoke_rook_at(piece.color, square);
        }
    }
}
