use std::ops::{Deref, DerefMut};

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::unmake_move;
use crate::moves::move_descriptions::GameOver;

const MAX_TOUCHED_SQUARES: usize = 4;

/// Single undo record for an in-place move. Holds the prior contents of every
/// square the move wrote, plus the side state it replaced.
#[derive(Debug, Clone)]
pub struct UndoState {
    touched: [(Square, Option<Piece>); MAX_TOUCHED_SQUARES],
    touched_len: usize,

    pub prev_turn: Color,
    pub prev_castling: CastlingRights,
    pub prev_last_move: Option<LastMove>,
    pub prev_move_count: u32,
    pub prev_halfmove_clock: u32,
    pub prev_outcome: Option<GameOver>,
}

impl UndoState {
    pub fn capture(game_state: &GameState) -> Self {
        Self {
            touched: [(Square::new(0, 0), None); MAX_TOUCHED_SQUARES],
            touched_len: 0,
            prev_turn: game_state.turn,
            prev_castling: game_state.castling,
            prev_last_move: game_state.last_move,
            prev_move_count: game_state.move_count,
            prev_halfmove_clock: game_state.halfmove_clock,
            prev_outcome: game_state.outcome,
        }
    }

    /// Remembers the current content of `square` before it is overwritten.
    pub fn record_square(&mut self, board: &Board, square: Square) {
        debug_assert!(
            self.touched_len < MAX_TOUCHED_SQUARES,
            "undo record overflow at {square}"
        );
        if self.touched_len < MAX_TOUCHED_SQUARES {
            self.touched[self.touched_len] = (square, board.get(square));
            self.touched_len += 1;
        }
    }

    /// Recorded squares, most recent first.
    pub fn touched_squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        self.touched[..self.touched_len].iter().rev().copied()
    }
}

/// Applied hypothetical move that reverts itself when dropped.
///
/// The search explores lines through `&mut GameState`; the guard makes sure the
/// position is restored on every exit path, including early returns.
pub struct MoveGuard<'a> {
    game_state: &'a mut GameState,
    undo: Option<UndoState>,
}

impl<'a> MoveGuard<'a> {
    pub(crate) fn new(game_state: &'a mut GameState, undo: UndoState) -> Self {
        Self {
            game_state,
            undo: Some(undo),
        }
    }
}

impl Deref for MoveGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.game_state
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.game_state
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            unmake_move(self.game_state, undo);
        }
    }
}
