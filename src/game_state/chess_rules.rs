//! Canonical chess-rule constants and material-draw detection.

use crate::game_state::chess_types::{Board, PieceKind, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Neither side can deliver mate: K v K, K+minor v K, or K+B v K+B with both
/// bishops on the same square color.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors: Vec<(PieceKind, Square)> = Vec::with_capacity(2);
    for (square, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop if minors.len() < 2 => {
                minors.push((piece.kind, square));
            }
            _ => return false,
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [(PieceKind::Bishop, a), (PieceKind::Bishop, b)] => {
            let owners = (board.get(*a), board.get(*b));
            match owners {
                (Some(pa), Some(pb)) => pa.color != pb.color && a.is_dark() == b.is_dark(),
                _ => false,
            }
        }
        _ => false,
    }
}
