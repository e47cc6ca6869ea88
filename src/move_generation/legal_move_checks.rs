use crate::game_state::chess_types::{Board, Color, PieceKind, Square};
use crate::move_generation::legal_move_shared::{DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS};
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;

/// True when `color`'s king is attacked. A board without that king reports `false`.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// True when any `attacker_color` piece attacks `square`. Returns on the first hit.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let is_attacker = |sq: Square, kinds: &[PieceKind]| {
        board
            .get(sq)
            .is_some_and(|p| p.color == attacker_color && kinds.contains(&p.kind))
    };

    // A pawn attacks from one row behind the target, from its own point of view.
    let pawn_row = -attacker_color.forward();
    for d_col in [-1, 1] {
        if let Some(sq) = square.offset(pawn_row, d_col) {
            if is_attacker(sq, &[PieceKind::Pawn]) {
                return true;
            }
        }
    }

    if KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(r, c)| square.offset(r, c))
        .any(|sq| is_attacker(sq, &[PieceKind::Knight]))
    {
        return true;
    }

    if first_piece_on_rays(board, square, &ORTHOGONAL_DIRECTIONS)
        .any(|sq| is_attacker(sq, &[PieceKind::Rook, PieceKind::Queen]))
    {
        return true;
    }

    if first_piece_on_rays(board, square, &DIAGONAL_DIRECTIONS)
        .any(|sq| is_attacker(sq, &[PieceKind::Bishop, PieceKind::Queen]))
    {
        return true;
    }

    KING_OFFSETS
        .iter()
        .filter_map(|&(r, c)| square.offset(r, c))
        .any(|sq| is_attacker(sq, &[PieceKind::King]))
}

/// First occupied square along each ray, if any.
fn first_piece_on_rays<'a>(
    board: &'a Board,
    origin: Square,
    directions: &'a [(i8, i8)],
) -> impl Iterator<Item = Square> + 'a {
    directions.iter().filter_map(move |&(d_row, d_col)| {
        let mut cursor = origin;
        while let Some(next) = cursor.offset(d_row, d_col) {
            if !board.is_empty_at(next) {
                return Some(next);
            }
            cursor = next;
        }
        None
    })
}
