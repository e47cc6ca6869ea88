use crate::game_state::chess_types::{Board, CastlingRights, Color, LastMove, Square};

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Read-only view of the position a piece generator needs.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub board: &'a Board,
    pub castling: &'a CastlingRights,
    pub last_move: Option<LastMove>,
}

/// True when `square` is empty or holds an enemy of `color`.
#[inline]
pub fn is_open_for(board: &Board, square: Square, color: Color) -> bool {
    board.get(square).map_or(true, |piece| piece.color != color)
}

#[inline]
pub fn is_enemy_at(board: &Board, square: Square, color: Color) -> bool {
    board.get(square).is_some_and(|piece| piece.color != color)
}

/// Walks each ray until the edge, stopping before an own piece and on an enemy piece.
pub fn push_sliding_destinations(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_row, d_col) {
            match board.get(next) {
                None => out.push(next),
                Some(piece) => {
                    if piece.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
}

/// Fixed-offset destinations (knight, king steps), in bounds and not own-occupied.
pub fn push_step_destinations(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    out.extend(
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
            .filter(|&sq| is_open_for(board, sq, color)),
    );
}
