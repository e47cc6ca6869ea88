use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::move_generation::legal_move_shared::{push_step_destinations, MoveContext};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const KING_HOME_COL: i8 = 4;
pub const KINGSIDE_TARGET_COL: i8 = 6;
pub const QUEENSIDE_TARGET_COL: i8 = 2;

/// Step destinations plus castling targets.
///
/// Castling is offered here when the king and the relevant rook are unmoved and the
/// squares between them are empty. Whether the king passes through an attacked square
/// is decided by the legality filter, not here.
pub fn king_destinations(ctx: &MoveContext<'_>, from: Square, color: Color, out: &mut Vec<Square>) {
    push_step_destinations(ctx.board, from, color, &KING_OFFSETS, out);
    push_castling_destinations(ctx, from, color, out);
}

fn push_castling_destinations(ctx: &MoveContext<'_>, from: Square, color: Color, out: &mut Vec<Square>) {
    let home = color.home_row();
    if from != Square::new(home, KING_HOME_COL) {
        return;
    }
    let rights = ctx.castling.side(color);
    let rook = Some(Piece::new(PieceKind::Rook, color));
    let all_empty = |cols: &[i8]| cols.iter().all(|&c| ctx.board.is_empty_at(Square::new(home, c)));

    if rights.can_castle_kingside() && ctx.board.get(Square::new(home, 7)) == rook && all_empty(&[5, 6]) {
        out.push(Square::new(home, KINGSIDE_TARGET_COL));
    }
    if rights.can_castle_queenside() && ctx.board.get(Square::new(home, 0)) == rook && all_empty(&[1, 2, 3]) {
        out.push(Square::new(home, QUEENSIDE_TARGET_COL));
    }
}
