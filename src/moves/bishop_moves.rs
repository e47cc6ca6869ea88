use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::legal_move_shared::{
    push_sliding_destinations, MoveContext, DIAGONAL_DIRECTIONS,
};

pub fn bishop_destinations(ctx: &MoveContext<'_>, from: Square, color: Color, out: &mut Vec<Square>) {
    push_sliding_destinations(ctx.board, from, color, &DIAGONAL_DIRECTIONS, out);
}
