use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::legal_move_shared::{
    push_sliding_destinations, MoveContext, ORTHOGONAL_DIRECTIONS,
};

pub fn rook_destinations(ctx: &MoveContext<'_>, from: Square, color: Color, out: &mut Vec<Square>) {
    push_sliding_destinations(ctx.board, from, color, &ORTHOGONAL_DIRECTIONS, out);
}
