use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::legal_move_shared::MoveContext;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::rook_moves::rook_destinations;

pub fn queen_destinations(ctx: &MoveContext<'_>, from: Square, color: Color, out: &mut Vec<Square>) {
    rook_destinations(ctx, from, color, out);
    bishop_destinations(ctx, from, color, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Board, CastlingRights};

    #[test]
    fn central_queen_on_empty_board_has_twenty_seven_targets() {
        let board = Board::empty();
        let castling = CastlingRights::default();
        let ctx = MoveContext {
            board: &board,
            castling: &castling,
            last_move: None,
        };
        let mut out = Vec::new();
        queen_destinations(&ctx, Square::new(4, 3), Color::White, &mut out);
        assert_eq!(out.len(), 27);
    }
}
