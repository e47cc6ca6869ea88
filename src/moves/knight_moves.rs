use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::legal_move_shared::{push_step_destinations, MoveContext};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub fn knight_destinations(ctx: &MoveContext<'_>, from: Square, color: Color, out: &mut Vec<Square>) {
    push_step_destinations(ctx.board, from, color, &KNIGHT_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Board, CastlingRights};

    fn destinations(board: &Board, from: Square) -> Vec<Square> {
        let castling = CastlingRights::default();
        let ctx = MoveContext {
            board,
            castling: &castling,
            last_move: None,
        };
        let mut out = Vec::new();
        knight_destinations(&ctx, from, Color::White, &mut out);
        out
    }

    #[test]
    fn knight_in_the_center_has_eight_targets() {
        assert_eq!(destinations(&Board::empty(), Square::new(4, 3)).len(), 8);
    }

    #[test]
    fn knight_on_starting_square_skips_own_pawns() {
        let targets = destinations(&Board::starting_position(), Square::new(7, 6));
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&Square::new(5, 5)));
        assert!(targets.contains(&Square::new(5, 7)));
    }
}
