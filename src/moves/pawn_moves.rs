use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::move_generation::legal_move_shared::{is_enemy_at, MoveContext};

pub fn pawn_destinations(ctx: &MoveContext<'_>, from: Square, color: Color, out: &mut Vec<Square>) {
    let dir = color.forward();

    if let Some(one) = from.offset(dir, 0).filter(|&sq| ctx.board.is_empty_at(sq)) {
        out.push(one);
        if from.row == color.pawn_start_row() {
            if let Some(two) = one.offset(dir, 0).filter(|&sq| ctx.board.is_empty_at(sq)) {
                out.push(two);
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = from.offset(dir, d_col) {
            if is_enemy_at(ctx.board, target, color) {
                out.push(target);
            }
        }
    }

    if let Some(target) = en_passant_target(ctx, from, color) {
        out.push(target);
    }
}

/// Square behind an enemy pawn that just advanced two squares beside `from`.
pub fn en_passant_target(ctx: &MoveContext<'_>, from: Square, color: Color) -> Option<Square> {
    let last = ctx.last_move?;
    if last.piece.kind != PieceKind::Pawn || last.piece.color == color {
        return None;
    }
    last.double_push_target()?;
    if last.to.row != from.row || (last.to.col - from.col).abs() != 1 {
        return None;
    }
    from.offset(color.forward(), last.to.col - from.col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Board, CastlingRights, LastMove, Piece};

    fn destinations(board: &Board, last_move: Option<LastMove>, from: Square, color: Color) -> Vec<Square> {
        let castling = CastlingRights::default();
        let ctx = MoveContext {
            board,
            castling: &castling,
            last_move,
        };
        let mut out = Vec::new();
        pawn_destinations(&ctx, from, color, &mut out);
        out
    }

    #[test]
    fn start_row_pawn_offers_single_and_double_push() {
        let out = destinations(&Board::starting_position(), None, Square::new(6, 4), Color::White);
        assert_eq!(out, vec![Square::new(5, 4), Square::new(4, 4)]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut board = Board::starting_position();
        board.set(Square::new(5, 4), Some(Piece::new(PieceKind::Knight, Color::Black)));
        let out = destinations(&board, None, Square::new(6, 4), Color::White);
        assert!(out.is_empty());
    }

    #[test]
    fn black_pawn_moves_down_the_board_and_captures_diagonally() {
        let mut board = Board::empty();
        board.set(Square::new(3, 3), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        board.set(Square::new(4, 4), Some(Piece::new(PieceKind::Pawn, Color::White)));
        let out = destinations(&board, None, Square::new(3, 3), Color::Black);
        assert!(out.contains(&Square::new(4, 3)));
        assert!(out.contains(&Square::new(4, 4)));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn en_passant_follows_an_adjacent_double_push() {
        let mut board = Board::empty();
        board.set(Square::new(3, 4), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.set(Square::new(3, 5), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        let last = LastMove {
            from: Square::new(1, 5),
            to: Square::new(3, 5),
            piece: Piece::new(PieceKind::Pawn, Color::Black),
        };
        let out = destinations(&board, Some(last), Square::new(3, 4), Color::White);
        assert!(out.contains(&Square::new(2, 5)));

        let single_step = LastMove {
            from: Square::new(2, 5),
            ..last
        };
        let out = destinations(&board, Some(single_step), Square::new(3, 4), Color::White);
        assert!(!out.contains(&Square::new(2, 5)));
    }
}
