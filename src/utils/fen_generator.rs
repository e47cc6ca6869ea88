use crate::game_state::{chess_types::*, game_state::GameState};

/// Encodes `ranks side castling en-passant halfmove fullmove`.
pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(&game_state.board);
    let side_to_move = match game_state.turn {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(game_state);
    let en_passant = generate_en_passant_field(game_state.last_move);

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number()
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for (row_index, row) in board.rows().iter().enumerate() {
        let mut empty_count = 0u8;

        for cell in row {
            if let Some(piece) = cell {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row_index < 7 {
            out.push('/');
        }
    }

    out
}

/// Rights come from the moved flags only; a missing rook does not clear them.
fn generate_castling_field(game_state: &GameState) -> String {
    let white = game_state.castling.white;
    let black = game_state.castling.black;
    let mut out = String::new();

    if white.can_castle_kingside() {
        out.push('K');
    }
    if white.can_castle_queenside() {
        out.push('Q');
    }
    if black.can_castle_kingside() {
        out.push('k');
    }
    if black.can_castle_queenside() {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(last_move: Option<LastMove>) -> String {
    last_move
        .and_then(|last| last.double_push_target())
        .map_or_else(|| "-".to_owned(), |square| square.to_string())
}
