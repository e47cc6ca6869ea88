//! FEN-to-GameState parser.
//!
//! The en passant field is turned back into the double pawn push that produced it,
//! since the game tracks en passant through the last move.

use crate::errors::FenError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::MissingFields(parts.len()));
    }

    let board = parse_board(parts[0])?;
    let turn = parse_side_to_move(parts[1])?;
    for color in [Color::White, Color::Black] {
        let kings = board
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count();
        match kings {
            0 => return Err(FenError::MissingKing(color)),
            1 => {}
            _ => return Err(FenError::DuplicateKing(color)),
        }
    }

    let mut game_state = GameState::from_parts(board, turn);
    game_state.castling = parse_castling_rights(parts[2])?;
    game_state.last_move = parse_en_passant(parts[3], &board, turn)?;
    game_state.halfmove_clock = parse_counter(parts.get(4).copied(), 0)?;

    let fullmove_field = parts.get(5).copied();
    let fullmove = parse_counter(fullmove_field, 1)?.max(1);
    game_state.move_count = (fullmove - 1)
        .checked_mul(2)
        .and_then(|plies| plies.checked_add(u32::from(turn == Color::Black)))
        .ok_or_else(|| FenError::InvalidCounter(fullmove_field.unwrap_or_default().to_owned()))?;

    Ok(game_state)
}

fn parse_board(board_part: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for ch in rank.chars() {
            if let Some(skip) = ch.to_digit(10) {
                col += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
            if col >= 8 {
                return Err(FenError::RankWidth { rank: row });
            }
            board.set(Square::new(row as i8, col as i8), Some(piece));
            col += 1;
        }
        if col != 8 {
            return Err(FenError::RankWidth { rank: row });
        }
    }
    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(FenError::InvalidSideToMove(other.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    let moved = SideCastling {
        king_moved: true,
        left_rook_moved: true,
        right_rook_moved: true,
    };
    let mut rights = CastlingRights {
        white: moved,
        black: moved,
    };
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        let (side, kingside) = match ch {
            'K' => (&mut rights.white, true),
            'Q' => (&mut rights.white, false),
            'k' => (&mut rights.black, true),
            'q' => (&mut rights.black, false),
            _ => return Err(FenError::InvalidCastling(castling_part.to_owned())),
        };
        side.king_moved = false;
        if kingside {
            side.right_rook_moved = false;
        } else {
            side.left_rook_moved = false;
        }
    }
    Ok(rights)
}

fn parse_en_passant(field: &str, board: &Board, turn: Color) -> Result<Option<LastMove>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || FenError::InvalidEnPassant(field.to_owned());
    let target = algebraic_to_square(field).map_err(|_| invalid())?;

    let mover = turn.opposite();
    let to = target.offset(mover.forward(), 0).ok_or_else(invalid)?;
    let from = target.offset(-mover.forward(), 0).ok_or_else(invalid)?;
    let pawn = Piece::new(PieceKind::Pawn, mover);
    if board.get(to) != Some(pawn) || from.row != mover.pawn_start_row() {
        return Err(invalid());
    }
    Ok(Some(LastMove { from, to, piece: pawn }))
}

fn parse_counter(field: Option<&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text
            .parse::<u32>()
            .map_err(|_| FenError::InvalidCounter(text.to_owned())),
    }
}
