//! Conversions between algebraic coordinates (e.g. `e4`) and board squares.

use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    // Row 0 is rank 8.
    let row = (b'8' - rank) as i8;
    let col = (file - b'a') as i8;
    Ok(Square::new(row, col))
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if !square.is_on_board() {
        return Err(format!("Square out of bounds: ({}, {})", square.row, square.col));
    }
    Ok(square.to_string())
}
