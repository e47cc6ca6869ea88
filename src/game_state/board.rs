use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Fixed 8x8 grid. Cheap to copy, which the legality filter relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for col in 0..8 {
            let kind = BACK_RANK[col as usize];
            board.set(Square::new(0, col), Some(Piece::new(kind, Color::Black)));
            board.set(Square::new(1, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            board.set(Square::new(6, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.set(Square::new(7, col), Some(Piece::new(kind, Color::White)));
        }
        board
    }

    /// Piece on `square`; off-board squares read as empty.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        if !square.is_on_board() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize]
    }

    /// Writes a cell. Writes to off-board squares are ignored.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if square.is_on_board() {
            self.cells[square.row as usize][square.col as usize] = piece;
        }
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.get(square);
        self.set(square, None);
        piece
    }

    #[inline]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(sq, _)| sq)
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

/// Serialized as eight row strings of FEN letters with `.` for empty cells,
/// row 0 first, e.g. `"rnbqkbnr"`.
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(8))?;
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', Piece::fen_char))
                .collect();
            seq.serialize_element(&line)?;
        }
        seq.end()
    }
}
