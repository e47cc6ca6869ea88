//! The game state machine.
//!
//! `GameState` owns the board and side state of one session. It is mutated only by
//! [`GameState::make_move`] for committed moves and by [`GameState::make_search_move`]
//! for hypothetical ones, which revert when their guard is dropped.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{FenError, GameError, GameResult};
use crate::game_state::chess_rules::is_insufficient_material;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::MoveGuard;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenerationError;
use crate::move_generation::legal_move_generator::{
    has_any_legal_move, legal_moves_for, legal_moves_from,
};
use crate::moves::move_descriptions::{GameOver, Move, MoveResult};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ROOM_CODE_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) turn: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) last_move: Option<LastMove>,
    /// Plies played since the starting position.
    pub(crate) move_count: u32,
    /// Plies since the last pawn move or capture.
    pub(crate) halfmove_clock: u32,
    pub(crate) players: Vec<String>,
    pub(crate) room_id: String,
    pub(crate) outcome: Option<GameOver>,
}

/// Read-only projection handed to transports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicGameView {
    pub room_id: String,
    pub players: Vec<String>,
    pub board: Board,
    pub turn: Color,
    pub fen: String,
    pub game_over: Option<GameOver>,
}

impl GameState {
    /// Fresh game with a generated room code; `creator` takes the White seat.
    pub fn new(creator: impl Into<String>) -> Self {
        Self::with_room(generate_room_code(&mut rand::rng()), creator)
    }

    /// Fresh game under an externally owned session key.
    pub fn with_room(room_id: impl Into<String>, creator: impl Into<String>) -> Self {
        let mut game_state = Self::from_parts(Board::starting_position(), Color::White);
        game_state.room_id = room_id.into();
        game_state.players.push(creator.into());
        game_state
    }

    /// Position from FEN, with no room and no seated players.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    pub(crate) fn from_parts(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            castling: CastlingRights::default(),
            last_move: None,
            move_count: 0,
            halfmove_clock: 0,
            players: Vec::new(),
            room_id: String::new(),
            outcome: None,
        }
    }

    /// Seats `player` if not already present. Returns whether a seat was taken.
    pub fn join(&mut self, player: impl Into<String>) -> bool {
        let player = player.into();
        if self.players.contains(&player) {
            return false;
        }
        debug!(room = %self.room_id, player = %player, seat = self.players.len(), "player joined");
        self.players.push(player);
        true
    }

    /// Resolves a participant to a color by seat order (first seat plays White,
    /// second Black). The literal `"white"`/`"black"` only stands in for a player
    /// while nobody is seated.
    pub fn color_of(&self, player_id: &str) -> Option<Color> {
        match self.players.iter().position(|p| p == player_id) {
            Some(0) => Some(Color::White),
            Some(1) => Some(Color::Black),
            Some(_) => None,
            None if self.players.is_empty() => Color::from_name(player_id),
            None => None,
        }
    }

    /// Identifier that [`make_move`](Self::make_move) accepts for `color`, if that seat
    /// is taken (or the color name itself while nobody is seated).
    pub fn player_id(&self, color: Color) -> Option<&str> {
        if self.players.is_empty() {
            return Some(color.name());
        }
        self.players.get(color.index()).map(String::as_str)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castling_rights(&self) -> &CastlingRights {
        &self.castling
    }

    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        1 + self.move_count / 2
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Terminal classification, once a committed move ended the game.
    pub fn outcome(&self) -> Option<GameOver> {
        self.outcome
    }

    /// The mating side, once the game ended in checkmate.
    pub fn winner(&self) -> Option<Color> {
        (self.outcome == Some(GameOver::Checkmate)).then(|| self.turn.opposite())
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }

    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        legal_moves_for(self, color)
    }

    /// Legal moves of the piece on `square`, provided it belongs to `player_id`.
    /// Anything else (bad square, empty square, foreign piece, unknown player) yields none.
    pub fn get_moves(&self, square: Square, player_id: &str) -> Vec<Move> {
        if !square.is_on_board() {
            return Vec::new();
        }
        let (Some(color), Some(piece)) = (self.color_of(player_id), self.board.get(square)) else {
            return Vec::new();
        };
        if piece.color != color {
            return Vec::new();
        }
        legal_moves_from(self, square)
    }

    /// Validates and commits a move for `player_id`, then classifies the position
    /// for the opponent. On error nothing is changed.
    pub fn make_move(&mut self, from: Square, to: Square, player_id: &str) -> GameResult<MoveResult> {
        for square in [from, to] {
            if !square.is_on_board() {
                return Err(GameError::InvalidCoordinates(square));
            }
        }
        if let Some(outcome) = self.outcome {
            return Err(GameError::GameOver(outcome));
        }
        let piece = self.board.get(from).ok_or(GameError::NoPieceAtSource(from))?;
        let color = self
            .color_of(player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_owned()))?;
        if color != self.turn {
            return Err(GameError::NotYourTurn { expected: self.turn });
        }
        if piece.color != color {
            return Err(GameError::IllegalMove { from, to });
        }

        let mv = legal_moves_from(self, from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(GameError::IllegalMove { from, to })?;

        let (undo, effects) = make_move_in_place(self, &mv)?;

        if let Some(missing) = [color, color.opposite()]
            .into_iter()
            .find(|&side| self.board.king_square(side).is_none())
        {
            unmake_move(self, undo);
            return Err(MoveGenerationError::MissingKing(missing).into());
        }
        if is_king_in_check(&self.board, color) {
            unmake_move(self, undo);
            return Err(GameError::LeavesKingInCheck { from, to, color });
        }

        let opponent = color.opposite();
        let check = is_king_in_check(&self.board, opponent).then_some(opponent);
        let (game_over, winner) = self.classify_for(opponent, check.is_some());
        self.outcome = game_over;

        debug!(
            room = %self.room_id,
            %color,
            mv = %mv,
            capture = effects.captured.is_some(),
            check = check.is_some(),
            "move committed"
        );
        if let Some(result) = game_over {
            info!(room = %self.room_id, %result, winner = ?winner, "game over");
        }

        Ok(MoveResult {
            from,
            to,
            piece,
            capture: effects.captured.map(|(_, captured)| captured),
            promotion: effects.promotion.is_some(),
            promotion_piece: effects.promotion,
            en_passant: effects.en_passant,
            castling: effects.is_castling(),
            board: self.board,
            turn: self.turn,
            check,
            game_over,
            winner,
        })
    }

    /// Plays a generated move in place for search; the returned guard reverts it on drop.
    pub fn make_search_move(&mut self, mv: &Move) -> GameResult<MoveGuard<'_>> {
        if mv.piece.color != self.turn {
            return Err(GameError::NotYourTurn { expected: self.turn });
        }
        if self.board.king_square(self.turn).is_none() {
            return Err(MoveGenerationError::MissingKing(self.turn).into());
        }
        let (undo, _) = make_move_in_place(self, mv)?;
        Ok(MoveGuard::new(self, undo))
    }

    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn public_view(&self) -> PublicGameView {
        PublicGameView {
            room_id: self.room_id.clone(),
            players: self.players.clone(),
            board: self.board,
            turn: self.turn,
            fen: self.get_fen(),
            game_over: self.outcome,
        }
    }

    /// Checkmate takes precedence over stalemate, which takes precedence over
    /// insufficient material.
    fn classify_for(&self, side: Color, in_check: bool) -> (Option<GameOver>, Option<Color>) {
        if !has_any_legal_move(self, side) {
            if in_check {
                return (Some(GameOver::Checkmate), Some(side.opposite()));
            }
            return (Some(GameOver::Stalemate), None);
        }
        if is_insufficient_material(&self.board) {
            return (Some(GameOver::InsufficientMaterial), None);
        }
        (None, None)
    }
}

fn generate_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| char::from(ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())]))
        .collect()
}
