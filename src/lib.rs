//! Crate root module declarations for the duel chess rules engine.
//!
//! Exposes the game state machine (board model, legality, terminal detection),
//! the move evaluator that ranks candidate moves, and FEN/notation helpers so
//! transports, binaries and tests can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod evaluation_weights;
    pub mod move_ordering;
    pub mod negamax;
    pub mod opening_selection;
    pub mod search_config;
}

pub mod tables {
    pub mod piece_square_tables;
}

pub mod engines {
    pub mod chess_ai;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod move_evaluator;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
