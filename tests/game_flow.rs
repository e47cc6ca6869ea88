use duel_chess::engines::move_evaluator::MoveEvaluator;
use duel_chess::errors::GameError;
use duel_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use duel_chess::game_state::chess_types::{Color, Piece, PieceKind, Square};
use duel_chess::game_state::game_state::GameState;
use duel_chess::moves::move_descriptions::{GameOver, MoveResult};
use duel_chess::utils::algebraic::algebraic_to_square;

fn sq(name: &str) -> Square {
    algebraic_to_square(name).expect("test square should parse")
}

fn play(game: &mut GameState, from: &str, to: &str, player: &str) -> MoveResult {
    game.make_move(sq(from), sq(to), player)
        .unwrap_or_else(|err| panic!("{from}{to} by {player} should be legal: {err}"))
}

fn two_player_game() -> GameState {
    let mut game = GameState::with_room("ROOM42", "alice");
    game.join("bob");
    game
}

#[test]
fn fresh_game_has_twenty_moves_per_side() {
    let game = two_player_game();
    assert_eq!(game.legal_moves(Color::White).len(), 20);
    assert_eq!(game.legal_moves(Color::Black).len(), 20);
    assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
    assert_eq!(game.turn(), Color::White);
    assert!(game.outcome().is_none());
}

#[test]
fn seats_map_to_colors() {
    let mut game = two_player_game();
    assert!(!game.join("alice"));
    assert_eq!(game.color_of("alice"), Some(Color::White));
    assert_eq!(game.color_of("bob"), Some(Color::Black));
    assert_eq!(game.color_of("black"), None);
    assert_eq!(game.color_of("mallory"), None);
    assert_eq!(game.player_id(Color::White), Some("alice"));

    let knight_moves = game.get_moves(sq("g1"), "alice");
    assert_eq!(knight_moves.len(), 2);
    assert!(game.get_moves(sq("g1"), "bob").is_empty());
    assert!(game.get_moves(sq("e4"), "alice").is_empty());
}

#[test]
fn rejected_moves_leave_the_game_untouched() {
    let mut game = two_player_game();
    let before = game.clone();

    assert!(matches!(
        game.make_move(sq("e7"), sq("e5"), "bob"),
        Err(GameError::NotYourTurn { expected: Color::White })
    ));
    assert!(matches!(
        game.make_move(sq("e2"), sq("e4"), "mallory"),
        Err(GameError::UnknownPlayer(_))
    ));
    assert!(matches!(
        game.make_move(sq("e2"), sq("e5"), "alice"),
        Err(GameError::IllegalMove { .. })
    ));
    assert!(matches!(
        game.make_move(sq("e7"), sq("e5"), "alice"),
        Err(GameError::IllegalMove { .. })
    ));
    assert!(matches!(
        game.make_move(sq("e4"), sq("e5"), "alice"),
        Err(GameError::NoPieceAtSource(_))
    ));
    assert!(matches!(
        game.make_move(Square::new(8, 0), sq("e5"), "alice"),
        Err(GameError::InvalidCoordinates(_))
    ));
    assert_eq!(game, before);
}

#[test]
fn color_names_do_not_bypass_seat_ownership() {
    let mut game = two_player_game();
    let before = game.clone();
    assert!(matches!(
        game.make_move(sq("e2"), sq("e4"), "white"),
        Err(GameError::UnknownPlayer(_))
    ));
    assert!(game.get_moves(sq("e2"), "white").is_empty());
    assert_eq!(game, before);

    play(&mut game, "e2", "e4", "alice");
    assert!(matches!(
        game.make_move(sq("e7"), sq("e5"), "black"),
        Err(GameError::UnknownPlayer(_))
    ));
    play(&mut game, "e7", "e5", "bob");
}

#[test]
fn pinned_piece_cannot_expose_the_king() {
    let mut game =
        GameState::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").expect("fen should parse");
    let before = game.clone();
    assert!(game.make_move(sq("e2"), sq("d3"), "white").is_err());
    assert_eq!(game, before);
    assert!(game
        .legal_moves(Color::White)
        .iter()
        .all(|mv| mv.from != sq("e2") || mv.to.col == sq("e2").col));
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = two_player_game();
    play(&mut game, "e2", "e4", "alice");
    play(&mut game, "a7", "a6", "bob");
    play(&mut game, "e4", "e5", "alice");
    play(&mut game, "f7", "f5", "bob");
    assert!(game.get_fen().contains(" f6 "));

    let result = play(&mut game, "e5", "f6", "alice");
    assert!(result.en_passant);
    assert_eq!(result.capture, Some(Piece::new(PieceKind::Pawn, Color::Black)));
    assert_eq!(game.board().get(sq("f5")), None);
    assert_eq!(
        game.board().get(sq("f6")),
        Some(Piece::new(PieceKind::Pawn, Color::White))
    );
}

#[test]
fn en_passant_expires_after_one_turn() {
    let mut game = two_player_game();
    play(&mut game, "e2", "e4", "alice");
    play(&mut game, "a7", "a6", "bob");
    play(&mut game, "e4", "e5", "alice");
    play(&mut game, "f7", "f5", "bob");
    play(&mut game, "a2", "a3", "alice");
    play(&mut game, "a6", "a5", "bob");
    assert!(matches!(
        game.make_move(sq("e5"), sq("f6"), "alice"),
        Err(GameError::IllegalMove { .. })
    ));
}

#[test]
fn castling_moves_the_rook_too() {
    let mut game = GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1")
        .expect("fen should parse");
    let result = play(&mut game, "e1", "g1", "white");
    assert!(result.castling);
    assert_eq!(game.board().get(sq("f1")), Some(Piece::new(PieceKind::Rook, Color::White)));
    assert_eq!(game.board().get(sq("h1")), None);

    let result = play(&mut game, "e8", "c8", "black");
    assert!(result.castling);
    assert_eq!(game.board().get(sq("d8")), Some(Piece::new(PieceKind::Rook, Color::Black)));
    assert_eq!(game.board().get(sq("a8")), None);
    assert!(game.get_fen().contains(" w - - "));
}

#[test]
fn castling_rights_stay_lost_after_the_king_returns() {
    let mut game =
        GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen should parse");
    play(&mut game, "e1", "f1", "white");
    play(&mut game, "a8", "b8", "black");
    play(&mut game, "f1", "e1", "white");
    play(&mut game, "b8", "a8", "black");

    let king_targets: Vec<Square> = game
        .get_moves(sq("e1"), "white")
        .into_iter()
        .map(|mv| mv.to)
        .collect();
    assert!(!king_targets.contains(&sq("g1")));
    assert!(!king_targets.contains(&sq("c1")));
    assert!(game.get_fen().contains(" w k - "));
}

#[test]
fn cannot_castle_through_an_attacked_square() {
    let mut game =
        GameState::from_fen("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1").expect("fen should parse");
    assert!(matches!(
        game.make_move(sq("e1"), sq("g1"), "white"),
        Err(GameError::IllegalMove { .. })
    ));
    assert!(play(&mut game, "e1", "c1", "white").castling);
}

#[test]
fn pawn_reaching_the_last_rank_becomes_a_queen() {
    let mut game = GameState::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").expect("fen should parse");
    let result = play(&mut game, "a7", "a8", "white");
    assert!(result.promotion);
    assert_eq!(result.promotion_piece, Some(Piece::new(PieceKind::Queen, Color::White)));
    assert_eq!(game.board().get(sq("a8")), Some(Piece::new(PieceKind::Queen, Color::White)));
}

#[test]
fn fools_mate_ends_the_game_for_black() {
    let mut game = two_player_game();
    play(&mut game, "f2", "f3", "alice");
    play(&mut game, "e7", "e5", "bob");
    play(&mut game, "g2", "g4", "alice");
    let result = play(&mut game, "d8", "h4", "bob");

    assert_eq!(result.check, Some(Color::White));
    assert_eq!(result.game_over, Some(GameOver::Checkmate));
    assert_eq!(result.winner, Some(Color::Black));
    assert_eq!(game.winner(), Some(Color::Black));
    assert!(game.legal_moves(Color::White).is_empty());
    assert!(matches!(
        game.make_move(sq("a2"), sq("a3"), "alice"),
        Err(GameError::GameOver(GameOver::Checkmate))
    ));

    let view = serde_json::to_value(game.public_view()).expect("view should serialize");
    assert_eq!(view["roomId"], "ROOM42");
    assert_eq!(view["gameOver"], "checkmate");
    assert_eq!(view["turn"], "white");
}

#[test]
fn stalemate_is_a_draw() {
    let mut game = GameState::from_fen("k7/8/2Q5/8/8/8/8/K7 w - - 0 1").expect("fen should parse");
    let result = play(&mut game, "c6", "b6", "white");
    assert_eq!(result.check, None);
    assert_eq!(result.game_over, Some(GameOver::Stalemate));
    assert_eq!(result.winner, None);
}

#[test]
fn bare_bishop_cannot_win() {
    let mut game =
        GameState::from_fen("7k/3r4/2B5/8/8/8/8/K7 w - - 0 1").expect("fen should parse");
    let result = play(&mut game, "c6", "d7", "white");
    assert_eq!(result.capture, Some(Piece::new(PieceKind::Rook, Color::Black)));
    assert_eq!(result.game_over, Some(GameOver::InsufficientMaterial));
    assert_eq!(result.winner, None);
}

#[test]
fn move_result_serializes_for_transports() {
    let mut game = two_player_game();
    let result = play(&mut game, "e2", "e4", "alice");
    let json = serde_json::to_value(&result).expect("result should serialize");
    assert_eq!(json["enPassant"], false);
    assert_eq!(json["turn"], "black");
    assert_eq!(json["gameOver"], serde_json::Value::Null);
    assert_eq!(json["board"][4], "....P...");
}

#[test]
fn suggestions_leave_the_game_untouched() {
    let mut game = two_player_game();
    play(&mut game, "e2", "e4", "alice");
    play(&mut game, "e7", "e5", "bob");
    let before = game.clone();

    let mut evaluator = MoveEvaluator::seeded(11);
    for hint in [2, 20, 60] {
        let ranked = evaluator.get_best_moves(&mut game, Color::White, 4, 2, hint);
        assert!(!ranked.is_empty());
        assert_eq!(game, before);
    }
}

#[test]
fn suggestions_never_leave_the_king_in_check() {
    let mut game =
        GameState::from_fen("4k3/8/8/8/8/8/3q4/4K3 w - - 0 40").expect("fen should parse");
    assert!(game.is_in_check(Color::White));

    let mut evaluator = MoveEvaluator::seeded(4);
    let ranked = evaluator.get_best_moves(&mut game, Color::White, 5, 2, 60);
    assert!(!ranked.is_empty());
    assert_eq!(ranked[0].mv.to, sq("d2"));
    for scored in ranked {
        let mut probe = game.clone();
        probe
            .make_move(scored.mv.from, scored.mv.to, "white")
            .expect("suggested move should be legal");
        assert!(!probe.is_in_check(Color::White));
    }
}
