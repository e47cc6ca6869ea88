use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_to_board, classify_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::PAWN_CENTIPAWNS;
use crate::search::evaluation_weights::EvaluationWeights;

pub const CENTER_SQUARES: [Square; 4] = [
    Square::new(3, 3),
    Square::new(3, 4),
    Square::new(4, 3),
    Square::new(4, 4),
];

/// Cheap one-move estimate in centipawns: captured material, promotion, giving
/// check and landing in the center, each scaled by its weight.
pub fn immediate_move_score(game_state: &GameState, mv: &Move, weights: &EvaluationWeights) -> i32 {
    let board = game_state.board();
    let effects = classify_move(board, mv);
    let mut pawns = 0.0;

    if let Some((_, captured)) = effects.captured {
        pawns += f64::from(captured.kind.value()) * weights.material;
    }
    if effects.promotion.is_some() {
        pawns += weights.promotion_bonus;
    }
    if CENTER_SQUARES.contains(&mv.to) {
        pawns += weights.center_control;
    }

    let mut after = *board;
    apply_to_board(&mut after, mv, &effects);
    if is_king_in_check(&after, mv.piece.color.opposite()) {
        pawns += weights.check_bonus;
    }

    (pawns * f64::from(PAWN_CENTIPAWNS)).round() as i32
}

/// Sorts `moves` best-first by the immediate heuristic. Ties keep generation order.
pub fn order_moves(game_state: &GameState, moves: Vec<Move>, weights: &EvaluationWeights) -> Vec<Move> {
    let mut keyed: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|mv| (immediate_move_score(game_state, &mv, weights), mv))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, mv)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn find(game: &GameState, from: &str, to: &str) -> Move {
        game.legal_moves(game.turn())
            .into_iter()
            .find(|mv| mv.from == sq(from) && mv.to == sq(to))
            .expect("move should be legal")
    }

    #[test]
    fn capturing_a_queen_outranks_quiet_moves() {
        let game = GameState::from_fen("4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1").expect("fen should parse");
        let weights = EvaluationWeights::default();
        let ordered = order_moves(&game, game.legal_moves(game.turn()), &weights);
        assert_eq!(ordered[0], find(&game, "c3", "d5"));
        assert_eq!(immediate_move_score(&game, &ordered[0], &weights), 950);
    }

    #[test]
    fn promotion_and_check_bonuses_apply() {
        let game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("fen should parse");
        let weights = EvaluationWeights::default();
        // a8=Q gives check along the back rank.
        let promote = find(&game, "a7", "a8");
        assert_eq!(immediate_move_score(&game, &promote, &weights), 950);
    }

    #[test]
    fn central_pushes_get_the_center_bonus() {
        let game = GameState::with_room("ROOM", "alice");
        let weights = EvaluationWeights::default();
        assert_eq!(immediate_move_score(&game, &find(&game, "e2", "e4"), &weights), 50);
        assert_eq!(immediate_move_score(&game, &find(&game, "a2", "a3"), &weights), 0);
    }
}
