use crate::game_state::chess_types::{Board, Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_generator::legal_moves_for;
use crate::search::evaluation_weights::EvaluationWeights;
use crate::search::search_config::SearchConfig;
use crate::tables::piece_square_tables::piece_square_bonus;

pub const MATE_SCORE: i32 = 30000;
pub const PAWN_CENTIPAWNS: i32 = 100;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Plain material count, 100 centipawns per pawn unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    fn material_balance_white_minus_black(board: &Board) -> i32 {
        board
            .pieces()
            .map(|(_, piece)| {
                let value = piece.kind.value() * PAWN_CENTIPAWNS;
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let white_minus_black = Self::material_balance_white_minus_black(game_state.board());
        match game_state.turn() {
            Color::White => white_minus_black,
            Color::Black => -white_minus_black,
        }
    }
}

/// Leaf evaluation used by the search: weighted material, piece-square tables,
/// a light legal-mobility term and a light threat term.
#[derive(Debug, Clone, Copy)]
pub struct PositionalScorer {
    material_weight: f64,
    mobility_weight: i32,
    threat_percent: i32,
}

impl PositionalScorer {
    pub fn new(weights: &EvaluationWeights, config: &SearchConfig) -> Self {
        Self {
            material_weight: weights.material,
            mobility_weight: config.mobility_weight,
            threat_percent: config.threat_percent,
        }
    }

    fn side_score(&self, game_state: &GameState, color: Color) -> i32 {
        let board = game_state.board();
        let mut material = 0i32;
        let mut placement = 0i32;

        for (square, piece) in board.pieces_of(color) {
            material += piece.kind.value() * PAWN_CENTIPAWNS;
            placement += piece_square_bonus(piece, square);
        }
        let mobility = legal_moves_for(game_state, color).len() as i32;

        let threats: i32 = board
            .pieces_of(color.opposite())
            .filter(|(_, piece)| piece.kind != PieceKind::King)
            .filter(|&(square, _)| is_square_attacked(board, square, color))
            .map(|(_, piece)| piece.kind.value() * PAWN_CENTIPAWNS)
            .sum();

        (f64::from(material) * self.material_weight).round() as i32
            + placement
            + self.mobility_weight * mobility
            + threats * self.threat_percent / 100
    }
}

impl Default for PositionalScorer {
    fn default() -> Self {
        Self::new(&EvaluationWeights::default(), &SearchConfig::default())
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let side = game_state.turn();
        self.side_score(game_state, side) - self.side_score(game_state, side.opposite())
    }
}

/// Score of a side with no legal move: mated sides lose, later mates lose less.
#[inline]
pub fn terminal_score(in_check: bool, ply: i32) -> i32 {
    if in_check {
        -MATE_SCORE + ply
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::{terminal_score, BoardScorer, MaterialScorer, PositionalScorer, MATE_SCORE};
    use crate::game_state::game_state::GameState;
    use crate::search::evaluation_weights::EvaluationWeights;
    use crate::search::search_config::SearchConfig;

    #[test]
    fn material_scorer_reflects_side_to_move_perspective() {
        let white_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/4KQ2 w - - 0 1").expect("FEN should parse");
        let black_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/4KQ2 b - - 0 1").expect("FEN should parse");

        let scorer = MaterialScorer;
        assert_eq!(scorer.score(&white_to_move), 900);
        assert_eq!(scorer.score(&black_to_move), -900);
    }

    #[test]
    fn positional_scorer_is_symmetric_at_the_start() {
        let game = GameState::with_room("ROOM", "alice");
        assert_eq!(PositionalScorer::default().score(&game), 0);
    }

    #[test]
    fn positional_scorer_rewards_central_knight() {
        let center =
            GameState::from_fen("4k3/8/8/3N4/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let rim = GameState::from_fen("4k3/8/8/8/8/8/N7/4K3 w - - 0 1").expect("FEN should parse");
        let scorer = PositionalScorer::default();
        assert!(
            scorer.score(&center) > scorer.score(&rim),
            "central knight should score better"
        );
    }

    #[test]
    fn attacked_enemy_pieces_add_a_threat_bonus() {
        // The c3 knight hits the d5 rook; the rook attacks nothing.
        let game = GameState::from_fen("4k3/8/8/3r4/8/2N5/8/4K3 w - - 0 1").expect("FEN should parse");
        let weights = EvaluationWeights::default();
        let with_threats = PositionalScorer::new(&weights, &SearchConfig::default());
        let without_threats = PositionalScorer::new(
            &weights,
            &SearchConfig {
                threat_percent: 0,
                ..SearchConfig::default()
            },
        );
        assert_eq!(with_threats.score(&game) - without_threats.score(&game), 50);
    }

    #[test]
    fn mobility_counts_only_legal_moves() {
        // The e2 bishop is pinned, so White has four king moves and nothing else.
        // Black has four king moves and twelve rook moves.
        let game = GameState::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let weights = EvaluationWeights::default();
        let mobile = PositionalScorer::new(
            &weights,
            &SearchConfig {
                mobility_weight: 1,
                ..SearchConfig::default()
            },
        );
        let static_only = PositionalScorer::new(
            &weights,
            &SearchConfig {
                mobility_weight: 0,
                ..SearchConfig::default()
            },
        );
        assert_eq!(mobile.score(&game) - static_only.score(&game), 4 - 16);
    }

    #[test]
    fn mates_closer_to_the_root_score_worse_for_the_mated_side() {
        assert_eq!(terminal_score(true, 0), -MATE_SCORE);
        assert!(terminal_score(true, 1) > terminal_score(true, 0));
        assert_eq!(terminal_score(false, 3), 0);
    }
}
