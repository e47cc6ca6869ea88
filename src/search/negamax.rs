//! Fixed-depth negamax with alpha-beta pruning over make/undo.
//!
//! Each node orders its legal moves with the immediate heuristic and explores only
//! the first `branching_limit` of them. Every explored move is played in place
//! through a [`MoveGuard`](crate::game_state::undo_state::MoveGuard), so the caller's
//! state is unchanged when a search returns.

use tracing::{debug, trace};

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves_for};
use crate::moves::move_descriptions::{Move, ScoredMove};
use crate::search::board_scoring::{terminal_score, BoardScorer, MATE_SCORE};
use crate::search::evaluation_weights::EvaluationWeights;
use crate::search::move_ordering::order_moves;

const INFINITY: i32 = MATE_SCORE + 1000;

pub struct NegamaxSearch<'a, S: BoardScorer> {
    scorer: &'a S,
    weights: &'a EvaluationWeights,
    branching_limit: usize,
    nodes: u64,
}

impl<'a, S: BoardScorer> NegamaxSearch<'a, S> {
    pub fn new(scorer: &'a S, weights: &'a EvaluationWeights, branching_limit: usize) -> Self {
        Self {
            scorer,
            weights,
            branching_limit: branching_limit.max(1),
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Scores the best `root_limit` root moves of `color` (by the immediate heuristic)
    /// with a full-window search of `depth` plies each, best first.
    ///
    /// Root moves that fail to apply are left out.
    pub fn search_root(
        &mut self,
        game_state: &mut GameState,
        color: Color,
        depth: u8,
        root_limit: usize,
    ) -> Vec<ScoredMove> {
        let depth = depth.max(1);
        let moves = order_moves(game_state, legal_moves_for(game_state, color), self.weights);
        let mut scored = Vec::with_capacity(root_limit.min(moves.len()));

        for mv in moves.into_iter().take(root_limit) {
            let Some(score) = self.score_child(game_state, &mv, depth, -INFINITY, INFINITY, 0) else {
                continue;
            };
            debug!(mv = %mv, score, depth, "root move scored");
            scored.push(ScoredMove { mv, score });
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        trace!(nodes = self.nodes, "root search finished");
        scored
    }

    /// Value of the position for the side to move.
    pub fn negamax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> i32 {
        self.nodes += 1;
        let side = game_state.turn();

        if depth == 0 {
            if !has_any_legal_move(game_state, side) {
                return terminal_score(game_state.is_in_check(side), ply);
            }
            return self.scorer.score(game_state);
        }

        let moves = legal_moves_for(game_state, side);
        if moves.is_empty() {
            return terminal_score(game_state.is_in_check(side), ply);
        }

        let mut best: Option<i32> = None;
        for mv in order_moves(game_state, moves, self.weights)
            .into_iter()
            .take(self.branching_limit)
        {
            let Some(score) = self.score_child(game_state, &mv, depth, -beta, -alpha, ply) else {
                continue;
            };
            best = Some(best.map_or(score, |b| b.max(score)));
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        // Every child failed to apply; fall back to the static score.
        best.unwrap_or_else(|| self.scorer.score(game_state))
    }

    /// Plays `mv`, searches the reply, and negates. `None` when the move cannot be applied.
    fn score_child(
        &mut self,
        game_state: &mut GameState,
        mv: &Move,
        depth: u8,
        alpha: i32,
        beta: i32,
        ply: i32,
    ) -> Option<i32> {
        let mut child = match game_state.make_search_move(mv) {
            Ok(child) => child,
            Err(err) => {
                debug!(mv = %mv, error = %err, "skipping move that failed to apply");
                return None;
            }
        };
        Some(-self.negamax(&mut child, depth - 1, -beta, -alpha, ply + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::{MaterialScorer, PositionalScorer};
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn finds_mate_in_one() {
        // Back-rank mate: Ra8#.
        let mut game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen should parse");
        let weights = EvaluationWeights::default();
        let scorer = MaterialScorer;
        let mut search = NegamaxSearch::new(&scorer, &weights, 8);

        let ranked = search.search_root(&mut game, Color::White, 2, 32);
        let best = ranked.first().expect("white has moves");
        assert_eq!(best.mv.to, algebraic_to_square("a8").expect("a8 should parse"));
        assert!(best.score >= MATE_SCORE - 10);
    }

    #[test]
    fn avoids_hanging_the_queen() {
        // The queen on d4 is attacked by the e5 pawn.
        let mut game =
            GameState::from_fen("4k3/8/8/4p3/3Q4/8/8/4K3 w - - 0 1").expect("fen should parse");
        let weights = EvaluationWeights::default();
        let scorer = PositionalScorer::default();
        let mut search = NegamaxSearch::new(&scorer, &weights, 8);

        let ranked = search.search_root(&mut game, Color::White, 2, 8);
        let best = ranked.first().expect("white has moves");
        // Taking the pawn is safe here; anything else must at least keep the queen.
        assert!(best.score > 500);
    }

    #[test]
    fn search_restores_the_position() {
        let mut game = GameState::with_room("ROOM", "alice");
        let before = game.clone();
        let weights = EvaluationWeights::default();
        let scorer = PositionalScorer::default();
        let mut search = NegamaxSearch::new(&scorer, &weights, 4);

        let ranked = search.search_root(&mut game, Color::White, 3, 4);
        assert_eq!(ranked.len(), 4);
        assert!(search.nodes() > 0);
        assert_eq!(game, before);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn stalemated_side_scores_zero() {
        let mut game = GameState::from_fen("k7/2Q5/8/8/8/8/8/7K b - - 0 1").expect("fen should parse");
        let weights = EvaluationWeights::default();
        let scorer = MaterialScorer;
        let mut search = NegamaxSearch::new(&scorer, &weights, 8);
        assert_eq!(search.negamax(&mut game, 3, -INFINITY, INFINITY, 0), 0);
    }
}
