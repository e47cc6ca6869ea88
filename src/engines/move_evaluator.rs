//! Phase-aware move ranking.
//!
//! In the opening, moves are ranked by a light heuristic with a safety check and a
//! little randomness. Later, root moves are ordered by the immediate heuristic and
//! the leaders are searched with fixed-depth negamax.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::GameResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ScoredMove;
use crate::search::board_scoring::PositionalScorer;
use crate::search::evaluation_weights::{
    load_or_default, EvaluationWeights, GameOutcomeForPlayer, NullWeightsStore, WeightsStore,
};
use crate::search::negamax::NegamaxSearch;
use crate::search::opening_selection::{opening_candidates, select_opening_moves};
use crate::search::search_config::{GamePhase, SearchConfig};

pub const DEFAULT_SEARCH_DEPTH: u8 = 2;

pub struct MoveEvaluator<R: Rng = StdRng> {
    weights: EvaluationWeights,
    config: SearchConfig,
    store: Box<dyn WeightsStore>,
    rng: R,
}

impl MoveEvaluator<StdRng> {
    /// Default weights, nothing persisted.
    pub fn new() -> Self {
        Self::with_store(Box::new(NullWeightsStore))
    }

    /// Weights loaded from `store` (defaults if that fails); updates are saved back to it.
    pub fn with_store(store: Box<dyn WeightsStore>) -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()), store, SearchConfig::default())
    }

    /// Reproducible opening choices.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(
            StdRng::seed_from_u64(seed),
            Box::new(NullWeightsStore),
            SearchConfig::default(),
        )
    }
}

impl Default for MoveEvaluator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MoveEvaluator<R> {
    pub fn with_rng(rng: R, store: Box<dyn WeightsStore>, config: SearchConfig) -> Self {
        let weights = load_or_default(store.as_ref());
        Self {
            weights,
            config,
            store,
            rng,
        }
    }

    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    pub fn phase(&self, move_count: u32) -> GamePhase {
        self.config.phase_for(move_count)
    }

    /// Up to `top_n` legal moves for `player`, best first, with their scores.
    ///
    /// `move_count_hint` selects the phase. Returns nothing when `player` is not to
    /// move or the game is over. `game_state` is explored in place and restored.
    pub fn get_best_moves(
        &mut self,
        game_state: &mut GameState,
        player: Color,
        top_n: usize,
        max_depth: u8,
        move_count_hint: u32,
    ) -> Vec<ScoredMove> {
        if top_n == 0 {
            return Vec::new();
        }
        if game_state.outcome().is_some() || player != game_state.turn() {
            debug!(%player, turn = %game_state.turn(), "no suggestions for a side not to move");
            return Vec::new();
        }

        let phase = self.config.phase_for(move_count_hint);
        let ranked = match phase {
            GamePhase::Opening => {
                let candidates = opening_candidates(game_state, player, &self.weights);
                select_opening_moves(candidates, top_n, &self.config, &mut self.rng)
            }
            GamePhase::Midgame | GamePhase::Endgame => {
                let depth = self.config.effective_depth(phase, max_depth);
                let scorer = PositionalScorer::new(&self.weights, &self.config);
                let mut search =
                    NegamaxSearch::new(&scorer, &self.weights, self.config.branching_limit);
                let root_limit = self.config.branching_limit.max(top_n);
                let mut ranked = search.search_root(game_state, player, depth, root_limit);
                ranked.truncate(top_n);
                debug!(nodes = search.nodes(), depth, "search finished");
                ranked
            }
        };

        debug!(
            ?phase,
            %player,
            count = ranked.len(),
            best = ?ranked.first().map(|s| s.mv.to_string()),
            "ranked moves"
        );
        ranked
    }

    /// Nudges the weights after a finished game and persists them. A failed save
    /// keeps the new weights in memory.
    pub fn update_weights(&mut self, outcome: GameOutcomeForPlayer, moves_played: u32) {
        self.weights = self
            .weights
            .nudged(outcome, moves_played, self.config.learning_rate);
        info!(?outcome, moves_played, weights = ?self.weights, "evaluation weights updated");

        if let Err(err) = self.store.save(&self.weights) {
            warn!(error = %err, "failed to persist evaluation weights");
        }
    }
}

impl<R: Rng + Send> Engine for MoveEvaluator<R> {
    fn name(&self) -> &str {
        "move-evaluator"
    }

    fn choose_move(&mut self, game_state: &mut GameState, params: &GoParams) -> GameResult<EngineOutput> {
        let side = game_state.turn();
        let hint = game_state.move_count();
        let candidates = self.get_best_moves(
            game_state,
            side,
            params.top_n.unwrap_or(1).max(1),
            params.depth.unwrap_or(DEFAULT_SEARCH_DEPTH),
            hint,
        );
        Ok(EngineOutput {
            best_move: candidates.first().copied(),
            candidates,
        })
    }
}
