//! Random-move engine, used for diagnostics, self-play and property tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::GameResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::ScoredMove;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sequence of picks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, game_state: &mut GameState, _params: &GoParams) -> GameResult<EngineOutput> {
        let legal_moves = self
            .move_generator
            .generate_legal_moves(game_state, game_state.turn());

        let best_move = legal_moves
            .as_slice()
            .choose(&mut self.rng)
            .map(|&mv| ScoredMove { mv, score: 0 });

        Ok(EngineOutput {
            best_move,
            candidates: best_move.into_iter().collect(),
        })
    }
}
