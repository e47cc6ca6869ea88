use serde::{Deserialize, Serialize};

use crate::search::evaluation_weights::DEFAULT_LEARNING_RATE;

/// Stage of the game as judged from the ply count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Opening,
    Midgame,
    Endgame,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Moves explored per node after ordering.
    pub branching_limit: usize,
    /// Plies before which the game counts as an opening.
    pub opening_until_ply: u32,
    /// Plies before which the game counts as a midgame.
    pub midgame_until_ply: u32,
    pub midgame_depth_cap: u8,
    pub endgame_depth_cap: u8,
    /// Chance per opening pick of taking a random near-top candidate instead of the best.
    pub opening_swap_probability: f64,
    /// Size of the pool an opening swap draws from.
    pub opening_pool_size: usize,
    /// Centipawns below the current best a candidate may score and still join the swap pool.
    pub opening_swap_margin: i32,
    /// Centipawns per legal-move difference at the leaves.
    pub mobility_weight: i32,
    /// Percent of each attacked enemy piece's value credited at the leaves.
    pub threat_percent: i32,
    pub learning_rate: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            branching_limit: 8,
            opening_until_ply: 12,
            midgame_until_ply: 40,
            midgame_depth_cap: 3,
            endgame_depth_cap: 4,
            opening_swap_probability: 0.25,
            opening_pool_size: 3,
            opening_swap_margin: 25,
            mobility_weight: 2,
            threat_percent: 10,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

impl SearchConfig {
    pub fn phase_for(&self, move_count: u32) -> GamePhase {
        if move_count < self.opening_until_ply {
            GamePhase::Opening
        } else if move_count < self.midgame_until_ply {
            GamePhase::Midgame
        } else {
            GamePhase::Endgame
        }
    }

    /// Requested depth limited by the phase cap, never below one ply.
    pub fn effective_depth(&self, phase: GamePhase, requested: u8) -> u8 {
        let cap = match phase {
            GamePhase::Opening => 1,
            GamePhase::Midgame => self.midgame_depth_cap,
            GamePhase::Endgame => self.endgame_depth_cap,
        };
        requested.clamp(1, cap.max(1))
    }
}
