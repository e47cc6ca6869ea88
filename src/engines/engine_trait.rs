//! Engine abstraction so different move pickers can be driven from one loop.

use crate::errors::GameResult;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ScoredMove;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ScoredMove>,
    /// Ranked alternatives, best first, including `best_move`.
    pub candidates: Vec<ScoredMove>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Picks a move for the side to move. `game_state` is borrowed mutably for
    /// make/undo exploration and is left unchanged.
    fn choose_move(&mut self, game_state: &mut GameState, params: &GoParams) -> GameResult<EngineOutput>;
}
