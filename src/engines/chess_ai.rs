//! AI player driving a game through the public rules surface.

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::engines::move_evaluator::MoveEvaluator;
use crate::errors::{GameError, GameResult};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::{MoveResult, ScoredMove};
use crate::search::evaluation_weights::GameOutcomeForPlayer;
use crate::search::search_config::GamePhase;

/// Reply to a suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub suggestions: Vec<ScoredMove>,
    pub phase: GamePhase,
    pub move_count: u32,
}

pub struct ChessAi<R: Rng = StdRng> {
    evaluator: MoveEvaluator<R>,
}

impl<R: Rng> ChessAi<R> {
    pub fn new(evaluator: MoveEvaluator<R>) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &MoveEvaluator<R> {
        &self.evaluator
    }

    /// Plays the best move for `color` through [`GameState::make_move`], as the
    /// player seated on that color. `Ok(None)` when `color` has nothing to play.
    pub fn make_ai_move(
        &mut self,
        game_state: &mut GameState,
        color: Color,
        depth: u8,
    ) -> GameResult<Option<MoveResult>> {
        let hint = game_state.move_count();
        let Some(best) = self
            .evaluator
            .get_best_moves(game_state, color, 1, depth, hint)
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        let player = game_state
            .player_id(color)
            .ok_or_else(|| GameError::UnknownPlayer(color.name().to_owned()))?
            .to_owned();
        game_state.make_move(best.mv.from, best.mv.to, &player).map(Some)
    }

    pub fn suggest(
        &mut self,
        game_state: &mut GameState,
        color: Color,
        top_n: usize,
        depth: u8,
    ) -> Suggestions {
        let move_count = game_state.move_count();
        Suggestions {
            suggestions: self
                .evaluator
                .get_best_moves(game_state, color, top_n, depth, move_count),
            phase: self.evaluator.phase(move_count),
            move_count,
        }
    }

    /// Feeds a finished game back into the evaluation weights, from `color`'s side.
    /// Unfinished games are ignored.
    pub fn record_result(&mut self, game_state: &GameState, color: Color) {
        if game_state.outcome().is_none() {
            return;
        }
        let outcome = match game_state.winner() {
            Some(winner) if winner == color => GameOutcomeForPlayer::Win,
            Some(_) => GameOutcomeForPlayer::Loss,
            None => GameOutcomeForPlayer::Draw,
        };
        info!(%color, ?outcome, plies = game_state.move_count(), "recording game result");
        self.evaluator.update_weights(outcome, game_state.move_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::GameOver;

    #[test]
    fn ai_move_goes_through_the_rules_engine() {
        let mut game = GameState::with_room("ROOM", "alice");
        let mut ai = ChessAi::new(MoveEvaluator::seeded(8));
        let result = ai
            .make_ai_move(&mut game, Color::White, 2)
            .expect("ai move should be legal")
            .expect("white has moves");
        assert_eq!(result.piece.color, Color::White);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn ai_plays_from_the_seat_it_is_given() {
        let mut game = GameState::with_room("ROOM", "alice");
        game.join("bot");
        let mut ai = ChessAi::new(MoveEvaluator::seeded(8));
        game.make_move(
            crate::utils::algebraic::algebraic_to_square("e2").expect("e2 should parse"),
            crate::utils::algebraic::algebraic_to_square("e4").expect("e4 should parse"),
            "alice",
        )
        .expect("e2e4 should be legal");

        let result = ai
            .make_ai_move(&mut game, Color::Black, 2)
            .expect("ai move should be legal")
            .expect("black has moves");
        assert_eq!(result.piece.color, Color::Black);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn ai_without_a_seat_is_rejected() {
        let mut game = GameState::with_room("ROOM", "alice");
        game.make_move(
            crate::utils::algebraic::algebraic_to_square("d2").expect("d2 should parse"),
            crate::utils::algebraic::algebraic_to_square("d4").expect("d4 should parse"),
            "alice",
        )
        .expect("d2d4 should be legal");
        let before = game.clone();
        let mut ai = ChessAi::new(MoveEvaluator::seeded(8));
        assert_eq!(
            ai.make_ai_move(&mut game, Color::Black, 2),
            Err(GameError::UnknownPlayer("black".to_owned()))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn ai_delivers_mate_in_one() {
        let mut game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 30").expect("fen should parse");
        let mut ai = ChessAi::new(MoveEvaluator::seeded(8));
        let result = ai
            .make_ai_move(&mut game, Color::White, 2)
            .expect("ai move should be legal")
            .expect("white has moves");
        assert_eq!(result.game_over, Some(GameOver::Checkmate));
        assert_eq!(result.winner, Some(Color::White));
    }

    #[test]
    fn suggestions_report_the_phase() {
        let mut game = GameState::with_room("ROOM", "alice");
        let mut ai = ChessAi::new(MoveEvaluator::seeded(2));
        let reply = ai.suggest(&mut game, Color::White, 3, 2);
        assert_eq!(reply.phase, GamePhase::Opening);
        assert_eq!(reply.suggestions.len(), 3);

        let json = serde_json::to_value(&reply).expect("suggestions should serialize");
        assert_eq!(json["phase"], "opening");
        assert_eq!(json["moveCount"], 0);
    }

    #[test]
    fn finished_games_nudge_the_weights() {
        let mut game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 30").expect("fen should parse");
        let mut ai = ChessAi::new(MoveEvaluator::seeded(8));
        let before = *ai.evaluator().weights();

        ai.record_result(&game, Color::White);
        assert_eq!(*ai.evaluator().weights(), before);

        ai.make_ai_move(&mut game, Color::White, 2)
            .expect("ai move should be legal");
        ai.record_result(&game, Color::White);
        assert!(ai.evaluator().weights().material > before.material);
    }
}
