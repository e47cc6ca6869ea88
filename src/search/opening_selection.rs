//! Opening move selection.
//!
//! Early in the game the evaluator skips the tree search. Each legal move gets a
//! light development-minded score and a safety verdict (can the opponent take the
//! moved piece right away?). Safe captures rank above other safe moves, which rank
//! above risky ones; the preference is folded into the reported score so the list
//! reads best first. A pick may be swapped for a near-equal candidate of the same
//! kind so play varies between games.

use rand::Rng;
use tracing::trace;

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::classify_move;
use crate::move_generation::legal_move_generator::legal_moves_for;
use crate::moves::move_descriptions::{Move, ScoredMove};
use crate::search::board_scoring::PAWN_CENTIPAWNS;
use crate::search::evaluation_weights::EvaluationWeights;
use crate::search::move_ordering::{immediate_move_score, CENTER_SQUARES};
use crate::search::search_config::SearchConfig;

const DEVELOPMENT_BONUS: i32 = 40;
const CASTLING_BONUS: i32 = 100;
const EXTENDED_CENTER_BONUS: i32 = 20;
const EARLY_QUEEN_PENALTY: i32 = 30;
const KING_WALK_PENALTY: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningCandidate {
    pub mv: Move,
    pub score: i32,
    pub capture: bool,
    /// No immediate opponent reply captures the moved piece.
    pub safe: bool,
}

impl OpeningCandidate {
    /// Preference tier: safe captures 2, other safe moves 1, risky moves 0.
    pub fn tier(&self) -> u8 {
        match (self.safe, self.capture) {
            (true, true) => 2,
            (true, false) => 1,
            (false, _) => 0,
        }
    }
}

/// Scores and classifies every legal move of `color`. The state is restored afterwards.
pub fn opening_candidates(
    game_state: &mut GameState,
    color: Color,
    weights: &EvaluationWeights,
) -> Vec<OpeningCandidate> {
    let moves = legal_moves_for(game_state, color);
    let mut candidates = Vec::with_capacity(moves.len());

    for mv in moves {
        let effects = classify_move(game_state.board(), &mv);
        let mut score = immediate_move_score(game_state, &mv, weights) + development_score(&mv);
        if effects.is_castling() {
            score += CASTLING_BONUS;
        }

        let Some(safe) = is_safe_destination(game_state, &mv) else {
            continue;
        };
        if !safe {
            let own_value = effects.promotion.unwrap_or(mv.piece).kind.value();
            score -= (f64::from(own_value * PAWN_CENTIPAWNS) * weights.material).round() as i32;
        }

        candidates.push(OpeningCandidate {
            mv,
            score,
            capture: effects.captured.is_some(),
            safe,
        });
    }

    candidates
}

/// Ranks candidates by preference and picks `top_n` of them, best first.
///
/// Scores are lifted per tier so every candidate of a higher tier outscores every
/// candidate of a lower one. With probability `config.opening_swap_probability` a pick
/// is replaced by a random member of the pool of remaining candidates in the same tier
/// within `config.opening_swap_margin` of the best, at most `config.opening_pool_size`.
pub fn select_opening_moves<R: Rng>(
    candidates: Vec<OpeningCandidate>,
    top_n: usize,
    config: &SearchConfig,
    rng: &mut R,
) -> Vec<ScoredMove> {
    let mut remaining = lift_scores_by_tier(candidates);
    remaining.sort_by(|a, b| b.score.cmp(&a.score));

    let swap_probability = config.opening_swap_probability.clamp(0.0, 1.0);
    let margin = config.opening_swap_margin.max(0);
    let mut picks = Vec::with_capacity(top_n.min(remaining.len()));
    while picks.len() < top_n && !remaining.is_empty() {
        let leader = remaining[0];
        let pool = remaining
            .iter()
            .take(config.opening_pool_size.max(1))
            .take_while(|c| c.tier() == leader.tier() && leader.score - c.score <= margin)
            .count();
        let index = if pool > 1 && rng.random_bool(swap_probability) {
            rng.random_range(0..pool)
        } else {
            0
        };
        let picked = remaining.remove(index);
        trace!(mv = %picked.mv, score = picked.score, tier = picked.tier(), index, "opening pick");
        picks.push(ScoredMove {
            mv: picked.mv,
            score: picked.score,
        });
    }

    picks.sort_by(|a, b| b.score.cmp(&a.score));
    picks
}

/// Raises each tier's scores just enough to sit above the tier below it.
fn lift_scores_by_tier(mut candidates: Vec<OpeningCandidate>) -> Vec<OpeningCandidate> {
    let mut floor: Option<i32> = None;
    for tier in 0..=2u8 {
        let Some(tier_min) = candidates
            .iter()
            .filter(|c| c.tier() == tier)
            .map(|c| c.score)
            .min()
        else {
            continue;
        };
        let lift = floor.map_or(0, |floor| (floor + 1 - tier_min).max(0));
        let mut tier_max = i32::MIN;
        for candidate in candidates.iter_mut().filter(|c| c.tier() == tier) {
            candidate.score += lift;
            tier_max = tier_max.max(candidate.score);
        }
        floor = Some(tier_max);
    }
    candidates
}

/// `Some(true)` when no opponent reply captures the piece on `mv.to`;
/// `None` if the move could not be played.
fn is_safe_destination(game_state: &mut GameState, mv: &Move) -> Option<bool> {
    let child = game_state.make_search_move(mv).ok()?;
    let opponent = mv.piece.color.opposite();
    let attacked = legal_moves_for(&child, opponent).iter().any(|reply| {
        classify_move(child.board(), reply)
            .captured
            .is_some_and(|(square, _)| square == mv.to)
    });
    Some(!attacked)
}

fn development_score(mv: &Move) -> i32 {
    let color = mv.piece.color;
    let mut score = 0;

    match mv.piece.kind {
        PieceKind::Knight | PieceKind::Bishop if mv.from.row == color.home_row() => {
            score += DEVELOPMENT_BONUS;
        }
        PieceKind::Queen => score -= EARLY_QUEEN_PENALTY,
        PieceKind::King if (mv.to.col - mv.from.col).abs() != 2 => score -= KING_WALK_PENALTY,
        _ => {}
    }

    if is_extended_center(mv.to) && !CENTER_SQUARES.contains(&mv.to) {
        score += EXTENDED_CENTER_BONUS;
    }
    score
}

fn is_extended_center(square: Square) -> bool {
    (2..=5).contains(&square.row) && (2..=5).contains(&square.col)
}
