use crate::errors::GameResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::classify_move;
use crate::move_generation::legal_move_generator::has_any_legal_move;
use crate::move_generation::move_generator::MoveGenerator;

/// Leaf statistics of a perft walk. Counters other than `nodes` describe the last ply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Counts move paths of length `depth` by make/undo on `game_state`, which is
/// restored before returning.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> GameResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let side = game_state.turn();
    let moves = generator.generate_legal_moves(game_state, side);
    let mut total = PerftCounts::default();

    for mv in moves {
        let effects = classify_move(game_state.board(), &mv);
        let mut child = game_state.make_search_move(&mv)?;

        if depth == 1 {
            let opponent = side.opposite();
            let in_check = child.is_in_check(opponent);
            total.merge(PerftCounts {
                nodes: 1,
                captures: usize::from(effects.captured.is_some()),
                en_passant: usize::from(effects.en_passant),
                castles: usize::from(effects.is_castling()),
                promotions: usize::from(effects.promotion.is_some()),
                checks: usize::from(in_check),
                checkmates: usize::from(in_check && !has_any_legal_move(&child, opponent)),
            });
        } else {
            total.merge(perft(generator, &mut child, depth - 1)?);
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;

    #[test]
    fn startpos_perft_matches_reference_counts() {
        let mut game_state = GameState::with_room("ROOM", "alice");
        let before = game_state.clone();

        let d1 = perft(&LegalMoveGenerator, &mut game_state, 1).expect("perft should run");
        let d2 = perft(&LegalMoveGenerator, &mut game_state, 2).expect("perft should run");
        let d3 = perft(&LegalMoveGenerator, &mut game_state, 3).expect("perft should run");

        assert_eq!(d1.nodes, 20);
        assert_eq!(d2.nodes, 400);
        assert_eq!(d3.nodes, 8902);
        assert_eq!(d3.captures, 34);
        assert_eq!(d3.checks, 12);
        assert_eq!(d3.checkmates, 0);
        assert_eq!(game_state, before);
    }

    #[test]
    fn kiwipete_depth_one_covers_castling_and_captures() {
        let mut game_state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("fen should parse");

        let d1 = perft(&LegalMoveGenerator, &mut game_state, 1).expect("perft should run");
        assert_eq!(d1.nodes, 48);
        assert_eq!(d1.captures, 8);
        assert_eq!(d1.castles, 2);

        let d2 = perft(&LegalMoveGenerator, &mut game_state, 2).expect("perft should run");
        assert_eq!(d2.nodes, 2039);
    }
}
