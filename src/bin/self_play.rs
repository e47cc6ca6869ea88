//! Plays the move evaluator against an opponent and feeds the results back into
//! the persisted evaluation weights.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --games 20 --depth 3 --weights weights.json --verbose`
//! `cargo run --release --bin self_play -- --opponent evaluator --seed 99`

use duel_chess::engines::chess_ai::ChessAi;
use duel_chess::engines::engine_random::RandomEngine;
use duel_chess::engines::engine_trait::{Engine, GoParams};
use duel_chess::engines::move_evaluator::MoveEvaluator;
use duel_chess::game_state::chess_types::Color;
use duel_chess::game_state::game_state::GameState;
use duel_chess::search::evaluation_weights::JsonFileWeightsStore;
use duel_chess::search::search_config::SearchConfig;
use duel_chess::utils::render_game_state::render_game_state;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct SelfPlayConfig {
    games: usize,
    seed: u64,
    depth: u8,
    max_plies: u32,
    weights_path: String,
    opponent: OpponentKind,
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpponentKind {
    Random,
    Evaluator,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 4,
            seed: 1234,
            depth: 2,
            max_plies: 160,
            weights_path: "evaluation_weights.json".to_owned(),
            opponent: OpponentKind::Random,
            verbose: false,
        }
    }
}

#[derive(Debug, Default)]
struct SeriesStats {
    evaluator_wins: usize,
    opponent_wins: usize,
    draws: usize,
    unfinished: usize,
}

fn parse_args() -> Result<SelfPlayConfig, String> {
    let mut config = SelfPlayConfig::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" | "-v" => config.verbose = true,
            "--games" => config.games = parse_value(&arg, args.next())?,
            "--seed" => config.seed = parse_value(&arg, args.next())?,
            "--depth" => config.depth = parse_value(&arg, args.next())?,
            "--max-plies" => config.max_plies = parse_value(&arg, args.next())?,
            "--weights" => {
                config.weights_path = args.next().ok_or("--weights needs a path")?;
            }
            "--opponent" => {
                config.opponent = match args.next().as_deref() {
                    Some("random") => OpponentKind::Random,
                    Some("evaluator") => OpponentKind::Evaluator,
                    other => return Err(format!("unknown opponent {other:?}")),
                };
            }
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag}: cannot parse {value:?}"))
}

fn opponent_for(kind: OpponentKind, seed: u64) -> Box<dyn Engine> {
    match kind {
        OpponentKind::Random => Box::new(RandomEngine::seeded(seed)),
        OpponentKind::Evaluator => Box::new(MoveEvaluator::seeded(seed)),
    }
}

fn main() -> Result<(), String> {
    let config = parse_args()?;

    let default_filter = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let store = JsonFileWeightsStore::new(&config.weights_path);
    let mut ai = ChessAi::new(MoveEvaluator::with_rng(
        StdRng::seed_from_u64(config.seed),
        Box::new(store),
        SearchConfig::default(),
    ));
    info!(weights = ?ai.evaluator().weights(), path = %config.weights_path, "starting self-play");

    let mut stats = SeriesStats::default();
    for game_index in 0..config.games {
        // Alternate colors so both sides of the weights get exercised.
        let ai_color = if game_index % 2 == 0 { Color::White } else { Color::Black };
        let mut opponent = opponent_for(config.opponent, config.seed.wrapping_add(game_index as u64));
        opponent.new_game();

        let (white_seat, black_seat) = match ai_color {
            Color::White => ("evaluator", opponent.name().to_owned()),
            Color::Black => (opponent.name(), "evaluator".to_owned()),
        };
        let mut game = GameState::new(white_seat);
        game.join(black_seat);

        while game.outcome().is_none() && game.move_count() < config.max_plies {
            let side = game.turn();
            if side == ai_color {
                if ai.make_ai_move(&mut game, side, config.depth).map_err(|e| e.to_string())?.is_none() {
                    break;
                }
            } else {
                let params = GoParams {
                    depth: Some(config.depth),
                    top_n: Some(1),
                };
                let output = opponent.choose_move(&mut game, &params).map_err(|e| e.to_string())?;
                let Some(best) = output.best_move else {
                    break;
                };
                let player = game
                    .player_id(side)
                    .ok_or_else(|| format!("no player seated as {side}"))?
                    .to_owned();
                game.make_move(best.mv.from, best.mv.to, &player)
                    .map_err(|e| e.to_string())?;
            }
        }

        match (game.outcome(), game.winner()) {
            (None, _) => {
                stats.unfinished += 1;
                warn!(game = game_index, plies = game.move_count(), "ply limit reached");
            }
            (Some(_), Some(winner)) if winner == ai_color => stats.evaluator_wins += 1,
            (Some(_), Some(_)) => stats.opponent_wins += 1,
            (Some(_), None) => stats.draws += 1,
        }
        ai.record_result(&game, ai_color);

        println!(
            "game {} (evaluator as {} vs {}): {:?} after {} plies",
            game_index + 1,
            ai_color,
            opponent.name(),
            game.outcome(),
            game.move_count()
        );
        println!("{}", game.get_fen());
        if config.verbose {
            println!("{}", render_game_state(&game));
        }
    }

    println!("{stats:?}");
    println!("final weights: {:?}", ai.evaluator().weights());
    Ok(())
}
