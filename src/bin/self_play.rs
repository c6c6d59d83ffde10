//! Standalone engine-vs-itself game runner.
//!
//! Run with:
//! `cargo run --release --bin self_play -- --plies 60 --seed 7`

use clap::Parser;
use env_logger::Env;

use weighted_minimax::engines::engine_weighted::WeightedMinimaxEngine;
use weighted_minimax::game_state::chess_rules::STARTING_POSITION_FEN;
use weighted_minimax::game_state::game_state::GameState;
use weighted_minimax::utils::self_play::{play_game, SelfPlayConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play the weighted minimax engine against itself")]
struct Args {
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,
    #[arg(long, default_value_t = 120)]
    plies: u16,
    #[arg(long, default_value_t = 2)]
    depth: u8,
    /// Base seed; black uses `seed + 1`.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut game = GameState::from_fen(&args.fen).map_err(|e| e.to_string())?;
    let (mut white, mut black) = match args.seed {
        Some(seed) => (
            WeightedMinimaxEngine::seeded(args.depth, seed),
            WeightedMinimaxEngine::seeded(args.depth, seed.wrapping_add(1)),
        ),
        None => (
            WeightedMinimaxEngine::new(args.depth),
            WeightedMinimaxEngine::new(args.depth),
        ),
    };

    let started = std::time::Instant::now();
    let record = play_game(
        &mut game,
        &mut white,
        &mut black,
        SelfPlayConfig {
            max_plies: args.plies,
            depth: None,
        },
    )?;
    log::info!(
        "played {} plies in {} ms",
        record.moves.len(),
        started.elapsed().as_millis()
    );

    println!("{}", record.report());
    Ok(())
}
