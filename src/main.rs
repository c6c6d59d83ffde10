use clap::Parser;
use env_logger::Env;

use weighted_minimax::uci::uci_top::{run_stdio_loop, UciSettings};

/// UCI chess engine choosing among its best moves with weighted randomness.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth in plies, counting the engine's own move.
    #[arg(long, default_value_t = 2)]
    depth: u8,
    /// Seed for reproducible move choices; omit for OS entropy.
    #[arg(long)]
    seed: Option<u64>,
    /// 1 = uniform random moves, 2 = weighted minimax.
    #[arg(long, default_value_t = 2)]
    skill_level: u8,
}

fn main() -> std::io::Result<()> {
    // Logs go to stderr; stdout carries the UCI protocol.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    log::info!("starting with {:?}", args);

    run_stdio_loop(UciSettings {
        skill_level: args.skill_level,
        depth: args.depth,
        seed: args.seed,
    })
}
