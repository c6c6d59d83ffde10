//! Crate root module declarations for the weighted minimax chess engine.
//!
//! This file exposes the position adapter, the evaluator and search, the
//! move-selecting engines, the UCI protocol front-end and the self-play
//! helpers so binaries, benches and tests can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
    pub mod engine_weighted;
    pub mod move_selector;
}

pub mod uci {
    pub mod uci_top;
}

pub mod utils {
    pub mod self_play;
}

pub use engines::move_selector::{select_move, SelectorConfig};
pub use search::board_scoring::evaluate;
