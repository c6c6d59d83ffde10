//! Engine-vs-engine game loop.
//!
//! Plays a position out with one engine per side until the game ends or a
//! ply limit is reached. Used by the `self_play` binary and by tests that
//! need many selector calls on evolving positions.

use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::{move_to_uci, GameOverReason, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayConfig {
    pub max_plies: u16,
    pub depth: Option<u8>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            depth: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfPlayRecord {
    pub start_fen: String,
    pub moves: Vec<String>,
    pub final_fen: String,
    pub reason: Option<GameOverReason>,
    pub result: &'static str,
}

impl SelfPlayRecord {
    pub fn report(&self) -> String {
        let reason = self.reason.map_or("ply_limit", |r| r.as_str());
        format!(
            "{} plies, result {} ({})\nmoves: {}\nfinal: {}",
            self.moves.len(),
            self.result,
            reason,
            self.moves.join(" "),
            self.final_fen
        )
    }
}

/// Plays `game_state` forward in place with `white` and `black` to move.
pub fn play_game(
    game_state: &mut GameState,
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    config: SelfPlayConfig,
) -> Result<SelfPlayRecord, String> {
    let start_fen = game_state.get_fen();
    let params = GoParams {
        depth: config.depth,
    };
    let mut moves = Vec::new();

    white.new_game();
    black.new_game();

    while moves.len() < usize::from(config.max_plies) && !game_state.is_game_over() {
        let engine: &mut dyn Engine = match game_state.side_to_move() {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let output = engine.choose_move(game_state, &params)?;
        let Some(mv) = output.best_move else {
            break;
        };
        let lan = move_to_uci(&mv);
        log::debug!("ply {} {} plays {}", moves.len() + 1, engine.name(), lan);
        game_state.make_move(&mv);
        moves.push(lan);
    }

    Ok(SelfPlayRecord {
        start_fen,
        moves,
        final_fen: game_state.get_fen(),
        reason: game_state.game_over_reason(),
        result: game_state.result(),
    })
}
