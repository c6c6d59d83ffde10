//! Uniform random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! idle demo play, and low-strength gameplay.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Weighted Minimax Random"
    }

    fn author(&self) -> &str {
        "weighted_minimax authors"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Seed") {
            let parsed = value
                .parse::<u64>()
                .map_err(|_| format!("invalid Seed value '{}'", value))?;
            self.rng = if parsed == 0 {
                StdRng::from_os_rng()
            } else {
                StdRng::seed_from_u64(parsed)
            };
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let legal_moves = game_state.legal_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        if let Some(depth) = params.depth {
            out.info_lines.push(format!(
                "info string random_engine requested_depth {}",
                depth
            ));
        }

        if legal_moves.is_empty() {
            out.best_move = None;
            return Ok(out);
        }

        let picked = legal_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or("failed to choose a random move")?;

        out.best_move = Some(picked.clone());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move() {
        let mut engine = RandomEngine::seeded(9);
        let mut game = GameState::new_game();
        let out = engine
            .choose_move(&mut game, &GoParams::default())
            .expect("ok");
        let mv = out.best_move.expect("startpos has moves");
        assert!(game.legal_moves().contains(&mv));
    }

    #[test]
    fn returns_none_when_checkmated() {
        let mut engine = RandomEngine::seeded(9);
        let mut game = GameState::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .expect("fen");
        let out = engine
            .choose_move(&mut game, &GoParams { depth: Some(3) })
            .expect("ok");
        assert!(out.best_move.is_none());
        assert_eq!(out.info_lines.len(), 2);
    }
}
