//! Weighted minimax engine.
//!
//! Wraps the root move selector behind the `Engine` trait: fixed-depth
//! alpha-beta per root move, move-quality bonuses, then a weighted draw
//! among the best five candidates.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::move_selector::{choose, SelectorConfig};
use crate::game_state::game_state::{move_to_uci, GameState};
use crate::search::board_scoring::{EvaluationTables, STANDARD_TABLES};

pub const MAX_DEPTH: u8 = 8;

pub struct WeightedMinimaxEngine {
    config: SelectorConfig,
    tables: &'static EvaluationTables,
    seed: Option<u64>,
    rng: StdRng,
}

impl WeightedMinimaxEngine {
    pub fn new(depth: u8) -> Self {
        Self::with_config(SelectorConfig::with_depth(depth.clamp(1, MAX_DEPTH)), None)
    }

    /// Engine whose draws are reproducible for a given seed.
    pub fn seeded(depth: u8, seed: u64) -> Self {
        Self::with_config(
            SelectorConfig::with_depth(depth.clamp(1, MAX_DEPTH)),
            Some(seed),
        )
    }

    pub fn with_config(config: SelectorConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            tables: &STANDARD_TABLES,
            seed,
            rng: make_rng(seed),
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }
}

impl Default for WeightedMinimaxEngine {
    fn default() -> Self {
        Self::new(SelectorConfig::default().depth)
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

impl Engine for WeightedMinimaxEngine {
    fn name(&self) -> &str {
        "Weighted Minimax"
    }

    fn author(&self) -> &str {
        "weighted_minimax authors"
    }

    fn new_game(&mut self) {
        self.rng = make_rng(self.seed);
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Depth value '{}'", value))?;
            self.config.depth = parsed.clamp(1, MAX_DEPTH);
        } else if name.eq_ignore_ascii_case("Seed") {
            let parsed = value
                .parse::<u64>()
                .map_err(|_| format!("invalid Seed value '{}'", value))?;
            self.seed = if parsed == 0 { None } else { Some(parsed) };
            self.rng = make_rng(self.seed);
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let mut config = self.config.clone();
        if let Some(depth) = params.depth {
            config.depth = depth.clamp(1, MAX_DEPTH);
        }

        let selection = choose(game_state, self.tables, &config, &mut self.rng)
            .map_err(|e| e.to_string())?;

        let mut out = EngineOutput::default();
        let Some(selection) = selection else {
            out.info_lines
                .push("info string weighted_engine no_legal_moves".to_owned());
            return Ok(out);
        };

        let best = &selection.ranked[0];
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {} pv {}",
            config.depth,
            best.score,
            selection.stats.nodes,
            move_to_uci(&best.mv)
        ));
        let top = selection
            .ranked
            .iter()
            .take(config.candidate_weights.len())
            .map(|s| format!("{}:{}", move_to_uci(&s.mv), s.score))
            .collect::<Vec<_>>()
            .join(" ");
        out.info_lines
            .push(format!("info string weighted_engine candidates {}", top));
        out.info_lines.push(format!(
            "info string weighted_engine leaves {} cutoffs {}",
            selection.stats.leaves, selection.stats.cutoffs
        ));
        out.info_lines.push(format!(
            "info string weighted_engine picked {} score {} forced {}",
            move_to_uci(&selection.chosen.mv),
            selection.chosen.score,
            selection.forced
        ));

        out.best_move = Some(selection.chosen.mv);
        Ok(out)
    }
}
