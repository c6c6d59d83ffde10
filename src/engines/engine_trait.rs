//! Engine abstraction layer used by the UCI subsystem.
//!
//! Defines common input parameters and output payloads so different move
//! choosers can be selected at runtime behind a single trait interface.

use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn author(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    /// Picks a move for the side to move. The position may be mutated while
    /// thinking but is restored before returning.
    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, String>;
}
