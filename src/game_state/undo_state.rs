use shakmaty::zobrist::Zobrist64;
use shakmaty::Chess;

use crate::game_state::chess_types::Move;

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub prev_position: Chess,
    pub prev_zobrist_key: Zobrist64,
}
