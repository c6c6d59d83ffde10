//! Canonical chess-rule constants.
//!
//! Static literals used when building positions and deciding when a game is
//! drawn by the clock or by repetition.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Number of occurrences of one position that counts as repetition.
pub const REPETITION_COUNT: usize = 3;
