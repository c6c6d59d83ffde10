//! Board vocabulary shared by the engine.
//!
//! Squares, pieces and moves come from the rules collaborator (`shakmaty`).
//! This module re-exports them under the names the engine uses and adds the
//! small index helpers the scoring tables need.

pub use shakmaty::{Color, File, Move, Piece, Role as PieceKind, Square};

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Row index of a piece kind in the scoring tables.
#[inline]
pub const fn piece_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Pawn => 0,
        PieceKind::Knight => 1,
        PieceKind::Bishop => 2,
        PieceKind::Rook => 3,
        PieceKind::Queen => 4,
        PieceKind::King => 5,
    }
}

/// Table index (`a1 = 0 .. h8 = 63`) of a square.
#[inline]
pub fn square_index(square: Square) -> usize {
    square as usize
}

/// Table index for a piece of `color` on `square`, mirroring ranks for dark.
#[inline]
pub fn table_index(color: Color, square: Square) -> usize {
    match color {
        Color::White => square_index(square),
        Color::Black => square_index(square.flip_vertical()),
    }
}

/// Zero-based rank of a square counted from white's back rank.
#[inline]
pub fn rank_number(square: Square) -> i32 {
    square.rank() as i32
}

/// `+1` when `color` is white, `-1` otherwise.
#[inline]
pub const fn color_sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}
