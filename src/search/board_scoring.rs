//! Static position evaluation.
//!
//! Search stays independent of the heuristic by scoring leaves through the
//! `BoardScorer` trait. `EvaluationTables` is the standard scorer: material,
//! piece-square bonuses, side-to-move mobility and a check penalty, always
//! reported from white's point of view.

use crate::game_state::chess_types::*;

/// Score of a position where the side to move has been mated.
pub const MATE_SCORE: i32 = 20000;

/// Scores at or beyond this magnitude only arise from checkmate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 5000;

pub const MOBILITY_WEIGHT: i32 = 2;
pub const CHECK_PENALTY: i32 = 50;

pub trait BoardScorer: Send + Sync {
    /// Score with positive values favoring white.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Piece values and piece-square tables, read-only after construction.
///
/// Square tables are indexed `a1 = 0 .. h8 = 63` for white pieces; dark
/// pieces read the rank-mirrored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationTables {
    pub piece_values: [i32; 6],
    pub positional: [[i32; 64]; 6],
}

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    20, 20, 30, 40, 40, 30, 20, 20,
    10, 10, 20, 35, 35, 20, 10, 10,
     5,  5, 15, 30, 30, 15,  5,  5,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 10, 10,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -10,   0,   5,  5,  5,   5,   0, -10,
     -5,   0,   5,  5,  5,   5,   0,  -5,
      0,   0,   5,  5,  5,   5,   0,  -5,
    -10,   5,   5,  5,  5,   5,   0, -10,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MIDGAME_TABLE: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

/// Tables shared by every engine instance.
pub static STANDARD_TABLES: EvaluationTables = EvaluationTables::STANDARD;

impl EvaluationTables {
    pub const STANDARD: EvaluationTables = EvaluationTables {
        piece_values: [100, 320, 330, 500, 900, 20000],
        positional: [
            PAWN_TABLE,
            KNIGHT_TABLE,
            BISHOP_TABLE,
            ROOK_TABLE,
            QUEEN_TABLE,
            KING_MIDGAME_TABLE,
        ],
    };

    #[inline]
    pub const fn piece_value(&self, kind: PieceKind) -> i32 {
        self.piece_values[piece_index(kind)]
    }

    /// Piece-square bonus for `piece` standing on `square`.
    #[inline]
    pub fn positional_bonus(&self, piece: Piece, square: Square) -> i32 {
        self.positional[piece_index(piece.role)][table_index(piece.color, square)]
    }

    /// Material plus piece-square sum, white minus black.
    pub fn material_and_position(&self, game_state: &GameState) -> i32 {
        let mut score = 0i32;
        for square in Square::ALL {
            let Some(piece) = game_state.piece_at(square) else {
                continue;
            };
            let value = self.piece_value(piece.role) + self.positional_bonus(piece, square);
            score += color_sign(piece.color) * value;
        }
        score
    }
}

impl Default for EvaluationTables {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BoardScorer for EvaluationTables {
    fn score(&self, game_state: &GameState) -> i32 {
        if game_state.is_checkmate() {
            return match game_state.side_to_move() {
                Color::White => -MATE_SCORE,
                Color::Black => MATE_SCORE,
            };
        }
        if game_state.is_stalemate() || game_state.is_insufficient_material() {
            return 0;
        }

        let mut score = self.material_and_position(game_state);

        let mobility = game_state.legal_moves().len() as i32 * MOBILITY_WEIGHT;
        score += color_sign(game_state.side_to_move()) * mobility;

        // Applied to whichever side is in check.
        if game_state.is_check() {
            score -= CHECK_PENALTY;
        }

        score
    }
}

/// Evaluates with the standard tables.
#[inline]
pub fn evaluate(game_state: &GameState) -> i32 {
    STANDARD_TABLES.score(game_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkmate_scores_against_the_mated_side() {
        let white_mated = GameState::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .expect("fen");
        assert_eq!(evaluate(&white_mated), -MATE_SCORE);

        let black_mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("fen");
        assert!(black_mated.is_checkmate());
        assert_eq!(evaluate(&black_mated), MATE_SCORE);
    }

    #[test]
    fn drawn_positions_score_zero() {
        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen");
        assert_eq!(evaluate(&stalemate), 0);

        let knight_vs_king = GameState::from_fen("8/8/4k3/8/8/4KN2/8/8 w - - 0 1").expect("fen");
        assert!(knight_vs_king.is_insufficient_material());
        assert_eq!(evaluate(&knight_vs_king), 0);
    }

    #[test]
    fn starting_position_is_material_balanced_plus_white_mobility() {
        let game = GameState::new_game();
        let tables = EvaluationTables::STANDARD;
        assert_eq!(tables.material_and_position(&game), 0);
        assert_eq!(evaluate(&game), 20 * MOBILITY_WEIGHT);
    }

    #[test]
    fn dark_mobility_is_subtracted() {
        let mut game = GameState::new_game();
        game.play_uci("e2e4").expect("legal");
        let tables = EvaluationTables::STANDARD;
        let static_part = tables.material_and_position(&game);
        assert_eq!(evaluate(&game), static_part - 20 * MOBILITY_WEIGHT);
    }

    #[test]
    fn check_penalty_applies_whoever_is_in_check() {
        // Dark king on e8 checked by a rook on e1; dark to move.
        let dark_checked = GameState::from_fen("4k3/8/8/8/8/8/8/K3R3 b - - 0 1").expect("fen");
        assert!(dark_checked.is_check());
        let tables = EvaluationTables::STANDARD;
        let mobility = dark_checked.legal_moves().len() as i32 * MOBILITY_WEIGHT;
        assert_eq!(
            tables.score(&dark_checked),
            tables.material_and_position(&dark_checked) - mobility - CHECK_PENALTY
        );

        // Light king on e1 checked by a rook on e8; light to move.
        let light_checked = GameState::from_fen("k3r3/8/8/8/8/8/8/4K3 w - - 0 1").expect("fen");
        assert!(light_checked.is_check());
        let mobility = light_checked.legal_moves().len() as i32 * MOBILITY_WEIGHT;
        assert_eq!(
            tables.score(&light_checked),
            tables.material_and_position(&light_checked) + mobility - CHECK_PENALTY
        );
    }

    #[test]
    fn dark_pieces_use_mirrored_square_bonus() {
        let tables = EvaluationTables::STANDARD;
        let white_knight = Piece {
            color: Color::White,
            role: PieceKind::Knight,
        };
        let black_knight = Piece {
            color: Color::Black,
            role: PieceKind::Knight,
        };
        assert_eq!(
            tables.positional_bonus(white_knight, Square::B1),
            tables.positional_bonus(black_knight, Square::B8)
        );
        assert_eq!(tables.positional_bonus(white_knight, Square::B1), -40);
    }

    #[test]
    fn evaluate_does_not_mutate_the_position() {
        let game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("fen");
        let before = game.get_fen();
        let _ = evaluate(&game);
        assert_eq!(game.get_fen(), before);
        assert_eq!(game.undo_depth(), 0);
    }
}
