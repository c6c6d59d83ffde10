//! Mutable position handle with make/unmake support.
//!
//! `GameState` wraps the rules collaborator's position and adds an undo
//! stack and a repetition history so search can walk the tree by mutating
//! one instance and restoring it, instead of copying a board per node.

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::uci::Uci;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, MoveList, Position};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{
    FIFTY_MOVE_HALFMOVES, REPETITION_COUNT, STARTING_POSITION_FEN,
};
use crate::game_state::chess_types::*;

/// Why a game is over, in the order the checks are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoves,
    Repetition,
}

impl GameOverReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameOverReason::Checkmate => "checkmate",
            GameOverReason::Stalemate => "stalemate",
            GameOverReason::InsufficientMaterial => "insufficient_material",
            GameOverReason::FiftyMoves => "fifty_moves",
            GameOverReason::Repetition => "repetition",
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incremental game state used by search and the protocol front-end.
#[derive(Debug, Clone)]
pub struct GameState {
    position: Chess,

    // --- Repetition support ---
    repetition_history: Vec<Zobrist64>,

    // --- Make/unmake stack ---
    undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl GameState {
    fn from_position(position: Chess) -> Self {
        let key = zobrist_key(&position);
        Self {
            position,
            repetition_history: vec![key],
            undo_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let parsed: Fen = fen
            .trim()
            .parse()
            .map_err(|e| ChessError::InvalidPosition(format!("'{fen}': {e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| ChessError::InvalidPosition(format!("'{fen}': {e}")))?;
        Ok(Self::from_position(position))
    }

    pub fn get_fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Legal moves in the collaborator's generation order.
    #[inline]
    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    /// Applies a legal move in place. The caller guarantees legality.
    pub fn make_move(&mut self, mv: &Move) {
        let prev_zobrist_key = self
            .repetition_history
            .last()
            .copied()
            .unwrap_or_else(|| zobrist_key(&self.position));
        self.undo_stack.push(UndoState {
            mv: mv.clone(),
            prev_position: self.position.clone(),
            prev_zobrist_key,
        });

        self.position.play_unchecked(mv);
        self.repetition_history.push(zobrist_key(&self.position));
    }

    /// Restores the state before the most recent `make_move`.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let undo = self.undo_stack.pop()?;
        self.position = undo.prev_position;
        self.repetition_history.pop();
        debug_assert_eq!(self.repetition_history.last(), Some(&undo.prev_zobrist_key));
        Some(undo.mv)
    }

    /// Number of moves currently applied on top of the root position.
    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmoves().get()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.position.halfmoves()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    #[inline]
    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    #[inline]
    pub fn is_fifty_moves(&self) -> bool {
        self.halfmove_clock() >= FIFTY_MOVE_HALFMOVES
    }

    /// True when the current position occurred at least three times since
    /// the last irreversible move.
    pub fn is_repetition(&self) -> bool {
        let Some(current) = self.repetition_history.last() else {
            return false;
        };
        let window = self.halfmove_clock() as usize + 1;
        let seen = self
            .repetition_history
            .iter()
            .rev()
            .take(window)
            .filter(|key| *key == current)
            .count();
        seen >= REPETITION_COUNT
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        if self.is_checkmate() {
            Some(GameOverReason::Checkmate)
        } else if self.is_stalemate() {
            Some(GameOverReason::Stalemate)
        } else if self.is_insufficient_material() {
            Some(GameOverReason::InsufficientMaterial)
        } else if self.is_fifty_moves() {
            Some(GameOverReason::FiftyMoves)
        } else if self.is_repetition() {
            Some(GameOverReason::Repetition)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over_reason().is_some()
    }

    /// PGN-style result string for the current position.
    pub fn result(&self) -> &'static str {
        match self.game_over_reason() {
            Some(GameOverReason::Checkmate) => match self.side_to_move() {
                Color::White => "0-1",
                Color::Black => "1-0",
            },
            Some(_) => "1/2-1/2",
            None => "*",
        }
    }

    /// Parses UCI text and checks it against the legal moves of this position.
    pub fn parse_uci_move(&self, text: &str) -> ChessResult<Move> {
        let uci: Uci = text
            .parse()
            .map_err(|e| ChessError::InvalidMove(format!("'{text}': {e}")))?;
        uci.to_move(&self.position)
            .map_err(|e| ChessError::InvalidMove(format!("'{text}': {e}")))
    }

    /// Parses and applies a UCI move, returning the applied move.
    pub fn play_uci(&mut self, text: &str) -> ChessResult<Move> {
        let mv = self.parse_uci_move(text)?;
        self.make_move(&mv);
        Ok(mv)
    }
}

/// UCI text (`e2e4`, `e7e8q`, `e1g1`) for a move.
pub fn move_to_uci(mv: &Move) -> String {
    Uci::from_move(mv, CastlingMode::Standard).to_string()
}

#[inline]
fn zobrist_key(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.fullmove_number(), 1);
    }

    #[test]
    fn from_fen_rejects_malformed_text() {
        let err = GameState::from_fen("not a fen").expect_err("garbage should not parse");
        assert!(matches!(err, ChessError::InvalidPosition(_)));

        let err = GameState::from_fen("8/8/8/8/8/8/8/8 w - - 0 1")
            .expect_err("a board without kings is not a position");
        assert!(matches!(err, ChessError::InvalidPosition(_)));
    }

    #[test]
    fn make_then_unmake_restores_fen_and_counters() {
        let mut game = GameState::new_game();
        let before = game.get_fen();

        let e4 = game.parse_uci_move("e2e4").expect("e2e4 is legal");
        game.make_move(&e4);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.undo_depth(), 1);

        let e5 = game.parse_uci_move("e7e5").expect("e7e5 is legal");
        game.make_move(&e5);
        assert_eq!(game.fullmove_number(), 2);

        assert_eq!(game.unmake_move(), Some(e5));
        assert_eq!(game.unmake_move(), Some(e4));
        assert_eq!(game.unmake_move(), None);
        assert_eq!(game.get_fen(), before);
        assert_eq!(game.undo_depth(), 0);
    }

    #[test]
    fn parse_uci_move_rejects_bad_and_illegal_text() {
        let game = GameState::new_game();
        assert!(matches!(
            game.parse_uci_move("zz99"),
            Err(ChessError::InvalidMove(_))
        ));
        assert!(matches!(
            game.parse_uci_move("e2e5"),
            Err(ChessError::InvalidMove(_))
        ));
    }

    #[test]
    fn uci_text_round_trips_for_promotion_and_castling() {
        let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K2R w K - 0 1").expect("fen");
        let promo = game.parse_uci_move("a7a8q").expect("promotion is legal");
        assert_eq!(promo.promotion(), Some(PieceKind::Queen));
        assert_eq!(move_to_uci(&promo), "a7a8q");

        let castle = game.play_uci("e1g1").expect("castling is legal");
        assert_eq!(move_to_uci(&castle), "e1g1");
    }

    #[test]
    fn detects_checkmate_and_reports_result() {
        // Fool's mate, white to move and mated.
        let game = GameState::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .expect("fen");
        assert!(game.is_checkmate());
        assert_eq!(game.game_over_reason(), Some(GameOverReason::Checkmate));
        assert_eq!(game.result(), "0-1");
    }

    #[test]
    fn detects_stalemate_and_insufficient_material() {
        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen");
        assert!(stalemate.is_stalemate());
        assert_eq!(stalemate.game_over_reason(), Some(GameOverReason::Stalemate));
        assert_eq!(stalemate.result(), "1/2-1/2");

        let bare_kings = GameState::from_fen("8/8/4k3/8/8/4K3/8/8 w - - 0 1").expect("fen");
        assert!(bare_kings.is_insufficient_material());
        assert_eq!(
            bare_kings.game_over_reason(),
            Some(GameOverReason::InsufficientMaterial)
        );
    }

    #[test]
    fn fifty_move_clock_ends_the_game() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").expect("fen");
        assert_eq!(game.halfmove_clock(), 100);
        assert!(game.is_fifty_moves());
        assert_eq!(game.game_over_reason(), Some(GameOverReason::FiftyMoves));

        let fresh = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").expect("fen");
        assert_eq!(fresh.halfmove_clock(), 99);
        assert!(!fresh.is_game_over());
    }

    #[test]
    fn knight_shuffle_reaches_threefold_repetition() {
        let mut game = GameState::new_game();
        for _ in 0..2 {
            for lan in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                game.play_uci(lan).expect("shuffle move is legal");
            }
        }
        assert!(game.is_repetition());
        assert_eq!(game.game_over_reason(), Some(GameOverReason::Repetition));

        game.unmake_move();
        assert!(!game.is_repetition());
    }

    #[test]
    fn piece_at_reports_occupant() {
        let game = GameState::new_game();
        let piece = game.piece_at(Square::E1).expect("king on e1");
        assert_eq!(piece.role, PieceKind::King);
        assert_eq!(piece.color, Color::White);
        assert!(game.piece_at(Square::E4).is_none());
    }
}
