//! Fixed-depth minimax with alpha-beta pruning.
//!
//! The tree is walked by making and unmaking moves on a single `GameState`.
//! Moves are visited in generation order; there is no move ordering, so
//! pruning only ever skips work and never changes the returned value.

use crate::game_state::game_state::GameState;
use crate::search::board_scoring::BoardScorer;

/// Window bound strictly outside every score the evaluator can return.
pub const SEARCH_INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub cutoffs: u64,
}

/// Minimax value of `game_state` searched `depth` plies deep.
///
/// `maximizing` is true when the side to move wants the largest
/// white-perspective score. The position is restored before returning.
pub fn alpha_beta<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if depth == 0 || game_state.is_game_over() {
        stats.leaves += 1;
        return scorer.score(game_state);
    }

    let moves = game_state.legal_moves();

    if maximizing {
        let mut best = -SEARCH_INFINITY;
        for mv in &moves {
            game_state.make_move(mv);
            let score = alpha_beta(game_state, scorer, depth - 1, alpha, beta, false, stats);
            game_state.unmake_move();

            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }
        best
    } else {
        let mut best = SEARCH_INFINITY;
        for mv in &moves {
            game_state.make_move(mv);
            let score = alpha_beta(game_state, scorer, depth - 1, alpha, beta, true, stats);
            game_state.unmake_move();

            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }
        best
    }
}

/// Full-window search from the root.
pub fn search<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    depth: u8,
    maximizing: bool,
) -> (i32, SearchStats) {
    let mut stats = SearchStats::default();
    let score = alpha_beta(
        game_state,
        scorer,
        depth,
        -SEARCH_INFINITY,
        SEARCH_INFINITY,
        maximizing,
        &mut stats,
    );
    log::trace!(
        "search depth {} score {} nodes {} leaves {} cutoffs {}",
        depth,
        score,
        stats.nodes,
        stats.leaves,
        stats.cutoffs
    );
    (score, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::search::board_scoring::{evaluate, EvaluationTables, MATE_SCORE};

    fn plain_minimax(game_state: &mut GameState, depth: u8, maximizing: bool) -> i32 {
        if depth == 0 || game_state.is_game_over() {
            return evaluate(game_state);
        }
        let mut values = Vec::new();
        for mv in &game_state.legal_moves() {
            game_state.make_move(mv);
            values.push(plain_minimax(game_state, depth - 1, !maximizing));
            game_state.unmake_move();
        }
        if maximizing {
            values.into_iter().max().unwrap_or(-SEARCH_INFINITY)
        } else {
            values.into_iter().min().unwrap_or(SEARCH_INFINITY)
        }
    }

    const FENS: &[&str] = &[
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq - 0 1",
        "8/2k5/8/3p4/8/2K5/4P3/8 w - - 0 40",
    ];

    #[test]
    fn pruning_matches_unpruned_minimax() {
        let tables = EvaluationTables::STANDARD;
        for fen in FENS {
            for depth in 0..=2u8 {
                let mut game = GameState::from_fen(fen).expect("fen");
                let maximizing = game.side_to_move() == Color::White;
                let expected = plain_minimax(&mut game, depth, maximizing);
                let (actual, _) = search(&mut game, &tables, depth, maximizing);
                assert_eq!(actual, expected, "fen {fen} depth {depth}");
            }
        }
    }

    #[test]
    fn pruning_matches_unpruned_minimax_at_depth_three_in_the_endgame() {
        let tables = EvaluationTables::STANDARD;
        let mut game = GameState::from_fen("8/2k5/8/3p4/8/2K5/4P3/8 w - - 0 40").expect("fen");
        let expected = plain_minimax(&mut game, 3, true);
        let (actual, stats) = search(&mut game, &tables, 3, true);
        assert_eq!(actual, expected);
        assert!(stats.cutoffs > 0);
    }

    #[test]
    fn search_restores_the_position() {
        let tables = EvaluationTables::STANDARD;
        for fen in FENS {
            let mut game = GameState::from_fen(fen).expect("fen");
            let before = game.get_fen();
            let maximizing = game.side_to_move() == Color::White;
            let _ = search(&mut game, &tables, 2, maximizing);
            assert_eq!(game.get_fen(), before);
            assert_eq!(game.undo_depth(), 0);
        }
    }

    #[test]
    fn depth_zero_is_the_static_evaluation() {
        let tables = EvaluationTables::STANDARD;
        let mut game = GameState::new_game();
        let (score, stats) = search(&mut game, &tables, 0, true);
        assert_eq!(score, evaluate(&game));
        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.leaves, 1);
    }

    #[test]
    fn one_ply_counts_every_reply_as_a_leaf() {
        let tables = EvaluationTables::STANDARD;
        let mut game = GameState::new_game();
        let (_, stats) = search(&mut game, &tables, 1, true);
        assert_eq!(stats.leaves, 20);
        assert_eq!(stats.nodes, 21);
        assert_eq!(stats.cutoffs, 0);
    }

    #[test]
    fn terminal_positions_stop_the_recursion() {
        let tables = EvaluationTables::STANDARD;
        let mut mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("fen");
        let (score, stats) = search(&mut mated, &tables, 4, false);
        assert_eq!(score, MATE_SCORE);
        assert_eq!(stats.nodes, 1);
    }

    #[test]
    fn finds_mate_in_one_for_light() {
        let tables = EvaluationTables::STANDARD;
        let mut game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen");
        let (score, _) = search(&mut game, &tables, 2, true);
        assert_eq!(score, MATE_SCORE);
    }
}
