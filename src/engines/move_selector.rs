//! Root move selection: search every legal move, add move-quality bonuses,
//! rank, then draw one of the best few with fixed relative weights.
//!
//! Scores are white-perspective throughout. Bonuses are signed for the side
//! making the move so they always push "better for the mover" in the same
//! direction as the ranking.
//!
//! With the default config a mating move that no other candidate matches is
//! played outright instead of being drawn, so a mate in one is never missed.
//! Set `always_play_mate` to `false` to sample on every call, in which case
//! the best candidate is only drawn with its 40% weight.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::move_to_uci;
use crate::search::board_scoring::{BoardScorer, MATE_THRESHOLD};
use crate::search::minimax::{alpha_beta, SearchStats, SEARCH_INFINITY};

/// Tunable constants of the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Total plies searched, counting the root move itself.
    pub depth: u8,
    /// Positions with a full-move number up to this value get opening bonuses.
    pub opening_move_limit: u32,
    /// Relative draw weights for the best candidates, best first.
    pub candidate_weights: Vec<u32>,
    /// Promotion bonus indexed by promoted piece kind.
    pub promotion_bonuses: [i32; 6],
    /// Multiplier of the squared rank progress of a pawn move.
    pub pawn_advancement_factor: i32,
    pub opening_center_pawn_bonus: i32,
    pub opening_flank_pawn_bonus: i32,
    pub opening_double_push_bonus: i32,
    /// Skip sampling when the best candidate is a mate nobody else matches.
    pub always_play_mate: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        let mut promotion_bonuses = [0; 6];
        promotion_bonuses[piece_index(PieceKind::Queen)] = 800;
        promotion_bonuses[piece_index(PieceKind::Rook)] = 450;
        promotion_bonuses[piece_index(PieceKind::Bishop)] = 300;
        promotion_bonuses[piece_index(PieceKind::Knight)] = 300;

        Self {
            depth: 2,
            opening_move_limit: 10,
            candidate_weights: vec![40, 25, 20, 10, 5],
            promotion_bonuses,
            pawn_advancement_factor: 3,
            opening_center_pawn_bonus: 30,
            opening_flank_pawn_bonus: 15,
            opening_double_push_bonus: 10,
            always_play_mate: true,
        }
    }
}

impl SelectorConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Everything a caller may want to report about one selection.
#[derive(Debug, Clone)]
pub struct Selection {
    pub chosen: ScoredMove,
    /// All root candidates, best for the mover first.
    pub ranked: Vec<ScoredMove>,
    pub stats: SearchStats,
    /// True when the choice bypassed weighted sampling.
    pub forced: bool,
}

/// Bonus for a move computed before it is played, signed for the mover.
pub fn heuristic_bonus(game_state: &GameState, mv: &Move, config: &SelectorConfig) -> i32 {
    let mover = game_state.side_to_move();
    let is_opening = game_state.fullmove_number() <= config.opening_move_limit;

    let mut bonus = 0;
    if let Some(promoted) = mv.promotion() {
        bonus += config.promotion_bonuses[piece_index(promoted)];
    }

    if mv.role() == PieceKind::Pawn {
        bonus += pawn_advancement_bonus(mover, mv.to(), config);
        if is_opening {
            bonus += opening_pawn_bonus(mv, config);
        }
    }

    color_sign(mover) * bonus
}

fn pawn_advancement_bonus(mover: Color, to: Square, config: &SelectorConfig) -> i32 {
    let progress = match mover {
        Color::White => rank_number(to),
        Color::Black => 7 - rank_number(to),
    };
    config.pawn_advancement_factor * progress * progress
}

fn opening_pawn_bonus(mv: &Move, config: &SelectorConfig) -> i32 {
    let Some(from) = mv.from() else {
        return 0;
    };

    let mut bonus = if matches!(from.file(), File::D | File::E) {
        config.opening_center_pawn_bonus
    } else {
        config.opening_flank_pawn_bonus
    };

    if (square_index(mv.to()) as i32 - square_index(from) as i32).abs() == 16 {
        bonus += config.opening_double_push_bonus;
    }
    bonus
}

/// Scores every root move in generation order.
pub fn score_moves<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    config: &SelectorConfig,
) -> (Vec<ScoredMove>, SearchStats) {
    let maximizing = game_state.side_to_move() == Color::White;
    let child_depth = config.depth.saturating_sub(1);
    let mut stats = SearchStats::default();

    let moves = game_state.legal_moves();
    let mut scored = Vec::with_capacity(moves.len());

    for mv in &moves {
        game_state.make_move(mv);
        let base = alpha_beta(
            game_state,
            scorer,
            child_depth,
            -SEARCH_INFINITY,
            SEARCH_INFINITY,
            !maximizing,
            &mut stats,
        );
        game_state.unmake_move();

        let score = base + heuristic_bonus(game_state, mv, config);
        log::trace!("candidate {} base {} total {}", move_to_uci(mv), base, score);
        scored.push(ScoredMove {
            mv: mv.clone(),
            score,
        });
    }

    (scored, stats)
}

/// Stable sort putting the best move for the mover first.
pub fn rank_moves(scored: &mut [ScoredMove], maximizing: bool) {
    if maximizing {
        scored.sort_by(|a, b| b.score.cmp(&a.score));
    } else {
        scored.sort_by(|a, b| a.score.cmp(&b.score));
    }
}

/// Full selection with diagnostics; `None` when there is no legal move.
pub fn choose<S: BoardScorer, R: Rng + ?Sized>(
    game_state: &mut GameState,
    scorer: &S,
    config: &SelectorConfig,
    rng: &mut R,
) -> ChessResult<Option<Selection>> {
    let mover = game_state.side_to_move();
    let (mut ranked, stats) = score_moves(game_state, scorer, config);
    if ranked.is_empty() {
        return Ok(None);
    }
    rank_moves(&mut ranked, mover == Color::White);

    if config.always_play_mate && is_lone_mate(&ranked, mover) {
        let chosen = ranked[0].clone();
        log::debug!(
            "forced mate {} score {}",
            move_to_uci(&chosen.mv),
            chosen.score
        );
        return Ok(Some(Selection {
            chosen,
            ranked,
            stats,
            forced: true,
        }));
    }

    let index = draw_candidate(&ranked, &config.candidate_weights, rng)?;
    let chosen = ranked[index].clone();
    log::debug!(
        "picked {} score {} rank {} of {} candidates, {} nodes",
        move_to_uci(&chosen.mv),
        chosen.score,
        index + 1,
        ranked.len().min(config.candidate_weights.len()),
        stats.nodes
    );

    Ok(Some(Selection {
        chosen,
        ranked,
        stats,
        forced: false,
    }))
}

/// Draws the rank of one candidate from `ranked`, which must be best first.
///
/// `weights[i]` is the relative weight of rank `i`. Candidates past the end
/// of `weights` are never drawn, and a shorter `ranked` only samples the
/// ranks it has.
pub fn draw_candidate<R: Rng + ?Sized>(
    ranked: &[ScoredMove],
    weights: &[u32],
    rng: &mut R,
) -> ChessResult<usize> {
    let pool = weights
        .iter()
        .copied()
        .enumerate()
        .take(ranked.len())
        .collect::<Vec<_>>();
    pool.choose_weighted(rng, |(_, weight)| *weight)
        .map(|(rank, _)| *rank)
        .map_err(|e| ChessError::Sampling(e.to_string()))
}

/// Picks a move for the side to move, or `None` when the game is decided.
pub fn select_move<S: BoardScorer, R: Rng + ?Sized>(
    game_state: &mut GameState,
    scorer: &S,
    config: &SelectorConfig,
    rng: &mut R,
) -> ChessResult<Option<Move>> {
    Ok(choose(game_state, scorer, config, rng)?.map(|selection| selection.chosen.mv))
}

fn is_lone_mate(ranked: &[ScoredMove], mover: Color) -> bool {
    let for_mover = |scored: &ScoredMove| color_sign(mover) * scored.score;
    let best = for_mover(&ranked[0]);
    if best < MATE_THRESHOLD {
        return false;
    }
    ranked.get(1).map_or(true, |second| for_mover(second) < best)
}
