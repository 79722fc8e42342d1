//! Static position evaluation.
//!
//! Every term is computed from Black's point of view and negated for White,
//! so `evaluate(p, Black) == -evaluate(p, White)` holds exactly.

use othello_core::{Bitboard, Color, Position, Square};

use crate::config::{EvalConfig, PhaseThresholds};
use crate::phase::GamePhase;
use crate::stability::stable_discs;

/// Magnitude of a decided game. Larger than any heuristic total, so a
/// win is always preferred to a good-looking position.
pub const WIN_SCORE: i32 = 1_000_000;

/// Corner, its X-square, its two C-squares.
const CORNER_ZONES: [(Bitboard, Bitboard, Bitboard); 4] = [
    (Bitboard(1 << 0), Bitboard(1 << 9), Bitboard(1 << 1 | 1 << 8)), // a1: b2; b1, a2
    (Bitboard(1 << 7), Bitboard(1 << 14), Bitboard(1 << 6 | 1 << 15)), // h1: g2; g1, h2
    (Bitboard(1 << 56), Bitboard(1 << 49), Bitboard(1 << 48 | 1 << 57)), // a8: b7; a7, b8
    (Bitboard(1 << 63), Bitboard(1 << 54), Bitboard(1 << 55 | 1 << 62)), // h8: g7; h7, g8
];

/// Score of a finished game for `perspective`: decisive, then by margin.
pub fn terminal_score(pos: &Position, perspective: Color) -> i32 {
    let diff = pos.disc_diff(perspective);
    diff.signum() * WIN_SCORE + diff
}

/// Heuristic value of `pos` for `perspective`.
pub fn evaluate(
    pos: &Position,
    perspective: Color,
    config: &EvalConfig,
    thresholds: &PhaseThresholds,
) -> i32 {
    if pos.is_terminal() {
        return terminal_score(pos, perspective);
    }

    let phase = GamePhase::of(pos, thresholds);
    let black = pos.discs(Color::Black);
    let white = pos.discs(Color::White);

    let score = corners(black, white, config)
        + corner_neighbours(pos, black, white, config)
        + mobility(pos, phase, config)
        + stability(black, white, phase, config)
        + positional(black, white, config)
        + (black.popcount() as i32 - white.popcount() as i32) * phase.weight(&config.disc_weight);

    match perspective {
        Color::Black => score,
        Color::White => -score,
    }
}

fn corners(black: Bitboard, white: Bitboard, config: &EvalConfig) -> i32 {
    balance(black, white, Bitboard::CORNERS) * config.corner_weight
}

/// X- and C-square penalties, only while the matching corner is empty.
fn corner_neighbours(pos: &Position, black: Bitboard, white: Bitboard, config: &EvalConfig) -> i32 {
    let empties = pos.empties();
    let mut score = 0;
    for (corner, x_square, c_squares) in CORNER_ZONES {
        if (empties & corner).is_empty() {
            continue;
        }
        score -= balance(black, white, x_square) * config.x_square_penalty;
        score -= balance(black, white, c_squares) * config.c_square_penalty;
    }
    score
}

fn mobility(pos: &Position, phase: GamePhase, config: &EvalConfig) -> i32 {
    let black_moves = pos.mobility(Color::Black);
    let white_moves = pos.mobility(Color::White);

    let count = (black_moves.popcount() as i32 - white_moves.popcount() as i32)
        * phase.weight(&config.mobility_weight);
    let quality = (move_quality(black_moves, config) - move_quality(white_moves, config))
        * phase.weight(&config.move_quality_percent)
        / 100;
    count + quality
}

fn move_quality(moves: Bitboard, config: &EvalConfig) -> i32 {
    let q = &config.move_quality;
    let corners = (moves & Bitboard::CORNERS).popcount() as i32;
    let edges = (moves & Bitboard::EDGES & !Bitboard::CORNERS).popcount() as i32;
    let x_squares = (moves & Bitboard::X_SQUARES).popcount() as i32;
    let other = moves.popcount() as i32 - corners - edges - x_squares;
    corners * q.corner + edges * q.edge + x_squares * q.x_square + other * q.other
}

fn stability(black: Bitboard, white: Bitboard, phase: GamePhase, config: &EvalConfig) -> i32 {
    let own = stable_discs(black, white).popcount() as i32;
    let opp = stable_discs(white, black).popcount() as i32;
    (own - opp) * phase.weight(&config.stability_weight)
}

fn positional(black: Bitboard, white: Bitboard, config: &EvalConfig) -> i32 {
    let weight = |sq: Square| config.positional[sq.row() as usize][sq.col() as usize];
    black.map(weight).sum::<i32>() - white.map(weight).sum::<i32>()
}

/// Black discs minus white discs inside `mask`.
#[inline]
fn balance(black: Bitboard, white: Bitboard, mask: Bitboard) -> i32 {
    (black & mask).popcount() as i32 - (white & mask).popcount() as i32
}

/// Evaluation bundled with the configuration it reads.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
    thresholds: PhaseThresholds,
}

impl Evaluator {
    pub fn new(config: EvalConfig, thresholds: PhaseThresholds) -> Self {
        Self { config, thresholds }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    #[inline]
    pub fn evaluate(&self, pos: &Position, perspective: Color) -> i32 {
        evaluate(pos, perspective, &self.config, &self.thresholds)
    }

    /// Positional weight of a square, used for move ordering.
    #[inline]
    pub fn square_weight(&self, sq: Square) -> i32 {
        self.config.positional[sq.row() as usize][sq.col() as usize]
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
