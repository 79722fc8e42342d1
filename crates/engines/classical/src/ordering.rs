//! Move ordering for alpha-beta. Affects speed only, never the result.

use std::cmp::Reverse;

use othello_core::{Bitboard, Move};

use crate::eval::Evaluator;

const CORNER_PRIORITY: i32 = 10_000;

/// Ordering key, higher searched first: corners, then the positional table.
#[inline]
pub fn move_priority(mv: Move, evaluator: &Evaluator) -> i32 {
    match mv {
        Move::Place(sq) if Bitboard::CORNERS.contains(sq) => CORNER_PRIORITY + evaluator.square_weight(sq),
        Move::Place(sq) => evaluator.square_weight(sq),
        Move::Pass => i32::MIN,
    }
}

/// Sort in place. The sort is stable, so equal keys keep ascending square
/// order from move generation.
pub fn order_moves(moves: &mut [Move], evaluator: &Evaluator) {
    moves.sort_by_key(|&mv| Reverse(move_priority(mv, evaluator)));
}
