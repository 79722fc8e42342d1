use crate::{
    bitboard::{Bitboard, Direction},
    board::Position,
    error::OthelloError,
    types::*,
};

/// Squares where the owner of `own` could place a disc against `opp`.
///
/// Kogge-Stone style fill: from every own disc, slide across contiguous
/// opponent discs in each direction and keep the empty square reached.
/// Six opponent discs is the longest run that fits between two squares.
#[inline]
pub fn mobility(own: Bitboard, opp: Bitboard) -> Bitboard {
    let empty = !(own | opp);
    let mut moves = Bitboard::EMPTY;
    for dir in Direction::ALL {
        let mut run = own.shift(dir) & opp;
        for _ in 0..5 {
            run |= run.shift(dir) & opp;
        }
        moves |= run.shift(dir) & empty;
    }
    moves
}

/// Discs flipped by placing on `sq`. Empty when the placement is illegal.
#[inline]
pub fn flips(own: Bitboard, opp: Bitboard, sq: Square) -> Bitboard {
    let origin = Bitboard::from_square(sq);
    if ((own | opp) & origin).any() {
        return Bitboard::EMPTY;
    }

    let mut flipped = Bitboard::EMPTY;
    for dir in Direction::ALL {
        let mut run = Bitboard::EMPTY;
        let mut cur = origin.shift(dir);
        while (cur & opp).any() {
            run |= cur;
            cur = cur.shift(dir);
        }
        if (cur & own).any() {
            flipped |= run;
        }
    }
    flipped
}

/// Legal placements for the side to move, in ascending square order.
/// Never contains `Pass`; an empty list on a live position means the mover
/// must pass.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    legal_moves_into(pos, &mut out);
    out
}

/// Same as [`legal_moves`], reusing `out` across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    out.extend(pos.legal_placements().map(Move::Place));
}

/// Play `mv` on a copy of `pos`. A pass is only legal when the mover has no
/// placement.
pub fn apply_move(pos: &Position, mv: Move) -> Result<Position, OthelloError> {
    if !pos.is_legal(mv) {
        return Err(OthelloError::InvalidMove {
            mv,
            side: pos.side_to_move(),
        });
    }
    let mut next = *pos;
    next.make_move(mv);
    Ok(next)
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
