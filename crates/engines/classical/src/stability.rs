//! Stable-disc detection.
//!
//! A disc is stable when no sequence of moves can flip it. The fixpoint
//! below is sound but not complete: everything it reports is truly stable,
//! some stable discs are missed.

use othello_core::Bitboard;

/// Squares whose row, file, diagonal or anti-diagonal is fully occupied.
struct FullLines {
    rows: Bitboard,
    files: Bitboard,
    diagonals: Bitboard,
    anti_diagonals: Bitboard,
}

fn full_lines(occupied: Bitboard) -> FullLines {
    let mut lines = FullLines {
        rows: Bitboard::EMPTY,
        files: Bitboard::EMPTY,
        diagonals: Bitboard::EMPTY,
        anti_diagonals: Bitboard::EMPTY,
    };
    for i in 0..8u8 {
        let row = Bitboard::row(i);
        if occupied & row == row {
            lines.rows |= row;
        }
        let file = Bitboard::file(i);
        if occupied & file == file {
            lines.files |= file;
        }
    }
    for mask in Bitboard::DIAGONALS {
        if occupied & mask == mask {
            lines.diagonals |= mask;
        }
    }
    for mask in Bitboard::ANTI_DIAGONALS {
        if occupied & mask == mask {
            lines.anti_diagonals |= mask;
        }
    }
    lines
}

/// Stable discs of `own`.
///
/// On each of the four axes a disc must touch the board edge, touch an
/// already-stable disc of its own colour, or sit on a filled line. Iterate
/// until nothing new qualifies.
pub fn stable_discs(own: Bitboard, opp: Bitboard) -> Bitboard {
    if own.is_empty() {
        return Bitboard::EMPTY;
    }
    let lines = full_lines(own | opp);
    let horizontal_wall = Bitboard::FILE_A | Bitboard::FILE_H;
    let vertical_wall = Bitboard::ROW_1 | Bitboard::ROW_8;

    let mut stable = Bitboard::EMPTY;
    loop {
        let horizontal = horizontal_wall | lines.rows | stable.east() | stable.west();
        let vertical = vertical_wall | lines.files | stable.north() | stable.south();
        let diagonal =
            Bitboard::EDGES | lines.diagonals | stable.north_east() | stable.south_west();
        let anti_diagonal =
            Bitboard::EDGES | lines.anti_diagonals | stable.north_west() | stable.south_east();

        let next = stable | (own & horizontal & vertical & diagonal & anti_diagonal);
        if next == stable {
            return stable;
        }
        stable = next;
    }
}
