//! Bitboard representation and operations for Othello.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the board.
//! Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8. "North" means increasing row.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::types::Square;

/// A set of squares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

/// The eight rays a disc can flip along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];
}

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    pub const FILE_A: Bitboard = Bitboard(0x0101010101010101);
    pub const FILE_H: Bitboard = Bitboard(0x8080808080808080);
    pub const ROW_1: Bitboard = Bitboard(0x00000000000000FF);
    pub const ROW_8: Bitboard = Bitboard(0xFF00000000000000);

    pub const NOT_FILE_A: Bitboard = Bitboard(!0x0101010101010101);
    pub const NOT_FILE_H: Bitboard = Bitboard(!0x8080808080808080);

    /// Outer ring of the board.
    pub const EDGES: Bitboard = Bitboard(0xFF818181818181FF);
    /// a1, h1, a8, h8.
    pub const CORNERS: Bitboard = Bitboard(0x8100000000000081);
    /// Diagonal neighbours of the corners: b2, g2, b7, g7.
    pub const X_SQUARES: Bitboard = Bitboard(0x0042000000004200);
    /// Edge neighbours of the corners: b1, g1, a2, h2, a7, h7, b8, g8.
    pub const C_SQUARES: Bitboard = Bitboard(0x4281000000008142);
    /// d4, e4, d5, e5. Occupied in every reachable position.
    pub const CENTER: Bitboard = Bitboard(0x0000001818000000);

    /// Lines of constant `row - col`, indexed by `row - col + 7`.
    pub const DIAGONALS: [Bitboard; 15] = line_masks(false);
    /// Lines of constant `row + col`, indexed by `row + col`.
    pub const ANTI_DIAGONALS: [Bitboard; 15] = line_masks(true);

    #[inline(always)]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(sq.bit())
    }

    #[inline(always)]
    pub const fn row(row: u8) -> Self {
        Bitboard(0xFFu64 << (row * 8))
    }

    #[inline(always)]
    pub const fn file(col: u8) -> Self {
        Bitboard(0x0101010101010101u64 << col)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[inline(always)]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & sq.bit()) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, sq: Square) {
        self.0 |= sq.bit();
    }

    #[inline(always)]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !sq.bit();
    }

    /// Count the number of set bits (population count).
    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Least significant square, or None if empty.
    #[inline(always)]
    pub fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as u8)
        }
    }

    /// Get and remove the least significant square.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    #[inline(always)]
    pub const fn north(self) -> Bitboard {
        Bitboard(self.0 << 8)
    }

    #[inline(always)]
    pub const fn south(self) -> Bitboard {
        Bitboard(self.0 >> 8)
    }

    /// Shift toward file H, masking out wrapping.
    #[inline(always)]
    pub const fn east(self) -> Bitboard {
        Bitboard((self.0 << 1) & Self::NOT_FILE_A.0)
    }

    /// Shift toward file A, masking out wrapping.
    #[inline(always)]
    pub const fn west(self) -> Bitboard {
        Bitboard((self.0 >> 1) & Self::NOT_FILE_H.0)
    }

    #[inline(always)]
    pub const fn north_east(self) -> Bitboard {
        Bitboard((self.0 << 9) & Self::NOT_FILE_A.0)
    }

    #[inline(always)]
    pub const fn north_west(self) -> Bitboard {
        Bitboard((self.0 << 7) & Self::NOT_FILE_H.0)
    }

    #[inline(always)]
    pub const fn south_east(self) -> Bitboard {
        Bitboard((self.0 >> 7) & Self::NOT_FILE_A.0)
    }

    #[inline(always)]
    pub const fn south_west(self) -> Bitboard {
        Bitboard((self.0 >> 9) & Self::NOT_FILE_H.0)
    }

    #[inline(always)]
    pub const fn shift(self, dir: Direction) -> Bitboard {
        match dir {
            Direction::North => self.north(),
            Direction::South => self.south(),
            Direction::East => self.east(),
            Direction::West => self.west(),
            Direction::NorthEast => self.north_east(),
            Direction::NorthWest => self.north_west(),
            Direction::SouthEast => self.south_east(),
            Direction::SouthWest => self.south_west(),
        }
    }
}

const fn line_masks(anti: bool) -> [Bitboard; 15] {
    let mut masks = [Bitboard(0); 15];
    let mut idx = 0u8;
    while idx < 64 {
        let row = (idx / 8) as usize;
        let col = (idx % 8) as usize;
        let line = if anti { row + col } else { row + 7 - col };
        masks[line] = Bitboard(masks[line].0 | (1u64 << idx));
        idx += 1;
    }
    masks
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

/// Iterator over set squares, lowest index first.
impl Iterator for Bitboard {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_lsb()
    }
}

#[cfg(test)]
#[path = "bitboard_tests.rs"]
mod bitboard_tests;
