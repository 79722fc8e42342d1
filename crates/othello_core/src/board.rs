use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::error::OthelloError;
use crate::movegen::{flips, mobility};
use crate::types::*;

/// An Othello position: disc bitboards plus the side to move.
///
/// `Position` is a small `Copy` value. Outside of search it is treated as
/// immutable (`apply_move` returns a new one); the `make_move` /
/// `unmake_move` pair is the undo-log a search frame uses on its own copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    black: Bitboard,
    white: Bitboard,
    side_to_move: Color,
}

/// Everything needed to take back one `make_move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    /// Placed square, `None` for a pass
    pub square: Option<Square>,
    /// Discs turned over by the placement
    pub flipped: Bitboard,
    pub side_to_move: Color,
}

impl Position {
    /// Standard opening: d4/e5 white, d5/e4 black, Black to move.
    pub fn startpos() -> Self {
        Position {
            black: Bitboard((1 << 28) | (1 << 35)),
            white: Bitboard((1 << 27) | (1 << 36)),
            side_to_move: Color::Black,
        }
    }

    /// Build from raw bitboards, rejecting structurally impossible boards.
    pub fn from_bitboards(black: Bitboard, white: Bitboard, side_to_move: Color) -> Result<Self, OthelloError> {
        let pos = Position {
            black,
            white,
            side_to_move,
        };
        pos.validate()?;
        Ok(pos)
    }

    /// Build from a row-major grid; `grid[row][col]`.
    pub fn from_grid(grid: &[[Cell; 8]; 8], side_to_move: Color) -> Result<Self, OthelloError> {
        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;
        for sq in Square::all() {
            match grid[sq.row() as usize][sq.col() as usize] {
                Cell::Black => black.set(sq),
                Cell::White => white.set(sq),
                Cell::Empty => {}
            }
        }
        Self::from_bitboards(black, white, side_to_move)
    }

    /// Parse the compact text form: 64 cells (`X`/`B`/`*` black, `O`/`W`
    /// white, `-`/`.` empty) in index order, then the side to move.
    /// Whitespace is ignored, so boards can be written one row per line.
    pub fn parse(text: &str) -> Result<Self, OthelloError> {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 65 {
            return Err(OthelloError::InvalidPosition(format!(
                "expected 64 cells and a side to move, got {} characters",
                chars.len()
            )));
        }

        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;
        for (sq, &ch) in Square::all().zip(chars.iter()) {
            match ch {
                'X' | 'x' | 'B' | 'b' | '*' => black.set(sq),
                'O' | 'o' | 'W' | 'w' => white.set(sq),
                '-' | '.' => {}
                _ => {
                    return Err(OthelloError::InvalidPosition(format!(
                        "unexpected cell character `{ch}` at {sq}"
                    )))
                }
            }
        }

        let side_to_move = match chars[64] {
            'X' | 'x' | 'B' | 'b' | '*' => Color::Black,
            'O' | 'o' | 'W' | 'w' => Color::White,
            ch => {
                return Err(OthelloError::InvalidPosition(format!(
                    "unexpected side-to-move character `{ch}`"
                )))
            }
        };

        Self::from_bitboards(black, white, side_to_move)
    }

    /// Inverse of [`Position::parse`]: 64 cells followed by the side to move.
    pub fn to_compact(&self) -> String {
        let mut out: String = Square::all().map(|sq| self.cell(sq).symbol()).collect();
        out.push(self.side_to_move.cell().symbol());
        out
    }

    /// Reject overlapping discs and an unoccupied centre. Every reachable
    /// position has the four centre squares filled.
    pub fn validate(&self) -> Result<(), OthelloError> {
        if (self.black & self.white).any() {
            return Err(OthelloError::InvalidPosition(
                "a square holds both a black and a white disc".to_string(),
            ));
        }
        let occupied = self.occupied();
        if (occupied & Bitboard::CENTER) != Bitboard::CENTER {
            return Err(OthelloError::InvalidPosition(
                "the four centre squares must be occupied".to_string(),
            ));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn discs(&self, color: Color) -> Bitboard {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    #[inline(always)]
    pub fn empties(&self) -> Bitboard {
        !self.occupied()
    }

    #[inline(always)]
    pub fn empty_count(&self) -> u32 {
        64 - self.occupied().popcount()
    }

    pub fn cell(&self, sq: Square) -> Cell {
        if self.black.contains(sq) {
            Cell::Black
        } else if self.white.contains(sq) {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// `(black_count, white_count)`
    pub fn score(&self) -> (u32, u32) {
        (self.black.popcount(), self.white.popcount())
    }

    /// Disc differential from `color`'s point of view.
    pub fn disc_diff(&self, color: Color) -> i32 {
        self.discs(color).popcount() as i32 - self.discs(color.other()).popcount() as i32
    }

    /// Squares where `color` could legally place a disc, regardless of whose
    /// turn it is.
    #[inline(always)]
    pub fn mobility(&self, color: Color) -> Bitboard {
        mobility(self.discs(color), self.discs(color.other()))
    }

    /// Legal placements for the side to move.
    #[inline(always)]
    pub fn legal_placements(&self) -> Bitboard {
        self.mobility(self.side_to_move)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        let legal = self.legal_placements();
        match mv {
            Move::Place(sq) => legal.contains(sq),
            Move::Pass => legal.is_empty(),
        }
    }

    /// Neither side can place a disc (this includes a full board).
    pub fn is_terminal(&self) -> bool {
        self.mobility(Color::Black).is_empty() && self.mobility(Color::White).is_empty()
    }

    /// Final result, once the position is terminal.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        let (black, white) = self.score();
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Win(Color::Black),
            std::cmp::Ordering::Less => Outcome::Win(Color::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }

    /// Play `mv` in place. The caller guarantees legality; search only feeds
    /// moves taken from `legal_placements`.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let mover = self.side_to_move;
        let undo = match mv {
            Move::Place(sq) => {
                let (own, opp) = self.sides_mut(mover);
                let flipped = flips(*own, *opp, sq);
                debug_assert!(flipped.any(), "make_move called with illegal placement {sq}");
                *own |= flipped | Bitboard::from_square(sq);
                *opp ^= flipped;
                Undo {
                    square: Some(sq),
                    flipped,
                    side_to_move: mover,
                }
            }
            Move::Pass => Undo {
                square: None,
                flipped: Bitboard::EMPTY,
                side_to_move: mover,
            },
        };
        self.side_to_move = mover.other();
        undo
    }

    /// Take back the move recorded in `undo`; restores the position exactly.
    pub fn unmake_move(&mut self, undo: Undo) {
        let mover = undo.side_to_move;
        if let Some(sq) = undo.square {
            let (own, opp) = self.sides_mut(mover);
            *own ^= undo.flipped | Bitboard::from_square(sq);
            *opp |= undo.flipped;
        }
        self.side_to_move = mover;
    }

    fn sides_mut(&mut self, color: Color) -> (&mut Bitboard, &mut Bitboard) {
        match color {
            Color::Black => (&mut self.black, &mut self.white),
            Color::White => (&mut self.white, &mut self.black),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Position {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::parse(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..8u8 {
            write!(f, "{}", row + 1)?;
            for col in 0..8u8 {
                let sq = Square::new(row, col).ok_or(fmt::Error)?;
                write!(f, " {}", self.cell(sq).symbol())?;
            }
            writeln!(f)?;
        }
        let (black, white) = self.score();
        write!(f, "X: {black}  O: {white}  {} to move", self.side_to_move)
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win(Color),
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Win(c) => Some(c),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(c) => write!(f, "{c} wins"),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
