//! Opening book: a fixed table of named lines.
//!
//! Lines are written in one canonical orientation where Black opens `f5`.
//! A game that opened on another square is mapped onto that orientation
//! with one of the four board symmetries that fix the start position, and
//! the reply is mapped back.

use othello_core::{Move, Square};

/// Board symmetries preserving the start position. Each is its own inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    Identity,
    /// `(r, c) -> (c, r)`
    Transpose,
    /// `(r, c) -> (7 - c, 7 - r)`
    AntiTranspose,
    /// `(r, c) -> (7 - r, 7 - c)`
    Rotate180,
}

impl Symmetry {
    pub const ALL: [Symmetry; 4] = [
        Symmetry::Identity,
        Symmetry::Transpose,
        Symmetry::AntiTranspose,
        Symmetry::Rotate180,
    ];

    pub fn apply(self, sq: Square) -> Square {
        let (r, c) = (sq.row(), sq.col());
        let (r, c) = match self {
            Symmetry::Identity => (r, c),
            Symmetry::Transpose => (c, r),
            Symmetry::AntiTranspose => (7 - c, 7 - r),
            Symmetry::Rotate180 => (7 - r, 7 - c),
        };
        Square::new(r, c).unwrap_or(sq)
    }

    pub fn apply_move(self, mv: Move) -> Move {
        match mv {
            Move::Place(sq) => Move::Place(self.apply(sq)),
            Move::Pass => Move::Pass,
        }
    }

    /// The symmetry taking `first` onto the canonical opening square.
    pub fn normalizing(first: Square) -> Option<Symmetry> {
        Self::ALL.into_iter().find(|s| s.apply(first) == CANONICAL_FIRST)
    }
}

const fn sq(name: &str) -> Square {
    let b = name.as_bytes();
    match Square::new(b[1] - b'1', b[0] - b'a') {
        Some(s) => s,
        None => panic!("bad square in opening table"),
    }
}

const CANONICAL_FIRST: Square = sq("f5");

/// Score reported with a book reply. Book moves are trusted outright, so
/// this sits above any heuristic midgame value but below `WIN_SCORE`.
pub const BOOK_SCORE: i32 = 999;

/// A named opening line in canonical orientation.
#[derive(Debug)]
pub struct OpeningLine {
    pub name: &'static str,
    pub moves: &'static [Square],
}

macro_rules! opening {
    ($name:literal: $($sq:literal)+) => {
        OpeningLine {
            name: $name,
            moves: &[$(sq($sq)),+],
        }
    };
}

/// Searched in this order; the first line extending the history wins.
pub static OPENING_LINES: [OpeningLine; 9] = [
    opening!("Tiger": "f5" "d6" "c3" "d3" "c4" "f4" "f6" "f3" "e6" "e7"),
    opening!("Cat": "f5" "d6" "c3" "d3" "c4" "f4" "c5" "b3" "c2"),
    opening!("Aubrey": "f5" "d6" "c3" "d3" "c4" "f4" "f6" "g5" "e3"),
    opening!("Rose": "f5" "d6" "c5" "f4" "e3" "f6" "g5" "e6" "e7"),
    opening!("Sheep": "f5" "d6" "c5" "f4" "d3"),
    opening!("Buffalo": "f5" "f6" "e6" "f4" "c3" "d6" "f3" "c4" "c5"),
    opening!("Heath": "f5" "f6" "e6" "f4" "g5" "e7" "f7" "h5"),
    opening!("Chimney": "f5" "f6" "e6" "f4" "e3" "c5" "c4" "e7"),
    opening!("Parallel": "f5" "f4" "e3" "f6" "d3"),
];

/// Exact-prefix lookup over [`OPENING_LINES`].
#[derive(Debug, Clone)]
pub struct OpeningBook {
    lines: &'static [OpeningLine],
    max_ply: usize,
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::new(10)
    }
}

impl OpeningBook {
    pub fn new(max_ply: usize) -> Self {
        Self {
            lines: &OPENING_LINES,
            max_ply,
        }
    }

    pub fn lines(&self) -> &'static [OpeningLine] {
        self.lines
    }

    /// Reply for a game that has followed `history`, in the game's own
    /// orientation.
    pub fn lookup(&self, history: &[Move]) -> Option<Move> {
        self.lookup_line(history).map(|(mv, _)| mv)
    }

    /// Like [`OpeningBook::lookup`], also naming the line that matched.
    pub fn lookup_line(&self, history: &[Move]) -> Option<(Move, &'static OpeningLine)> {
        if history.len() >= self.max_ply {
            return None;
        }

        let mut placed = Vec::with_capacity(history.len());
        for mv in history {
            match mv {
                Move::Place(sq) => placed.push(*sq),
                Move::Pass => return None,
            }
        }

        let symmetry = match placed.first() {
            Some(&first) => Symmetry::normalizing(first)?,
            None => Symmetry::Identity,
        };
        let canonical: Vec<Square> = placed.iter().map(|&s| symmetry.apply(s)).collect();

        self.lines
            .iter()
            .find(|line| line.moves.len() > canonical.len() && line.moves.starts_with(&canonical))
            .map(|line| (Move::Place(symmetry.apply(line.moves[canonical.len()])), line))
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
