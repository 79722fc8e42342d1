pub mod bitboard;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use bitboard::*;
pub use board::*;
pub use error::OthelloError;
pub use game::GameState;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use time_control::*;
pub use types::*;

use std::time::Duration;

use serde::Serialize;

// =============================================================================
// Engine trait, implemented by every Othello engine (classical, random)
// =============================================================================

/// Where a chosen move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    /// Opening book reply
    Book,
    /// Alpha-beta search
    Search,
    /// Only one option existed (a pass)
    Forced,
}

/// Result of a search operation
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// The move to play. `Move::Pass` when the side to move has no placement.
    pub best_move: Move,
    /// Score from the mover's perspective. Exact disc differential when
    /// `exact` is set, heuristic units otherwise.
    pub score: i32,
    /// Deepest completed iteration (0 for book and forced moves)
    pub depth: u8,
    /// Search reached every terminal position below the root
    pub exact: bool,
    /// Number of nodes searched
    pub nodes: u64,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Whether the time budget cut an iteration short
    pub stopped: bool,
    pub source: MoveSource,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Trait that all Othello engines implement.
///
/// The CLI and the self-play driver talk to engines only through this, so
/// the alpha-beta engine and the random baseline are interchangeable.
pub trait Engine: Send {
    /// Pick a move for the side to move in `game`.
    ///
    /// Fails with `GameOver` on a finished game.
    fn search(&mut self, game: &GameState, limits: SearchLimits) -> Result<SearchResult, OthelloError>;

    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "othello-lab"
    }

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
