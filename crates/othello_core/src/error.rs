//! Error kinds shared by the board model and every engine.

use crate::types::{Color, Move};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OthelloError {
    /// The move is not legal for the position (including a pass while
    /// placements exist).
    #[error("illegal move {mv} for {side}")]
    InvalidMove { mv: Move, side: Color },

    /// Structurally impossible board state.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// A move was requested from a finished game.
    #[error("game is over")]
    GameOver,

    /// Depth 1 could not finish inside the time budget. The selector never
    /// deadlines its first iteration, so this is not expected in practice.
    #[error("no search iteration completed within the time budget")]
    TimeBudgetExceededWithNoResult,

    /// Malformed move, square or color text.
    #[error("parse error: {0}")]
    Parse(String),
}
