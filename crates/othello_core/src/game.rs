//! A game in progress: the current position plus the moves that led to it.

use crate::{
    board::{Outcome, Position},
    error::OthelloError,
    movegen::{apply_move, legal_moves},
    types::*,
};

/// Immutable game record. `play` returns the successor state and leaves
/// `self` untouched.
///
/// The history includes passes, so the opening book sees the exact move
/// sequence and can refuse to match once one has happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    position: Position,
    history: Vec<Move>,
}

impl GameState {
    /// Standard start position, empty history.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Start from an arbitrary position with an empty history.
    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            history: Vec::new(),
        }
    }

    /// Replay a move list from the start position. An explicit pass right
    /// after one `play` already recorded is accepted and skipped.
    pub fn from_moves(moves: &[Move]) -> Result<Self, OthelloError> {
        moves.iter().try_fold(Self::new(), |game, &mv| {
            let already_passed = game.history.last() == Some(&Move::Pass)
                && game.position.legal_placements().any();
            if mv.is_pass() && already_passed {
                Ok(game)
            } else {
                game.play(mv)
            }
        })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position)
    }

    pub fn is_over(&self) -> bool {
        self.position.is_terminal()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.position.outcome()
    }

    /// Play `mv` and return the new state.
    ///
    /// When the opponent is left without a placement but the game goes on,
    /// their forced pass is recorded too, so the returned state always has
    /// a side to move that can place a disc (or is over).
    pub fn play(&self, mv: Move) -> Result<Self, OthelloError> {
        if self.is_over() {
            return Err(OthelloError::GameOver);
        }
        let mut next = self.clone();
        next.position = apply_move(&self.position, mv)?;
        next.history.push(mv);

        if !next.position.is_terminal() && next.position.legal_placements().is_empty() {
            next.position = apply_move(&next.position, Move::Pass)?;
            next.history.push(Move::Pass);
        }
        Ok(next)
    }

    /// History as space-separated move text.
    pub fn transcript(&self) -> String {
        self.history
            .iter()
            .map(Move::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
