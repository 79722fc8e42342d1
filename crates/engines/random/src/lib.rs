//! Random Move Othello Engine
//!
//! Picks uniformly among the legal placements. Useful for:
//! - Baseline comparisons (the classical engine should win nearly every game)
//! - Driving random playouts through the full `Engine` interface

use std::time::Instant;

use othello_core::{
    legal_moves_into, Engine, GameState, Move, MoveSource, OthelloError, SearchLimits, SearchResult,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// An Othello engine that plays random legal moves.
///
/// Seeded engines replay the same moves for the same sequence of positions.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    seed: Option<u64>,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, game: &GameState, _limits: SearchLimits) -> Result<SearchResult, OthelloError> {
        let start = Instant::now();
        let pos = game.position();
        if pos.is_terminal() {
            return Err(OthelloError::GameOver);
        }

        let mut moves = Vec::with_capacity(32);
        legal_moves_into(pos, &mut moves);

        let (best_move, source) = match moves.choose(&mut self.rng) {
            Some(&mv) => (mv, MoveSource::Search),
            None => (Move::Pass, MoveSource::Forced),
        };

        Ok(SearchResult {
            best_move,
            score: 0,
            depth: 0,
            exact: false,
            nodes: 1,
            elapsed: start.elapsed(),
            stopped: false,
            source,
        })
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    /// Reseeded engines start their sequence over.
    fn new_game(&mut self) {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }
}
