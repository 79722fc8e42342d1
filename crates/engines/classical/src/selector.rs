//! Move selection: the entry point collaborators call.
//!
//! Order of decisions: finished game, forced pass, opening book, then
//! phase-sized iterative deepening under the time budget.

use std::time::{Duration, Instant};

use othello_core::{
    Engine, GameState, Move, MoveSource, OthelloError, Position, SearchLimits, SearchResult,
};
use tracing::{debug, info, warn};

use crate::book::{OpeningBook, BOOK_SCORE};
use crate::config::{ConfigError, EngineConfig};
use crate::eval::Evaluator;
use crate::phase::GamePhase;
use crate::search::iterative_deepening;

#[derive(Debug, Clone)]
pub struct MoveSelector {
    config: EngineConfig,
    evaluator: Evaluator,
    book: OpeningBook,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl MoveSelector {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            evaluator: Evaluator::new(config.eval.clone(), config.phases),
            book: OpeningBook::new(config.book.max_ply),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Choose a move for the side to move. `budget` of `None` means no
    /// deadline; the phase depth alone bounds the search.
    pub fn choose_move(
        &self,
        pos: &Position,
        history: &[Move],
        budget: Option<Duration>,
    ) -> Result<SearchResult, OthelloError> {
        let limits = match budget {
            Some(budget) => SearchLimits::time(budget),
            None => SearchLimits::default(),
        };
        self.choose_with_limits(pos, history, &limits)
    }

    pub fn choose_for_game(
        &self,
        game: &GameState,
        budget: Option<Duration>,
    ) -> Result<SearchResult, OthelloError> {
        self.choose_move(game.position(), game.history(), budget)
    }

    /// As [`MoveSelector::choose_move`], with an optional fixed depth and a
    /// caller-owned time control that can be stopped from outside.
    pub fn choose_with_limits(
        &self,
        pos: &Position,
        history: &[Move],
        limits: &SearchLimits,
    ) -> Result<SearchResult, OthelloError> {
        pos.validate()?;
        if pos.is_terminal() {
            return Err(OthelloError::GameOver);
        }

        let start = Instant::now();
        let side = pos.side_to_move();
        let tc = limits
            .time_control
            .clone()
            .with_check_interval(self.config.search.check_interval);
        tc.start();

        if pos.legal_placements().is_empty() {
            debug!(%side, "no placement, passing");
            return Ok(SearchResult {
                best_move: Move::Pass,
                score: self.evaluator.evaluate(pos, side),
                depth: 0,
                exact: false,
                nodes: 0,
                elapsed: start.elapsed(),
                stopped: false,
                source: MoveSource::Forced,
            });
        }

        if let Some(mv) = self.book_move(pos, history) {
            info!(%side, mv = %mv, "book move");
            return Ok(SearchResult {
                best_move: mv,
                score: BOOK_SCORE,
                depth: 0,
                exact: false,
                nodes: 0,
                elapsed: start.elapsed(),
                stopped: false,
                source: MoveSource::Book,
            });
        }

        let empties = pos.empty_count();
        let phase = GamePhase::of(pos, &self.config.phases);
        let phase_depth = phase.target_depth(empties, &self.config.depths);
        // An explicit depth replaces the phase depth
        let target = limits
            .depth
            .map_or(phase_depth, |d| d.min(empties.min(64) as u8))
            .max(1);
        debug!(%phase, empties, target, "searching");

        let outcome = iterative_deepening(
            pos,
            target,
            &self.evaluator,
            &tc,
            self.config.search.parallel_root,
        )
        .ok_or(OthelloError::TimeBudgetExceededWithNoResult)?;

        let result = SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: outcome.depth,
            exact: outcome.exact,
            nodes: outcome.nodes,
            elapsed: start.elapsed(),
            stopped: outcome.stopped,
            source: MoveSource::Search,
        };
        info!(
            %side,
            mv = %result.best_move,
            score = result.score,
            depth = result.depth,
            exact = result.exact,
            nodes = result.nodes,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "search move"
        );
        Ok(result)
    }

    /// Book reply, if the book is on, the history is consistent with the
    /// board and the reply is legal here.
    fn book_move(&self, pos: &Position, history: &[Move]) -> Option<Move> {
        if !self.config.book.enabled {
            return None;
        }
        let placed = history.iter().filter(|m| !m.is_pass()).count() as u32;
        if placed + pos.empty_count() != 60 {
            return None;
        }
        let (mv, line) = self.book.lookup_line(history)?;
        if !pos.is_legal(mv) {
            warn!(mv = %mv, line = line.name, "book reply is illegal here, searching instead");
            return None;
        }
        debug!(mv = %mv, line = line.name, ply = history.len(), "book hit");
        Some(mv)
    }
}

impl Engine for MoveSelector {
    fn search(&mut self, game: &GameState, limits: SearchLimits) -> Result<SearchResult, OthelloError> {
        self.choose_with_limits(game.position(), game.history(), &limits)
    }

    fn name(&self) -> &str {
        "Classical Othello v1.0"
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
