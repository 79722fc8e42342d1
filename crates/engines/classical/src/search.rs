//! Negamax search with alpha-beta pruning

use std::time::Instant;

use othello_core::{legal_moves_into, Move, Position, TimeControl};
use rayon::prelude::*;
use tracing::debug;

use crate::eval::Evaluator;
use crate::ordering::order_moves;

/// Larger than any score the search can produce.
pub const INF: i32 = i32::MAX / 2;

/// One node-counting search over a scratch position.
pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
    /// `None` disables the deadline entirely
    deadline: Option<&'a TimeControl>,
    /// Score finished games by the bare disc differential
    exact: bool,
    pub nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a Evaluator, deadline: Option<&'a TimeControl>, exact: bool) -> Self {
        Self {
            evaluator,
            deadline,
            exact,
            nodes: 0,
        }
    }

    /// The stop flag is read at every node so a deadline noticed by one
    /// root worker reaches the others at once; the clock only every
    /// `check_interval` nodes.
    fn out_of_time(&self) -> bool {
        match self.deadline {
            Some(tc) => tc.is_stopped() || (tc.should_check_time(self.nodes) && tc.check_time()),
            None => false,
        }
    }

    fn terminal_value(&self, pos: &Position) -> i32 {
        if self.exact {
            pos.disc_diff(pos.side_to_move())
        } else {
            self.evaluator.evaluate(pos, pos.side_to_move())
        }
    }

    /// Fail-soft negamax. Returns `(score, stopped)`; the score is from the
    /// side to move and meaningless once `stopped` is set.
    pub fn negamax(&mut self, pos: &mut Position, depth: u8, mut alpha: i32, beta: i32) -> (i32, bool) {
        self.nodes += 1;
        if self.out_of_time() {
            return (0, true);
        }

        if pos.legal_placements().is_empty() {
            if pos.mobility(pos.side_to_move().other()).is_empty() {
                return (self.terminal_value(pos), false);
            }
            // Forced pass, no depth consumed
            let undo = pos.make_move(Move::Pass);
            let (score, stopped) = self.negamax(pos, depth, -beta, -alpha);
            pos.unmake_move(undo);
            return (-score, stopped);
        }

        if depth == 0 {
            return (self.evaluator.evaluate(pos, pos.side_to_move()), false);
        }

        let mut moves = Vec::with_capacity(32);
        legal_moves_into(pos, &mut moves);
        order_moves(&mut moves, self.evaluator);

        let mut best = -INF;
        for mv in moves {
            let undo = pos.make_move(mv);
            let (score, stopped) = self.negamax(pos, depth - 1, -beta, -alpha);
            pos.unmake_move(undo);

            if stopped {
                return (best, true);
            }

            let score = -score;
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break; // Beta cutoff
            }
        }

        (best, false)
    }
}

/// Outcome of one fixed-depth root search.
#[derive(Debug, Clone)]
pub struct RootOutcome {
    /// Best root move and its score, `None` if the root has no placement
    pub best: Option<(Move, i32)>,
    pub nodes: u64,
    /// Deadline hit; `best` is incomplete and must be discarded
    pub stopped: bool,
}

/// Search every root placement to `depth`.
///
/// Ties go to the earliest move in ordering. The parallel path searches
/// each child with a full window on its own copy of the position, then
/// merges by (score desc, ordering index asc), which selects the same move
/// and score as the sequential path.
pub fn search_root(
    pos: &Position,
    depth: u8,
    evaluator: &Evaluator,
    deadline: Option<&TimeControl>,
    parallel: bool,
) -> RootOutcome {
    let mut moves = Vec::with_capacity(32);
    legal_moves_into(pos, &mut moves);
    if moves.is_empty() || depth == 0 {
        return RootOutcome {
            best: None,
            nodes: 0,
            stopped: false,
        };
    }
    order_moves(&mut moves, evaluator);

    let exact = u32::from(depth) >= pos.empty_count();
    if parallel && moves.len() > 1 {
        search_root_parallel(pos, &moves, depth, evaluator, deadline, exact)
    } else {
        search_root_sequential(pos, &moves, depth, evaluator, deadline, exact)
    }
}

fn search_root_sequential(
    pos: &Position,
    moves: &[Move],
    depth: u8,
    evaluator: &Evaluator,
    deadline: Option<&TimeControl>,
    exact: bool,
) -> RootOutcome {
    let mut searcher = Searcher::new(evaluator, deadline, exact);
    let mut scratch = *pos;
    let mut best: Option<(Move, i32)> = None;
    let mut alpha = -INF;

    for &mv in moves {
        let undo = scratch.make_move(mv);
        let (score, stopped) = searcher.negamax(&mut scratch, depth - 1, -INF, -alpha);
        scratch.unmake_move(undo);

        if stopped {
            return RootOutcome {
                best,
                nodes: searcher.nodes,
                stopped: true,
            };
        }

        let score = -score;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
    }

    RootOutcome {
        best,
        nodes: searcher.nodes,
        stopped: false,
    }
}

fn search_root_parallel(
    pos: &Position,
    moves: &[Move],
    depth: u8,
    evaluator: &Evaluator,
    deadline: Option<&TimeControl>,
    exact: bool,
) -> RootOutcome {
    let children: Vec<(usize, Move, i32, u64, bool)> = moves
        .par_iter()
        .enumerate()
        .map(|(index, &mv)| {
            let mut scratch = *pos;
            let mut searcher = Searcher::new(evaluator, deadline, exact);
            scratch.make_move(mv);
            let (score, stopped) = searcher.negamax(&mut scratch, depth - 1, -INF, INF);
            (index, mv, -score, searcher.nodes, stopped)
        })
        .collect();

    let nodes = children.iter().map(|c| c.3).sum();
    if children.iter().any(|c| c.4) {
        return RootOutcome {
            best: None,
            nodes,
            stopped: true,
        };
    }

    let best = children
        .iter()
        .min_by_key(|&&(index, _, score, _, _)| (std::cmp::Reverse(score), index))
        .map(|&(_, mv, score, _, _)| (mv, score));

    RootOutcome {
        best,
        nodes,
        stopped: false,
    }
}

/// Deepest completed iteration.
#[derive(Debug, Clone)]
pub struct DeepeningOutcome {
    pub best_move: Move,
    pub score: i32,
    pub depth: u8,
    /// Completed iteration reached the end of the game on every line
    pub exact: bool,
    /// Nodes over all iterations, including an aborted last one
    pub nodes: u64,
    /// An iteration was cut short by the deadline
    pub stopped: bool,
}

/// Iterative deepening from depth 1 to `target`.
///
/// Depth 1 ignores the deadline so there is always a move to return. A
/// later iteration that runs out of time is thrown away and the previous
/// one stands. Returns `None` only when the root has no placement.
pub fn iterative_deepening(
    pos: &Position,
    target: u8,
    evaluator: &Evaluator,
    tc: &TimeControl,
    parallel: bool,
) -> Option<DeepeningOutcome> {
    let start = Instant::now();
    let empties = pos.empty_count();
    let mut completed: Option<DeepeningOutcome> = None;
    let mut nodes = 0u64;
    let mut stopped = false;

    for depth in 1..=target.max(1) {
        let deadline = if depth == 1 { None } else { Some(tc) };
        let outcome = search_root(pos, depth, evaluator, deadline, parallel);
        nodes += outcome.nodes;

        if outcome.stopped {
            stopped = true;
            debug!(depth, nodes, "iteration aborted by deadline");
            break;
        }
        let Some((best_move, score)) = outcome.best else {
            break;
        };

        let exact = u32::from(depth) >= empties;
        debug!(
            depth,
            score,
            best_move = %best_move,
            nodes,
            exact,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "iteration complete"
        );
        completed = Some(DeepeningOutcome {
            best_move,
            score,
            depth,
            exact,
            nodes,
            stopped: false,
        });

        if exact {
            break;
        }
        if depth < target && tc.check_time() {
            stopped = true;
            break;
        }
    }

    completed.map(|c| DeepeningOutcome { nodes, stopped, ..c })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
