//! Time control and search limits for Othello engines.
//!
//! Shared by every engine so a per-move budget is honoured the same way
//! whether the engine is the alpha-beta searcher or the random baseline.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Search limits that control when an engine should stop searching.
///
/// `depth: None` lets the engine pick its own depth (the classical engine
/// uses the game phase). When a time budget is present it takes precedence:
/// once it runs out the engine returns the deepest completed result.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies (None = engine decides)
    pub depth: Option<u8>,
    /// Wall-clock budget for this move (None = infinite)
    pub move_time: Option<Duration>,
    /// Shared stop flag and clock
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Depth constraint only.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth: Some(depth),
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth: Some(depth),
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Time constraint only; depth is left to the engine.
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: None,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Budget in milliseconds, `None` or zero meaning unlimited.
    pub fn from_budget_ms(budget_ms: Option<u64>) -> Self {
        match budget_ms {
            Some(ms) if ms > 0 => Self::time(Duration::from_millis(ms)),
            _ => Self::default(),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    /// No depth cap, no deadline.
    fn default() -> Self {
        Self {
            depth: None,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }
}

/// Thread-safe time controller that tracks whether search should stop.
///
/// Cheap to clone; clones share the flag and the clock, so every rayon
/// worker in a root split sees the same deadline. `is_stopped()` is a
/// relaxed atomic load and can be called at every node.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    /// Reference point for `started_at`
    origin: Instant,
    /// Nanoseconds from `origin` to the last `start()`, `u64::MAX` if never started
    started_at: Arc<AtomicU64>,
    time_limit: Option<Duration>,
    /// How often to check the clock (in nodes)
    check_interval: u64,
}

const NOT_STARTED: u64 = u64::MAX;

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            origin: Instant::now(),
            started_at: Arc::new(AtomicU64::new(NOT_STARTED)),
            time_limit,
            check_interval: 1024,
        }
    }

    /// Poll the clock every `interval` nodes instead of the default 1024.
    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval.max(1);
        self
    }

    /// Start (or restart) the clock and clear the stop flag.
    pub fn start(&self) {
        let offset = self.origin.elapsed().as_nanos().min(u128::from(NOT_STARTED - 1)) as u64;
        self.started_at.store(offset, Ordering::SeqCst);
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Read the clock and raise the stop flag if the budget is spent.
    /// Returns whether search should stop.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit {
            if self.is_started() && self.elapsed() >= limit {
                self.stop();
                return true;
            }
        }

        false
    }

    /// True every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % self.check_interval == 0
    }

    fn is_started(&self) -> bool {
        self.started_at.load(Ordering::Relaxed) != NOT_STARTED
    }

    /// Time since `start()`, zero if never started.
    pub fn elapsed(&self) -> Duration {
        let started = self.started_at.load(Ordering::Relaxed);
        if started == NOT_STARTED {
            return Duration::ZERO;
        }
        self.origin
            .elapsed()
            .saturating_sub(Duration::from_nanos(started))
    }

    /// Remaining budget (None if unlimited).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
