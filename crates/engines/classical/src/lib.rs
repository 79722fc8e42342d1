//! Classical Othello Engine
//!
//! Alpha-beta search over a hand-tuned evaluation, with an opening book
//! for the first few plies and exact solving near the end of the game.
//! [`MoveSelector`] is the entry point; the other modules are public so
//! the pieces can be tested and benchmarked on their own.

pub mod book;
pub mod config;
pub mod eval;
pub mod ordering;
pub mod phase;
pub mod search;
pub mod selector;
pub mod stability;

pub use book::{OpeningBook, OpeningLine, Symmetry, BOOK_SCORE, OPENING_LINES};
pub use config::{ConfigError, EngineConfig};
pub use eval::{evaluate, terminal_score, Evaluator, WIN_SCORE};
pub use phase::GamePhase;
pub use search::{iterative_deepening, search_root, DeepeningOutcome, RootOutcome};
pub use selector::MoveSelector;
pub use stability::stable_discs;
