//! Self-play match: the classical engine against the random baseline.

use othello_core::{Color, Engine, GameState, OthelloError, Outcome, SearchLimits};
use random_engine::RandomEngine;
use serde::Serialize;
use tracing::{debug, info};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub games: u32,
    /// Seed for the random baseline; game `n` uses `seed + n`
    pub seed: u64,
    /// Per-move budget for both sides, `None` for phase depth only
    pub budget_ms: Option<u64>,
    /// Print a line per finished game
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 10,
            seed: 1,
            budget_ms: None,
            verbose: true,
        }
    }
}

/// Tally from the engine's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Sum of final disc differentials
    pub disc_diff: i32,
}

impl MatchResult {
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Points per game, a draw counting half.
    pub fn score(&self) -> f64 {
        match self.total_games() {
            0 => 0.0,
            n => (f64::from(self.wins) + 0.5 * f64::from(self.draws)) / f64::from(n),
        }
    }
}

/// Play `config.games` games, the engine taking Black in even games and
/// White in odd ones.
pub fn run_match(engine: &mut dyn Engine, config: &MatchConfig) -> Result<MatchResult, OthelloError> {
    let mut result = MatchResult::default();

    for game_num in 0..config.games {
        let mut baseline = RandomEngine::with_seed(config.seed.wrapping_add(u64::from(game_num)));
        let engine_color = if game_num % 2 == 0 { Color::Black } else { Color::White };

        let (game, outcome) = match engine_color {
            Color::Black => play_game(engine, &mut baseline, config)?,
            Color::White => play_game(&mut baseline, engine, config)?,
        };
        let diff = game.position().disc_diff(engine_color);

        match outcome {
            Outcome::Win(color) if color == engine_color => result.wins += 1,
            Outcome::Win(_) => result.losses += 1,
            Outcome::Draw => result.draws += 1,
        }
        result.disc_diff += diff;

        info!(game = game_num + 1, %engine_color, %outcome, diff, "game finished");
        if config.verbose {
            let (black, white) = game.position().score();
            println!(
                "Game {}/{}: engine {} - {} ({}-{}) - Score: {}-{}-{}",
                game_num + 1,
                config.games,
                engine_color,
                outcome,
                black,
                white,
                result.wins,
                result.losses,
                result.draws
            );
        }
    }

    Ok(result)
}

/// Play one game to the end and return it with its outcome.
fn play_game(
    black: &mut dyn Engine,
    white: &mut dyn Engine,
    config: &MatchConfig,
) -> Result<(GameState, Outcome), OthelloError> {
    black.new_game();
    white.new_game();

    let mut game = GameState::new();
    loop {
        if let Some(outcome) = game.outcome() {
            return Ok((game, outcome));
        }
        // Fresh limits per move so each move gets its own clock
        let limits = SearchLimits::from_budget_ms(config.budget_ms);
        let result = match game.side_to_move() {
            Color::Black => black.search(&game, limits)?,
            Color::White => white.search(&game, limits)?,
        };
        debug!(side = %game.side_to_move(), mv = %result.best_move, "move");
        game = game.play(result.best_move)?;
    }
}
