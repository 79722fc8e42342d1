//! Interactive game between a human and the classical engine.
//!
//! One command per line. The engine answers automatically whenever it is
//! its turn, including several moves in a row when the human must pass.

use std::str::FromStr;
use std::time::Duration;

use classical_engine::MoveSelector;
use othello_core::{Color, GameState, Move, OthelloError, SearchResult};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not your turn")]
    NotYourTurn,

    #[error(transparent)]
    Othello(#[from] OthelloError),

    #[error("failed to encode status: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start over with the human playing this color
    New(Color),
    Play(Move),
    /// Let the engine move for whoever is to move
    Go,
    Hint,
    Moves,
    Board,
    Status,
    /// `None` shows the current budget
    Budget(Option<u64>),
    Quit,
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&name) = parts.first() else {
            return Err(SessionError::Usage("new | play | go | hint | moves | board | status | budget | quit"));
        };

        match name.to_ascii_lowercase().as_str() {
            "new" => match parts.get(1) {
                Some(color) => Ok(Command::New(color.parse()?)),
                None => Ok(Command::New(Color::Black)),
            },
            "play" => match parts.get(1) {
                Some(mv) => Ok(Command::Play(mv.parse()?)),
                None => Err(SessionError::Usage("play <square|pass>")),
            },
            "go" => Ok(Command::Go),
            "hint" => Ok(Command::Hint),
            "moves" => Ok(Command::Moves),
            "board" | "d" => Ok(Command::Board),
            "status" => Ok(Command::Status),
            "budget" => match parts.get(1) {
                Some(ms) => ms
                    .parse()
                    .map(|ms| Command::Budget(Some(ms)))
                    .map_err(|_| SessionError::Usage("budget <milliseconds>")),
                None => Ok(Command::Budget(None)),
            },
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(SessionError::UnknownCommand(name.to_string())),
        }
    }
}

/// JSON snapshot printed by `status`.
#[derive(Debug, Serialize)]
pub struct StatusSnapshot {
    /// 64 cells from a1 to h8 then the side to move
    pub board: String,
    pub side_to_move: Color,
    pub human: Color,
    pub black: u32,
    pub white: u32,
    pub legal_moves: Vec<Move>,
    pub history: Vec<Move>,
    pub game_over: bool,
    pub winner: Option<Color>,
    pub budget_ms: Option<u64>,
}

pub struct Session {
    game: GameState,
    engine: MoveSelector,
    human: Color,
    budget: Option<Duration>,
}

impl Session {
    pub fn new(engine: MoveSelector, budget: Option<Duration>) -> Self {
        Self {
            game: GameState::new(),
            engine,
            human: Color::Black,
            budget,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Run one command, returning the lines to print.
    pub fn execute(&mut self, command: Command) -> Result<Vec<String>, SessionError> {
        let mut out = Vec::new();
        match command {
            Command::New(human) => {
                self.game = GameState::new();
                self.human = human;
                out.push(format!("new game, you play {human}"));
                self.engine_turns(&mut out)?;
            }
            Command::Play(mv) => {
                if self.game.is_over() {
                    return Err(OthelloError::GameOver.into());
                }
                if self.game.side_to_move() != self.human {
                    return Err(SessionError::NotYourTurn);
                }
                self.game = self.game.play(mv)?;
                out.push(format!("{} plays {mv}", self.human));
                self.engine_turns(&mut out)?;
            }
            Command::Go => {
                let result = self.engine_move()?;
                out.push(describe(self.game.side_to_move(), &result));
                self.game = self.game.play(result.best_move)?;
                self.engine_turns(&mut out)?;
            }
            Command::Hint => {
                if self.game.is_over() {
                    return Err(OthelloError::GameOver.into());
                }
                if self.game.side_to_move() != self.human {
                    return Err(SessionError::NotYourTurn);
                }
                let result = self.engine_move()?;
                out.push(format!(
                    "hint {} (score {}, {:?})",
                    result.best_move, result.score, result.source
                ));
            }
            Command::Moves => {
                let moves = self.game.legal_moves();
                if moves.is_empty() {
                    out.push("moves: none".to_string());
                } else {
                    let list: Vec<String> = moves.iter().map(Move::to_string).collect();
                    out.push(format!("moves: {}", list.join(" ")));
                }
            }
            Command::Board => {
                out.extend(self.game.position().to_string().lines().map(str::to_string));
            }
            Command::Status => {
                out.push(serde_json::to_string(&self.status())?);
            }
            Command::Budget(Some(ms)) => {
                self.budget = (ms > 0).then(|| Duration::from_millis(ms));
                out.push(self.describe_budget());
            }
            Command::Budget(None) => out.push(self.describe_budget()),
            Command::Quit => {}
        }

        if self.game.is_over() && command_moves(command) {
            if let Some(outcome) = self.game.outcome() {
                let (black, white) = self.game.position().score();
                out.push(format!("game over: {outcome} ({black}-{white})"));
            }
        }
        Ok(out)
    }

    pub fn status(&self) -> StatusSnapshot {
        let pos = self.game.position();
        let (black, white) = pos.score();
        StatusSnapshot {
            board: pos.to_compact(),
            side_to_move: pos.side_to_move(),
            human: self.human,
            black,
            white,
            legal_moves: self.game.legal_moves(),
            history: self.game.history().to_vec(),
            game_over: self.game.is_over(),
            winner: self.game.outcome().and_then(|o| o.winner()),
            budget_ms: self.budget.map(|b| b.as_millis() as u64),
        }
    }

    fn engine_move(&self) -> Result<SearchResult, SessionError> {
        Ok(self.engine.choose_for_game(&self.game, self.budget)?)
    }

    /// Let the engine play until it is the human's turn or the game ends.
    fn engine_turns(&mut self, out: &mut Vec<String>) -> Result<(), SessionError> {
        while !self.game.is_over() && self.game.side_to_move() != self.human {
            let side = self.game.side_to_move();
            let result = self.engine_move()?;
            debug!(%side, mv = %result.best_move, "engine reply");
            out.push(describe(side, &result));
            self.game = self.game.play(result.best_move)?;
        }
        Ok(())
    }

    fn describe_budget(&self) -> String {
        match self.budget {
            Some(budget) => format!("budget {} ms", budget.as_millis()),
            None => "budget unlimited".to_string(),
        }
    }
}

fn command_moves(command: Command) -> bool {
    matches!(command, Command::New(_) | Command::Play(_) | Command::Go)
}

fn describe(side: Color, result: &SearchResult) -> String {
    format!(
        "{side} plays {} (score {}, depth {}, {} nodes, {} ms, {:?})",
        result.best_move,
        result.score,
        result.depth,
        result.nodes,
        result.elapsed.as_millis(),
        result.source
    )
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
