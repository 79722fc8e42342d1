//! Othello command line driver
//!
//! Plays a game against the classical engine over a line protocol on
//! stdin/stdout, or runs a self-play match against the random baseline.
//! Logs go to stderr, filtered by `RUST_LOG`.

mod selfplay;
mod session;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use classical_engine::{EngineConfig, MoveSelector};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::selfplay::{run_match, MatchConfig};
use crate::session::{Command, Session};

fn print_usage() {
    println!("Othello engine");
    println!();
    println!("Usage:");
    println!("  othello [--config FILE] [--budget-ms N]");
    println!("  othello selfplay [--games N] [--seed S] [--config FILE] [--budget-ms N]");
    println!();
    println!("Session commands:");
    println!("  new [black|white]    start a game, you play the given color");
    println!("  play <square|pass>   make your move, the engine answers");
    println!("  go                   let the engine move for the side to move");
    println!("  hint                 engine suggestion for your move");
    println!("  moves | board        legal moves / the board");
    println!("  status               JSON snapshot of the game");
    println!("  budget [ms]          show or set the engine budget (0 = unlimited)");
    println!("  quit");
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    budget_ms: Option<u64>,
    selfplay: bool,
    games: Option<u32>,
    seed: Option<u64>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        let value = |i: usize| {
            args.get(i + 1)
                .ok_or_else(|| format!("{} needs a value", args[i]))
        };
        match args[i].as_str() {
            "selfplay" => options.selfplay = true,
            "--config" | "-c" => {
                options.config = Some(PathBuf::from(value(i)?));
                i += 1;
            }
            "--budget-ms" | "-b" => {
                let ms = value(i)?;
                options.budget_ms = Some(ms.parse().map_err(|_| format!("bad budget `{ms}`"))?);
                i += 1;
            }
            "--games" | "-g" => {
                let n = value(i)?;
                options.games = Some(n.parse().map_err(|_| format!("bad game count `{n}`"))?);
                i += 1;
            }
            "--seed" | "-s" => {
                let s = value(i)?;
                options.seed = Some(s.parse().map_err(|_| format!("bad seed `{s}`"))?);
                i += 1;
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
        i += 1;
    }

    Ok(options)
}

fn load_engine(options: &Options) -> Result<MoveSelector, String> {
    let config = match &options.config {
        Some(path) => EngineConfig::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => EngineConfig::default(),
    };
    MoveSelector::new(config).map_err(|e| e.to_string())
}

fn run_session(engine: MoveSelector, budget_ms: Option<u64>) {
    let budget = budget_ms.filter(|&ms| ms > 0).map(Duration::from_millis);
    let mut session = Session::new(engine, budget);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = line
            .parse::<Command>()
            .and_then(|command| match command {
                Command::Quit => Ok(None),
                command => session.execute(command).map(Some),
            });

        match reply {
            Ok(Some(lines)) => {
                for l in lines {
                    writeln!(stdout, "{l}").ok();
                }
            }
            Ok(None) => break,
            Err(e) => {
                writeln!(stdout, "error: {e}").ok();
            }
        }
        stdout.flush().ok();
    }
}

fn run_selfplay(mut engine: MoveSelector, options: &Options) {
    let config = MatchConfig {
        games: options.games.unwrap_or(10),
        seed: options.seed.unwrap_or(1),
        budget_ms: options.budget_ms,
        verbose: true,
    };

    println!("=== Self-play: classical vs random ===");
    println!("Games: {}, Seed: {}", config.games, config.seed);
    println!();

    match run_match(&mut engine, &config) {
        Ok(result) => {
            info!(?result, "match finished");
            println!();
            println!("=== Final Result ===");
            println!(
                "classical: {} wins, {} losses, {} draws",
                result.wins, result.losses, result.draws
            );
            println!("Score: {:.1}%", result.score() * 100.0);
            println!("Disc differential: {:+}", result.disc_diff);
        }
        Err(e) => {
            error!(%e, "match aborted");
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(2);
        }
    };

    let engine = match load_engine(&options) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if options.selfplay {
        run_selfplay(engine, &options);
    } else {
        run_session(engine, options.budget_ms);
    }
}
