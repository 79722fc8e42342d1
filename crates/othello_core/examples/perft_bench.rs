//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p othello_core -- [depth] [position]
//!
//! Examples:
//!   # Default: depth 9 from every bundled position
//!   cargo flamegraph --example perft_bench -p othello_core
//!
//!   # Custom depth and position (64 cells + side to move)
//!   cargo flamegraph --example perft_bench -p othello_core -- 8 "...........................OX......XO...........................X"

use othello_core::{perft, Position};
use std::env;
use std::time::Instant;

/// Positions for profiling: the opening and two early midgames.
const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "...........................OX......XO...........................X",
    ),
    (
        "Tiger after 10 plies",
        "........ ........ ..XO.O.. ..XXOO.. ...XOX.. ...OOX.. ....O... ........ X",
    ),
    (
        "Chimney after 8 plies",
        "........ ........ ....X... ..XXXO.. ..OXOO.. ....OO.. ....O... ........ X",
    ),
];

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(9);

    match args.get(2) {
        Some(text) => match Position::parse(text) {
            Ok(pos) => run_single_position(pos, depth),
            Err(e) => eprintln!("{e}"),
        },
        None => run_all_positions(depth),
    }
}

fn nps(nodes: u64, secs: f64) -> f64 {
    if secs > 0.0 {
        nodes as f64 / secs
    } else {
        0.0
    }
}

fn run_single_position(mut pos: Position, depth: u8) {
    println!("{pos}");
    println!("Depth: {depth}");
    println!();

    if depth > 2 {
        let _ = perft(&mut pos, depth.saturating_sub(2));
    }

    let start = Instant::now();
    let nodes = perft(&mut pos, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed.as_secs_f64()));
}

fn run_all_positions(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = std::time::Duration::ZERO;

    for (name, text) in TEST_POSITIONS {
        let mut pos = match Position::parse(text) {
            Ok(pos) => pos,
            Err(e) => {
                eprintln!("{name}: {e}");
                continue;
            }
        };

        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed.as_secs_f64())
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time.as_secs_f64())
    );
}
