use super::*;
use crate::config::{MoveQuality, PhaseWeights};
use othello_core::{apply_move, legal_moves, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn zeroed() -> EvalConfig {
    EvalConfig {
        corner_weight: 0,
        x_square_penalty: 0,
        c_square_penalty: 0,
        mobility_weight: PhaseWeights::new(0, 0, 0),
        move_quality: MoveQuality {
            corner: 0,
            edge: 0,
            x_square: 0,
            other: 0,
        },
        move_quality_percent: PhaseWeights::new(0, 0, 0),
        stability_weight: PhaseWeights::new(0, 0, 0),
        disc_weight: PhaseWeights::new(0, 0, 0),
        positional: [[0; 8]; 8],
    }
}

fn only(tweak: impl FnOnce(&mut EvalConfig)) -> EvalConfig {
    let mut config = zeroed();
    tweak(&mut config);
    config
}

fn eval_black(text: &str, config: &EvalConfig) -> i32 {
    let pos: Position = text.parse().unwrap();
    evaluate(&pos, Color::Black, config, &PhaseThresholds::default())
}

/// Start position with `row0` as the first row.
fn with_row1(row0: &str) -> String {
    format!(
        "{row0}
        ........
        ........
        ...OX...
        ...XO...
        ........
        ........
        ........
        X"
    )
}

#[test]
fn test_antisymmetric_on_random_positions() {
    let config = EvalConfig::default();
    let thresholds = PhaseThresholds::default();
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pos = Position::startpos();
        while !pos.is_terminal() {
            let black = evaluate(&pos, Color::Black, &config, &thresholds);
            let white = evaluate(&pos, Color::White, &config, &thresholds);
            assert_eq!(black, -white, "seed {seed}\n{pos}");
            assert!(black.abs() < WIN_SCORE / 2, "heuristic leaked into win range");

            let mv = legal_moves(&pos).choose(&mut rng).copied().unwrap_or(Move::Pass);
            pos = apply_move(&pos, mv).unwrap();
        }
        let black = evaluate(&pos, Color::Black, &config, &thresholds);
        assert_eq!(black, -evaluate(&pos, Color::White, &config, &thresholds));
        assert!(black == 0 || black.abs() > WIN_SCORE);
    }
}

#[test]
fn test_startpos_is_balanced() {
    let pos = Position::startpos();
    let config = EvalConfig::default();
    // Symmetric position, symmetric terms
    assert_eq!(
        evaluate(&pos, Color::Black, &config, &PhaseThresholds::default()),
        0
    );
}

#[test]
fn test_corner_term() {
    let config = only(|c| c.corner_weight = 1000);
    assert_eq!(eval_black(&with_row1("X......."), &config), 1000);
    assert_eq!(eval_black(&with_row1("O......O"), &config), -2000);
}

#[test]
fn test_x_square_only_next_to_empty_corner() {
    let config = only(|c| c.x_square_penalty = 500);
    let own_x = "
        ........
        .X......
        ........
        ...OX...
        ...XO...
        ........
        ........
        ........
        X";
    assert_eq!(eval_black(own_x, &config), -500);

    let corner_taken = "
        O.......
        .X......
        ........
        ...OX...
        ...XO...
        ........
        ........
        ........
        X";
    assert_eq!(eval_black(corner_taken, &config), 0);

    let their_x = "
        ........
        ........
        ........
        ...OX...
        ...XO...
        ........
        ......O.
        ........
        X";
    assert_eq!(eval_black(their_x, &config), 500);
}

#[test]
fn test_c_square_term() {
    let config = only(|c| c.c_square_penalty = 200);
    let two_c = "
        .X......
        X.......
        ........
        ...OX...
        ...XO...
        ........
        ........
        ........
        X";
    assert_eq!(eval_black(two_c, &config), -400);
    // b1 next to a filled a1 costs nothing
    assert_eq!(eval_black(&with_row1("OX......"), &config), 0);
}

#[test]
fn test_disc_parity_by_phase() {
    // After f5: 4 black, 1 white, opening phase prefers fewer discs.
    let config = only(|c| c.disc_weight = PhaseWeights::new(-1, 1, 20));
    let mut pos = Position::startpos();
    pos.make_move("f5".parse().unwrap());
    let thresholds = PhaseThresholds::default();
    assert_eq!(evaluate(&pos, Color::Black, &config, &thresholds), -3);
    assert_eq!(evaluate(&pos, Color::White, &config, &thresholds), 3);
}

#[test]
fn test_mobility_term() {
    // Only the move-count difference contributes.
    let config = only(|c| c.mobility_weight = PhaseWeights::new(50, 25, 10));
    let mut pos = Position::startpos();
    pos.make_move("f5".parse().unwrap());
    let black = pos.mobility(Color::Black).popcount() as i32;
    let white = pos.mobility(Color::White).popcount() as i32;
    assert_eq!(
        evaluate(&pos, Color::Black, &config, &PhaseThresholds::default()),
        (black - white) * 50
    );
}

#[test]
fn test_move_quality_prefers_corner_moves() {
    // Black can take a1 by flipping b1.
    let config = only(|c| {
        c.move_quality = MoveQuality::default();
        c.move_quality_percent = PhaseWeights::new(100, 100, 100);
    });
    let pos: Position = with_row1(".OX.....").parse().unwrap();
    assert!(pos.mobility(Color::Black).contains("a1".parse().unwrap()));
    assert!(evaluate(&pos, Color::Black, &config, &PhaseThresholds::default()) > 0);
}

#[test]
fn test_positional_table() {
    let config = only(|c| c.positional = crate::config::DEFAULT_POSITIONAL);
    // a1 corner is worth 100, the centre discs cancel out.
    assert_eq!(eval_black(&with_row1("X......."), &config), 100);
    assert_eq!(eval_black(&with_row1(".O......"), &config), 20);
}

#[test]
fn test_stability_term() {
    let config = only(|c| c.stability_weight = PhaseWeights::new(50, 80, 120));
    // Three stable discs in the opening phase
    assert_eq!(eval_black(&with_row1("XXX....."), &config), 150);
}

#[test]
fn test_terminal_scores() {
    let config = EvalConfig::default();
    let thresholds = PhaseThresholds::default();

    let win: Position = ("X".repeat(40) + &"O".repeat(24) + "O").parse().unwrap();
    assert_eq!(evaluate(&win, Color::Black, &config, &thresholds), WIN_SCORE + 16);
    assert_eq!(evaluate(&win, Color::White, &config, &thresholds), -WIN_SCORE - 16);

    let draw: Position = ("X".repeat(32) + &"O".repeat(32) + "X").parse().unwrap();
    assert_eq!(evaluate(&draw, Color::Black, &config, &thresholds), 0);

    // Wipe-out with empties left: still terminal
    let wipe = "
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        ........
        ........
        O";
    let pos: Position = wipe.parse().unwrap();
    assert!(pos.is_terminal());
    assert_eq!(terminal_score(&pos, Color::White), -WIN_SCORE - 48);
}

#[test]
fn test_evaluator_wraps_config() {
    let evaluator = Evaluator::default();
    let pos = Position::startpos();
    assert_eq!(evaluator.evaluate(&pos, Color::Black), 0);
    assert_eq!(evaluator.square_weight("a1".parse().unwrap()), 100);
    assert_eq!(evaluator.square_weight("b2".parse().unwrap()), -50);
}
