//! End-to-end checks of the classical engine against brute force.

use classical_engine::{EngineConfig, MoveSelector};
use othello_core::{apply_move, legal_moves, Color, GameState, Move, MoveSource, Position, SearchLimits};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Exact game value for the side to move, no pruning.
fn solve(pos: &Position) -> i32 {
    let moves = legal_moves(pos);
    if moves.is_empty() {
        if pos.is_terminal() {
            return pos.disc_diff(pos.side_to_move());
        }
        return -solve(&apply_move(pos, Move::Pass).unwrap());
    }
    moves
        .iter()
        .map(|&mv| -solve(&apply_move(pos, mv).unwrap()))
        .max()
        .unwrap()
}

/// Random playout down to `empties` empty squares, with a placement to play.
fn random_endgame(seed: u64, empties: u32) -> Option<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameState::new();
    while game.position().empty_count() > empties {
        let mv = *game.legal_moves().choose(&mut rng)?;
        game = game.play(mv).ok()?;
    }
    let pos = *game.position();
    (!pos.is_terminal() && !pos.legal_placements().is_empty()).then_some(pos)
}

#[test]
fn test_exhaustive_phase_matches_brute_force() {
    let selector = MoveSelector::default();
    let mut checked = 0;
    for seed in 0..40 {
        let Some(pos) = random_endgame(seed, 8) else {
            continue;
        };
        let result = selector.choose_move(&pos, &[], None).unwrap();
        assert_eq!(result.source, MoveSource::Search);
        assert!(result.exact, "seed {seed}");
        assert_eq!(result.score, solve(&pos), "seed {seed}\n{pos}");

        // The chosen move achieves that value
        let after = apply_move(&pos, result.best_move).unwrap();
        assert_eq!(-solve(&after), result.score, "seed {seed}\n{pos}");
        checked += 1;
    }
    assert!(checked > 20);
}

#[test]
fn test_lower_exhaustive_threshold_still_solves() {
    // With the threshold below the empties the endgame depth is too
    // shallow to reach the end, so the result is heuristic.
    let mut config = EngineConfig::default();
    config.phases.exhaustive_max_empties = 4;
    config.depths.endgame = 3;
    let selector = MoveSelector::new(config).unwrap();

    let pos = (0..)
        .find_map(|seed| random_endgame(seed, 9))
        .unwrap();
    let result = selector.choose_move(&pos, &[], None).unwrap();
    assert!(!result.exact);
    assert_eq!(result.depth, 3);
    assert!(legal_moves(&pos).contains(&result.best_move));

    let result = selector
        .choose_with_limits(&pos, &[], &SearchLimits::depth(9))
        .unwrap();
    assert!(result.exact);
    assert_eq!(result.score, solve(&pos));
}

#[test]
fn test_full_game_between_two_selectors() {
    let mut config = EngineConfig::default();
    config.depths.opening = 2;
    config.depths.midgame = 2;
    config.depths.endgame = 3;
    config.phases.exhaustive_max_empties = 6;
    let black = MoveSelector::new(config.clone()).unwrap();
    config.book.enabled = false;
    let white = MoveSelector::new(config).unwrap();

    let mut game = GameState::new();
    let mut book_moves = 0;
    let mut plies = 0;
    while !game.is_over() {
        let selector = match game.side_to_move() {
            Color::Black => &black,
            Color::White => &white,
        };
        let result = selector.choose_for_game(&game, None).unwrap();
        if result.source == MoveSource::Book {
            book_moves += 1;
        }
        game = game.play(result.best_move).unwrap();
        plies += 1;
        assert!(plies <= 120, "game did not finish");
    }

    assert!(book_moves >= 1);
    let (b, w) = game.position().score();
    assert!(b + w <= 64);
    assert!(game.outcome().is_some());
}
