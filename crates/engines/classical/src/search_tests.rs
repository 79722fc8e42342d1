use super::*;
use othello_core::{apply_move, legal_moves, Color};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plain minimax without pruning, same pass and leaf rules.
fn minimax(pos: &Position, depth: u8, evaluator: &Evaluator, exact: bool) -> i32 {
    let moves = legal_moves(pos);
    if moves.is_empty() {
        if pos.mobility(pos.side_to_move().other()).is_empty() {
            return if exact {
                pos.disc_diff(pos.side_to_move())
            } else {
                evaluator.evaluate(pos, pos.side_to_move())
            };
        }
        let next = apply_move(pos, Move::Pass).unwrap();
        return -minimax(&next, depth, evaluator, exact);
    }
    if depth == 0 {
        return evaluator.evaluate(pos, pos.side_to_move());
    }
    moves
        .iter()
        .map(|&mv| -minimax(&apply_move(pos, mv).unwrap(), depth - 1, evaluator, exact))
        .max()
        .unwrap()
}

fn random_position(seed: u64, plies: usize) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Position::startpos();
    for _ in 0..plies {
        if pos.is_terminal() {
            break;
        }
        let mv = legal_moves(&pos).choose(&mut rng).copied().unwrap_or(Move::Pass);
        pos = apply_move(&pos, mv).unwrap();
    }
    if pos.legal_placements().is_empty() && !pos.is_terminal() {
        pos = apply_move(&pos, Move::Pass).unwrap();
    }
    pos
}

#[test]
fn test_search_root_start_position() {
    let evaluator = Evaluator::default();
    let pos = Position::startpos();
    let outcome = search_root(&pos, 3, &evaluator, None, false);
    let (mv, _) = outcome.best.unwrap();
    assert!(legal_moves(&pos).contains(&mv));
    assert!(outcome.nodes > 0);
    assert!(!outcome.stopped);
}

#[test]
fn test_alpha_beta_matches_minimax() {
    let evaluator = Evaluator::default();
    for seed in 0..12 {
        let pos = random_position(seed, 20 + seed as usize);
        if pos.is_terminal() {
            continue;
        }
        for depth in 1..=3u8 {
            let outcome = search_root(&pos, depth, &evaluator, None, false);
            let (_, score) = outcome.best.unwrap();
            let exact = u32::from(depth) >= pos.empty_count();
            assert_eq!(
                score,
                minimax(&pos, depth, &evaluator, exact),
                "seed {seed} depth {depth}\n{pos}"
            );
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let evaluator = Evaluator::default();
    for seed in 0..16 {
        let pos = random_position(seed * 7 + 1, 10 + 3 * seed as usize);
        if pos.is_terminal() {
            continue;
        }
        for depth in 1..=4u8 {
            let seq = search_root(&pos, depth, &evaluator, None, false);
            let par = search_root(&pos, depth, &evaluator, None, true);
            assert_eq!(seq.best, par.best, "seed {seed} depth {depth}\n{pos}");
        }
    }
}

#[test]
fn test_first_move_wins_ties() {
    // All four opening moves are symmetric, so they score the same.
    let evaluator = Evaluator::default();
    let pos = Position::startpos();
    for parallel in [false, true] {
        let outcome = search_root(&pos, 2, &evaluator, None, parallel);
        assert_eq!(outcome.best.unwrap().0, "d3".parse().unwrap());
    }
}

#[test]
fn test_root_without_placement() {
    let evaluator = Evaluator::default();
    let pos: Position = "
        OX.OOOO.
        OOXXOOXO
        .XOOOXX.
        XXOOXXXO
        XXXOOXXO
        XXOOOXXO
        XXXXOXXO
        OO.XXXX.
        X"
    .parse()
    .unwrap();
    let outcome = search_root(&pos, 4, &evaluator, None, false);
    assert!(outcome.best.is_none());
}

#[test]
fn test_pass_does_not_consume_depth() {
    // White to move, Black stuck after most replies: exact search must see
    // through the passes to the end of the game.
    let evaluator = Evaluator::default();
    let pos: Position = "
        OX.OOOO.
        OOXXOOXO
        .XOOOXX.
        XXOOXXXO
        XXXOOXXO
        XXOOOXXO
        XXXXOXXO
        OO.XXXX.
        O"
    .parse()
    .unwrap();
    let empties = pos.empty_count() as u8;
    let outcome = search_root(&pos, empties, &evaluator, None, false);
    let (_, score) = outcome.best.unwrap();
    assert_eq!(score, minimax(&pos, empties, &evaluator, true));
}

#[test]
fn test_iterative_deepening_reaches_target() {
    let evaluator = Evaluator::default();
    let pos = Position::startpos();
    let tc = TimeControl::new(None);
    tc.start();
    let outcome = iterative_deepening(&pos, 4, &evaluator, &tc, true).unwrap();
    assert_eq!(outcome.depth, 4);
    assert!(!outcome.exact);
    assert!(!outcome.stopped);

    let direct = search_root(&pos, 4, &evaluator, None, true).best.unwrap();
    assert_eq!((outcome.best_move, outcome.score), direct);
}

#[test]
fn test_iterative_deepening_always_completes_depth_one() {
    let evaluator = Evaluator::default();
    let pos = Position::startpos();
    let tc = TimeControl::new(Some(std::time::Duration::ZERO));
    tc.start();
    tc.stop();
    let outcome = iterative_deepening(&pos, 6, &evaluator, &tc, false).unwrap();
    assert_eq!(outcome.depth, 1);
    assert!(outcome.stopped);
    assert!(legal_moves(&pos).contains(&outcome.best_move));
}

#[test]
fn test_exact_flag_near_the_end() {
    let evaluator = Evaluator::default();
    let pos: Position = "
        OXXX.XOO
        XXXXXXOO
        .XXXOOOO
        OXXOOXOO
        OXOXXXXO
        OXOOXOXO
        XXOOOXXO
        ..OOX.XO
        O"
    .parse()
    .unwrap();
    assert_eq!(pos.side_to_move(), Color::White);
    let tc = TimeControl::new(None);
    tc.start();
    let outcome = iterative_deepening(&pos, 5, &evaluator, &tc, true).unwrap();
    assert!(outcome.exact);
    assert_eq!(outcome.depth, 5);
    assert_eq!(outcome.score, 36);
}

#[test]
fn test_stop_flag_is_seen_between_clock_reads() {
    // The clock is never read, yet a raised flag still ends the search.
    let evaluator = Evaluator::default();
    let pos = Position::startpos();
    let tc = TimeControl::new(None).with_check_interval(u64::MAX);
    tc.start();
    tc.stop();
    for parallel in [false, true] {
        let outcome = search_root(&pos, 6, &evaluator, Some(&tc), parallel);
        assert!(outcome.stopped);
        // One node per root child at most
        assert!(outcome.nodes <= 4, "{} nodes", outcome.nodes);
    }
}
