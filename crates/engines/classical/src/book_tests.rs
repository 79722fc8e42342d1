use super::*;
use othello_core::{parse_moves, GameState};

fn reply(book: &OpeningBook, history: &str) -> Option<String> {
    book.lookup(&parse_moves(history).unwrap()).map(|m| m.to_string())
}

#[test]
fn test_symmetries_are_involutions() {
    for sym in Symmetry::ALL {
        for sq in Square::all() {
            assert_eq!(sym.apply(sym.apply(sq)), sq, "{sym:?} {sq}");
        }
    }
}

#[test]
fn test_symmetries_fix_start_position() {
    let pos = othello_core::Position::startpos();
    for sym in Symmetry::ALL {
        for sq in Square::all() {
            assert_eq!(pos.cell(sym.apply(sq)), pos.cell(sq), "{sym:?} {sq}");
        }
    }
}

#[test]
fn test_every_opening_normalizes_to_f5() {
    let cases = [
        ("f5", Symmetry::Identity),
        ("e6", Symmetry::Transpose),
        ("d3", Symmetry::AntiTranspose),
        ("c4", Symmetry::Rotate180),
    ];
    for (first, expected) in cases {
        assert_eq!(Symmetry::normalizing(first.parse().unwrap()), Some(expected));
    }
    assert_eq!(Symmetry::normalizing("a1".parse().unwrap()), None);
}

#[test]
fn test_empty_history_opens_f5() {
    let book = OpeningBook::default();
    assert_eq!(reply(&book, ""), Some("f5".to_string()));
    // Deterministic
    assert_eq!(reply(&book, ""), reply(&book, ""));
}

#[test]
fn test_replies_in_each_orientation() {
    let book = OpeningBook::default();
    assert_eq!(reply(&book, "f5"), Some("d6".to_string()));
    assert_eq!(reply(&book, "e6"), Some("f4".to_string()));
    assert_eq!(reply(&book, "d3"), Some("c5".to_string()));
    assert_eq!(reply(&book, "c4"), Some("e3".to_string()));
}

#[test]
fn test_first_matching_line_wins() {
    let book = OpeningBook::default();
    let hit = |h: &str| {
        book.lookup_line(&parse_moves(h).unwrap())
            .map(|(mv, line)| (mv.to_string(), line.name))
    };
    assert_eq!(hit("f5 d6 c3 d3 c4 f4 f6"), Some(("f3".to_string(), "Tiger")));
    assert_eq!(hit("f5 d6 c3 d3 c4 f4 f6 g5"), Some(("e3".to_string(), "Aubrey")));
    assert_eq!(hit("f5 d6 c3 d3 c4 f4"), Some(("f6".to_string(), "Tiger")));
    assert_eq!(hit("f5 d6 c3 d3 c4 f4 c5"), Some(("b3".to_string(), "Cat")));
    assert_eq!(hit("f5 d6 c5 f4"), Some(("e3".to_string(), "Rose")));
    assert_eq!(hit("f5 f6"), Some(("e6".to_string(), "Buffalo")));
    assert_eq!(hit("f5 f6 e6 f4 g5"), Some(("e7".to_string(), "Heath")));
    assert_eq!(hit("f5 f6 e6 f4 e3"), Some(("c5".to_string(), "Chimney")));
    assert_eq!(hit("f5 f4"), Some(("e3".to_string(), "Parallel")));
}

#[test]
fn test_misses() {
    let book = OpeningBook::default();
    // Diverges from every line
    assert_eq!(reply(&book, "f5 d6 c3 d3 c4 f4 f6 f3 e6 a1"), None);
    assert_eq!(reply(&book, "f5 d6 c5 f4 d3"), None);
    // End of a line
    assert_eq!(reply(&book, "f5 f4 e3 f6 d3"), None);
    // Any pass
    assert_eq!(reply(&book, "f5 pass"), None);
}

#[test]
fn test_max_ply() {
    let book = OpeningBook::new(2);
    assert_eq!(reply(&book, "f5"), Some("d6".to_string()));
    assert_eq!(reply(&book, "f5 d6"), None);
    assert_eq!(OpeningBook::new(0).lookup(&[]), None);
}

#[test]
fn test_every_line_is_playable_in_every_orientation() {
    let book = OpeningBook::new(usize::MAX);
    for line in book.lines() {
        for sym in Symmetry::ALL {
            let mut game = GameState::new();
            for (ply, &canonical) in line.moves.iter().enumerate() {
                let expected = sym.apply_move(Move::Place(canonical));
                let looked_up = book.lookup(game.history());
                assert!(looked_up.is_some(), "{} {sym:?} ply {ply}", line.name);

                game = game
                    .play(expected)
                    .unwrap_or_else(|e| panic!("{} {sym:?} ply {ply}: {e}", line.name));
            }
        }
    }
}

#[test]
fn test_mirrored_tiger() {
    // Tiger opened on d3 instead of f5
    let book = OpeningBook::default();
    assert_eq!(reply(&book, "d3 c5 f6"), Some("f5".to_string()));
}
