use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// A forced pass consumes a ply; a finished game counts as a single leaf
/// regardless of the remaining depth.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(pos, buf);
        if buf.is_empty() {
            if pos.is_terminal() {
                return 1;
            }
            buf.push(Move::Pass);
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let undo = pos.make_move(mv);
            nodes += inner(pos, depth - 1, rest);
            pos.unmake_move(undo);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(32); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Per-move breakdown of a perft run, in move order.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut moves = Vec::with_capacity(32);
    legal_moves_into(pos, &mut moves);
    if moves.is_empty() && !pos.is_terminal() {
        moves.push(Move::Pass);
    }
    moves
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = perft(pos, depth - 1);
            pos.unmake_move(undo);
            (mv, nodes)
        })
        .collect()
}
