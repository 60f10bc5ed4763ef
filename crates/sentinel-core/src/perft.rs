//! Leaf counting over the legal move tree.

use crate::movegen::{count_legal_moves, generate_legal_moves};
use crate::position::Position;

/// Leaf nodes `depth` plies below `pos`; the last ply is counted without playing it.
pub fn perft(pos: &Position, depth: usize) -> u64 {
    let mut pos = *pos;
    if depth == 0 {
        return 1;
    }
    if depth == 1 {
        return count_legal_moves(&mut pos) as u64;
    }

    let moves = generate_legal_moves(&mut pos);
    moves
        .as_slice()
        .iter()
        .map(|&mv| perft(&pos.make_move(mv), depth - 1))
        .sum()
}

/// Per-move leaf counts at `depth`.
///
/// Returns `(move_text, node_count)` pairs sorted alphabetically.
pub fn divide(pos: &Position, depth: usize) -> Vec<(String, u64)> {
    let mut pos = *pos;
    let moves = generate_legal_moves(&mut pos);
    let mut results: Vec<(String, u64)> = moves
        .as_slice()
        .iter()
        .map(|&mv| {
            let child = pos.make_move(mv);
            let count = if depth <= 1 { 1 } else { perft(&child, depth - 1) };
            (mv.to_string(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
