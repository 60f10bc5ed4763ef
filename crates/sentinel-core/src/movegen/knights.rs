//! Knight move generation.

use crate::chess_move::Move;
use crate::direction::KNIGHT_JUMPS;
use crate::position::Position;
use crate::square::Square;

use super::MoveSink;
use super::trial::leaves_king_safe;

/// Generate knight moves. A pinned knight never has a legal move; outside check it is
/// skipped without trial.
pub(super) fn gen_knight<S: MoveSink>(pos: &mut Position, from: Square, sink: &mut S) {
    let mover = pos.cells[from.index()];
    let in_check = pos.in_check;
    if mover.is_pinned() && !in_check {
        return;
    }

    for delta in KNIGHT_JUMPS {
        let to = from.offset(delta);
        if !pos.cells[to.index()].accepts(mover) {
            continue;
        }
        if !in_check || leaves_king_safe(pos, from, to, None) {
            sink.push(Move::new(from, delta));
        }
    }
}
