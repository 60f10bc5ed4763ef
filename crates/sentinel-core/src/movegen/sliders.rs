//! Bishop, rook and queen move generation.

use crate::chess_move::Move;
use crate::position::Position;
use crate::square::Square;

use super::MoveSink;
use super::trial::leaves_king_safe;

/// Walk each ray in `rays` from `from` until blocked, emitting quiet moves and the
/// capture of the first enemy piece.
pub(super) fn gen_slider<S: MoveSink>(
    pos: &mut Position,
    from: Square,
    rays: &[i8],
    verify: bool,
    sink: &mut S,
) {
    let mover = pos.cells[from.index()];
    for &dir in rays {
        let mut delta = dir;
        loop {
            let to = from.offset(delta);
            let target = pos.cells[to.index()];
            if !target.accepts(mover) {
                break;
            }
            if !verify || leaves_king_safe(pos, from, to, None) {
                sink.push(Move::new(from, delta));
            }
            if !target.is_empty() {
                break;
            }
            delta += dir;
        }
    }
}
