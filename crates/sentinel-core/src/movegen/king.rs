//! King move generation, castling included.

use crate::chess_move::Move;
use crate::direction::{CASTLE_KING_SIDE, CASTLE_QUEEN_SIDE, DIAGONALS, ORTHOGONALS};
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveSink;
use super::trial::leaves_king_safe;

/// Generate king moves. Every step is verified; castling is never offered in check.
pub(super) fn gen_king<S: MoveSink>(pos: &mut Position, from: Square, sink: &mut S) {
    let king = pos.cells[from.index()];

    for &delta in ORTHOGONALS.iter().chain(DIAGONALS.iter()) {
        let to = from.offset(delta);
        if pos.cells[to.index()].accepts(king) && leaves_king_safe(pos, from, to, None) {
            sink.push(Move::new(from, delta));
        }
    }

    if pos.in_check || king.has_moved() {
        return;
    }

    let us = king.color();
    let them = !us;
    let empty = |pos: &Position, delta: i8| pos.cells[from.offset(delta).index()].is_empty();
    let safe = |pos: &Position, delta: i8| !pos.is_attacked(from.offset(delta), them);
    let unmoved_rook = |pos: &Position, delta: i8| {
        let cell = pos.cells[from.offset(delta).index()];
        cell.is(PieceKind::Rook, us) && !cell.has_moved()
    };

    if empty(pos, 1)
        && empty(pos, 2)
        && unmoved_rook(pos, 3)
        && safe(pos, 1)
        && safe(pos, 2)
    {
        sink.push(Move::new(from, CASTLE_KING_SIDE));
    }

    if empty(pos, -1)
        && empty(pos, -2)
        && empty(pos, -3)
        && unmoved_rook(pos, -4)
        && safe(pos, -1)
        && safe(pos, -2)
    {
        sink.push(Move::new(from, CASTLE_QUEEN_SIDE));
    }
}
