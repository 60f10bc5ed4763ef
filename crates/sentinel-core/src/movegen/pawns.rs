//! Pawn move generation: pushes, captures, promotions and en passant.

use crate::chess_move::Move;
use crate::direction::PawnDirections;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveSink;
use super::trial::leaves_king_safe;

/// Emit a pawn move, or all four promotions when it reaches the last rank.
#[inline]
fn emit<S: MoveSink>(sink: &mut S, from: Square, delta: i8, promoting: bool) {
    if promoting {
        for kind in PieceKind::PROMOTIONS {
            sink.push(Move::with_promotion(from, delta, kind));
        }
    } else {
        sink.push(Move::new(from, delta));
    }
}

/// Generate pawn moves. En passant is always verified by trial, since the captured
/// pawn leaves a square off the moving piece's line.
pub(super) fn gen_pawn<S: MoveSink>(pos: &mut Position, from: Square, verify: bool, sink: &mut S) {
    let pawn = pos.cells[from.index()];
    let us = pawn.color();
    let dirs = PawnDirections::of(us);
    let promoting = (from.rank() as i8 + us.forward()) as u8 == dirs.promotion_rank;

    let to = from.offset(dirs.push);
    if pos.cells[to.index()].is_empty() {
        if !verify || leaves_king_safe(pos, from, to, None) {
            emit(sink, from, dirs.push, promoting);
        }

        let double = from.offset(dirs.double_push);
        if from.rank() == dirs.start_rank
            && pos.cells[double.index()].is_empty()
            && (!verify || leaves_king_safe(pos, from, double, None))
        {
            sink.push(Move::new(from, dirs.double_push));
        }
    }

    for delta in dirs.captures {
        let to = from.offset(delta);
        if pos.cells[to.index()].is_enemy_of(pawn) && (!verify || leaves_king_safe(pos, from, to, None)) {
            emit(sink, from, delta, promoting);
        }
    }

    let Some(target) = pos.en_passant[(!us).index()] else {
        return;
    };
    for (delta, side) in dirs.captures.into_iter().zip(dirs.en_passant_sides) {
        let to = from.offset(delta);
        if from.offset(side) == target
            && pos.cells[to.index()].is_empty()
            && leaves_king_safe(pos, from, to, Some(target))
        {
            sink.push(Move::new(from, delta));
        }
    }
}
