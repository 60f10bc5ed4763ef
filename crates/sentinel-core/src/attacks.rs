//! Attack, check and pin detection by ray walks over the bordered grid.

use crate::color::Color;
use crate::direction::{DIAGONALS, KNIGHT_JUMPS, ORTHOGONALS, PawnDirections};
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Ray sets paired with the test for pieces that slide along them.
const SLIDER_RAYS: [(&[i8; 4], fn(PieceKind) -> bool); 2] = [
    (&DIAGONALS, PieceKind::slides_diagonally),
    (&ORTHOGONALS, PieceKind::slides_orthogonally),
];

impl Position {
    /// Walk from `from` along `delta` and return the first square that is not empty.
    ///
    /// The border guarantees termination.
    #[inline]
    fn first_occupied(&self, from: Square, delta: i8) -> Square {
        let mut sq = from.offset(delta);
        while self.cells[sq.index()].is_empty() {
            sq = sq.offset(delta);
        }
        sq
    }

    /// `true` if any piece of `by` attacks `sq`.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        for delta in PawnDirections::of(by).captures {
            if self.cells[sq.offset(-delta).index()].is(PieceKind::Pawn, by) {
                return true;
            }
        }

        for delta in KNIGHT_JUMPS {
            if self.cells[sq.offset(delta).index()].is(PieceKind::Knight, by) {
                return true;
            }
        }

        for (rays, slides) in SLIDER_RAYS {
            for &delta in rays {
                let adjacent = sq.offset(delta);
                if self.cells[adjacent.index()].is(PieceKind::King, by) {
                    return true;
                }
                let cell = self.cells[self.first_occupied(sq, delta).index()];
                if cell.is_color(by) && cell.kind().is_some_and(slides) {
                    return true;
                }
            }
        }

        false
    }

    /// `true` if `color`'s king is attacked.
    #[inline]
    pub fn king_in_check(&self, color: Color) -> bool {
        self.is_attacked(self.kings[color.index()], !color)
    }

    /// Recompute the pinned flag of every piece of the side to move.
    ///
    /// A piece is pinned when it is the first piece on a ray from its own king and the
    /// next piece beyond it is an enemy slider moving along that ray's axis.
    pub(crate) fn compute_pins(&mut self) {
        for sq in Square::all() {
            let cell = self.cells[sq.index()];
            if cell.is_pinned() {
                self.cells[sq.index()] = cell.with_pinned(false);
            }
        }

        let us = self.side_to_move;
        let king = self.kings[us.index()];

        for (rays, slides) in SLIDER_RAYS {
            for &delta in rays {
                let shield = self.first_occupied(king, delta);
                if !self.cells[shield.index()].is_color(us) {
                    continue;
                }
                let attacker = self.cells[self.first_occupied(shield, delta).index()];
                if attacker.is_color(!us) && attacker.kind().is_some_and(slides) {
                    let cell = self.cells[shield.index()];
                    self.cells[shield.index()] = cell.with_pinned(true);
                }
            }
        }
    }
}
