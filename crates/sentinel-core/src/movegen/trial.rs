//! Trial execution: apply a move to the grid, test the mover's king, restore.

use crate::cell::Cell;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// A move applied to the grid in place. Dropping the guard restores every touched
/// cell and the mover's king square.
pub(super) struct Trial<'a> {
    pos: &'a mut Position,
    saved: [(Square, Cell); 3],
    len: usize,
    king: Square,
}

impl<'a> Trial<'a> {
    /// Move the piece on `from` to `to`, also emptying `captured` when the captured
    /// piece is not on `to` (en passant).
    pub(super) fn apply(
        pos: &'a mut Position,
        from: Square,
        to: Square,
        captured: Option<Square>,
    ) -> Trial<'a> {
        let us = pos.side_to_move;
        let king = pos.kings[us.index()];
        let mut trial = Trial {
            pos,
            saved: [(from, Cell::EMPTY); 3],
            len: 0,
            king,
        };

        trial.save(from);
        trial.save(to);
        if let Some(sq) = captured {
            trial.save(sq);
            trial.pos.cells[sq.index()] = Cell::EMPTY;
        }

        let piece = trial.pos.cells[from.index()];
        trial.pos.cells[to.index()] = piece;
        trial.pos.cells[from.index()] = Cell::EMPTY;
        if piece.kind() == Some(PieceKind::King) {
            trial.pos.kings[us.index()] = to;
        }
        trial
    }

    fn save(&mut self, sq: Square) {
        self.saved[self.len] = (sq, self.pos.cells[sq.index()]);
        self.len += 1;
    }

    /// `true` if the mover's king is not attacked in the trial position.
    pub(super) fn king_safe(&self) -> bool {
        !self.pos.king_in_check(self.pos.side_to_move)
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        for &(sq, cell) in self.saved[..self.len].iter().rev() {
            self.pos.cells[sq.index()] = cell;
        }
        let us = self.pos.side_to_move;
        self.pos.kings[us.index()] = self.king;
    }
}

/// `true` if moving `from` to `to` (and removing `captured`) keeps the mover's king
/// out of attack. The position is unchanged afterwards.
#[inline]
pub(super) fn leaves_king_safe(
    pos: &mut Position,
    from: Square,
    to: Square,
    captured: Option<Square>,
) -> bool {
    Trial::apply(pos, from, to, captured).king_safe()
}
