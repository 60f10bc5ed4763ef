//! Move execution with full bookkeeping.

use crate::cell::Cell;
use crate::chess_move::Move;
use crate::color::Color;
use crate::direction::{CASTLE_KING_SIDE, CASTLE_QUEEN_SIDE, PawnDirections};
use crate::draw::DrawKind;
use crate::movegen::count_legal_moves;
use crate::piece_kind::PieceKind;
use crate::position::{FINGERPRINT_WINDOW, MATING_MATERIAL, Position};

impl Position {
    /// Execute `mv` in place.
    ///
    /// `mv` must be legal in this position. Updates the caches, the en-passant
    /// targets, the reversible-move counter and fingerprint history, flips the side to
    /// move, recomputes the check flag and records any draw the move produces.
    ///
    /// # Panics
    ///
    /// Panics if the destination holds a king.
    pub fn apply_move(&mut self, mv: Move) {
        let from = mv.from();
        let to = mv.to();
        let piece = self.cells[from.index()];
        let target = self.cells[to.index()];
        let us = piece.color();
        let them = !us;

        self.draw = None;

        if target.kind() == Some(PieceKind::King) {
            panic!("move {mv} captures a king in {self}");
        }

        let is_pawn = piece.kind() == Some(PieceKind::Pawn);
        if is_pawn || !target.is_empty() {
            self.reversible_moves = 0;
        } else {
            self.reversible_moves = self.reversible_moves.saturating_add(1);
        }

        let mut captured = to;
        let dirs = PawnDirections::of(us);
        match piece.kind() {
            Some(PieceKind::King) => {
                if mv.delta() == CASTLE_KING_SIDE {
                    let rook = from.offset(3);
                    self.cells[from.offset(1).index()] = self.cells[rook.index()].moved();
                    self.cells[rook.index()] = Cell::EMPTY;
                } else if mv.delta() == CASTLE_QUEEN_SIDE {
                    let rook = from.offset(-4);
                    self.cells[from.offset(-1).index()] = self.cells[rook.index()].moved();
                    self.cells[rook.index()] = Cell::EMPTY;
                }
                self.kings[us.index()] = to;
            }
            Some(PieceKind::Pawn)
                if target.is_empty()
                    && mv.delta() != dirs.push
                    && mv.delta() != dirs.double_push =>
            {
                if let Some(sq) = self.en_passant[them.index()] {
                    captured = sq;
                }
            }
            _ => {}
        }

        self.en_passant = [None; 2];
        if is_pawn && mv.delta() == dirs.double_push {
            self.en_passant[us.index()] = Some(to);
        }

        let victim = self.cells[captured.index()];
        if let Some(kind) = victim.kind() {
            let side = victim.color().index();
            self.material[side] -= kind.value();
            if kind == PieceKind::Pawn {
                self.pawns[side] -= 1;
            }
            self.cells[captured.index()] = Cell::EMPTY;
        }

        match mv.promotion() {
            Some(kind) => {
                self.cells[to.index()] = Cell::piece(kind, us).moved();
                self.material[us.index()] += kind.value() - 1;
                self.pawns[us.index()] -= 1;
            }
            None => self.cells[to.index()] = piece.moved(),
        }
        self.cells[from.index()] = Cell::EMPTY;

        self.side_to_move = them;
        if them == Color::White {
            self.move_number += 1;
        }

        self.in_check = self.king_in_check(them);

        let counter = self.reversible_moves as usize;
        if counter < FINGERPRINT_WINDOW {
            let fingerprint = self.fingerprint();
            self.fingerprints[counter] = fingerprint;
            let repeats = self.fingerprints[..counter]
                .iter()
                .filter(|&&seen| seen == fingerprint)
                .count();
            if repeats >= 2 {
                self.draw = Some(DrawKind::Threefold);
            }
        } else if !self.in_check || count_legal_moves(self) > 0 {
            self.draw = Some(DrawKind::FiftyMove);
        }

        if self.pawns == [0, 0]
            && self.material[0] < MATING_MATERIAL
            && self.material[1] < MATING_MATERIAL
        {
            self.draw = Some(DrawKind::InsufficientMaterial);
        }
    }

    /// Return a copy of this position with `mv` executed (copy-make).
    #[inline]
    pub fn make_move(&self, mv: Move) -> Position {
        let mut child = *self;
        child.apply_move(mv);
        child
    }
}

#[cfg(test)]
mod tests {
    use crate::chess_move::Move;
    use crate::color::Color;
    use crate::draw::{DrawKind, Outcome};
    use crate::piece_kind::PieceKind;
    use crate::position::Position;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).expect("valid square")
    }

    fn play(pos: &mut Position, moves: &[&str]) {
        for text in moves {
            let wanted: Move = text.parse().expect("valid move text");
            let mv = pos.find_legal(wanted).expect("legal move");
            pos.apply_move(mv);
        }
    }

    #[test]
    fn normal_pawn_push_e2e4() {
        let mut pos = Position::starting_position();
        play(&mut pos, &["e2-e4"]);

        assert_eq!(pos.piece_on(sq("e4")), Some(PieceKind::Pawn));
        assert_eq!(pos.color_on(sq("e4")), Some(Color::White));
        assert!(pos.cell(sq("e4")).has_moved());
        assert_eq!(pos.piece_on(sq("e2")), None);
        assert_eq!(pos.en_passant(Color::White), Some(sq("e4")));
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.reversible_moves(), 0);
    }

    #[test]
    fn en_passant_target_expires() {
        let mut pos = Position::starting_position();
        play(&mut pos, &["e2-e4", "g8-f6"]);
        assert_eq!(pos.en_passant(Color::White), None);
        assert_eq!(pos.en_passant(Color::Black), None);
    }

    #[test]
    fn capture_updates_material() {
        let mut pos = Position::starting_position();
        play(&mut pos, &["e2-e4", "d7-d5", "e4-d5"]);

        assert_eq!(pos.piece_on(sq("d5")), Some(PieceKind::Pawn));
        assert_eq!(pos.color_on(sq("d5")), Some(Color::White));
        assert_eq!(pos.material(Color::Black), 38);
        assert_eq!(pos.pawn_count(Color::Black), 7);
        assert_eq!(pos.material(Color::White), 39);
        assert_eq!(pos.validate(), Ok(()));
    }

    #[test]
    fn en_passant_capture() {
        let mut pos = Position::starting_position();
        play(&mut pos, &["e2-e4", "a7-a6", "e4-e5", "d7-d5"]);
        assert_eq!(pos.en_passant(Color::Black), Some(sq("d5")));

        play(&mut pos, &["e5-d6"]);
        assert_eq!(pos.piece_on(sq("d6")), Some(PieceKind::Pawn));
        assert_eq!(pos.color_on(sq("d6")), Some(Color::White));
        assert_eq!(pos.piece_on(sq("d5")), None, "captured pawn removed");
        assert_eq!(pos.piece_on(sq("e5")), None);
        assert_eq!(pos.pawn_count(Color::Black), 7);
        assert_eq!(pos.validate(), Ok(()));
    }

    #[test]
    fn promotion() {
        let mut pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid FEN");
        play(&mut pos, &["a7-a8/R"]);

        assert_eq!(pos.piece_on(sq("a8")), Some(PieceKind::Rook));
        assert_eq!(pos.color_on(sq("a8")), Some(Color::White));
        assert_eq!(pos.piece_on(sq("a7")), None);
        assert_eq!(pos.material(Color::White), 5);
        assert_eq!(pos.pawn_count(Color::White), 0);
        assert!(pos.in_check(), "rook on a8 checks the king on e8");
        assert_eq!(pos.validate(), Ok(()));
    }

    #[test]
    fn capture_promotion() {
        let mut pos: Position = "3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid FEN");
        play(&mut pos, &["e7-d8/Q"]);

        assert_eq!(pos.piece_on(sq("d8")), Some(PieceKind::Queen));
        assert_eq!(pos.material(Color::White), 9);
        assert_eq!(pos.material(Color::Black), 0);
        assert_eq!(pos.validate(), Ok(()));
    }

    #[test]
    fn kingside_castling_white() {
        let mut pos: Position = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .expect("valid FEN");
        play(&mut pos, &["e1-g1"]);

        assert_eq!(pos.piece_on(sq("g1")), Some(PieceKind::King));
        assert_eq!(pos.piece_on(sq("f1")), Some(PieceKind::Rook));
        assert!(pos.cell(sq("f1")).has_moved());
        assert_eq!(pos.piece_on(sq("e1")), None);
        assert_eq!(pos.piece_on(sq("h1")), None);
        assert_eq!(pos.king_square(Color::White), sq("g1"));
        assert_eq!(pos.reversible_moves(), 1);
    }

    #[test]
    fn queenside_castling_black() {
        let mut pos: Position = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1"
            .parse()
            .expect("valid FEN");
        play(&mut pos, &["e8-c8"]);

        assert_eq!(pos.piece_on(sq("c8")), Some(PieceKind::King));
        assert_eq!(pos.piece_on(sq("d8")), Some(PieceKind::Rook));
        assert_eq!(pos.piece_on(sq("a8")), None);
        assert_eq!(pos.king_square(Color::Black), sq("c8"));
        assert_eq!(pos.move_number(), 2);
    }

    #[test]
    fn moved_rook_loses_castling() {
        let mut pos: Position = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .expect("valid FEN");
        play(&mut pos, &["h1-g1", "a8-b8", "g1-h1", "b8-a8"]);
        assert_eq!(pos.to_string(), "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Qk - 4 3");
    }

    #[test]
    fn fullmove_increments_after_black() {
        let mut pos = Position::starting_position();
        play(&mut pos, &["e2-e4"]);
        assert_eq!(pos.move_number(), 1);
        play(&mut pos, &["e7-e5"]);
        assert_eq!(pos.move_number(), 2);
    }

    #[test]
    fn copy_make_leaves_parent() {
        let pos = Position::starting_position();
        let child = pos.make_move("g1-f3".parse().expect("valid move text"));
        assert_eq!(pos, Position::starting_position());
        assert_eq!(child.piece_on(sq("f3")), Some(PieceKind::Knight));
        assert_eq!(child.reversible_moves(), 1);
    }

    #[test]
    fn threefold_on_third_occurrence() {
        let mut pos = Position::starting_position();
        play(
            &mut pos,
            &["g1-f3", "g8-f6", "f3-g1", "f6-g8", "g1-f3", "g8-f6", "f3-g1"],
        );
        assert_eq!(pos.draw(), None, "only two occurrences so far");
        play(&mut pos, &["f6-g8"]);
        assert_eq!(pos.draw(), Some(DrawKind::Threefold));
    }

    #[test]
    fn draw_flag_clears_on_next_move() {
        let mut pos = Position::starting_position();
        play(
            &mut pos,
            &["g1-f3", "g8-f6", "f3-g1", "f6-g8", "g1-f3", "g8-f6", "f3-g1", "f6-g8"],
        );
        assert!(pos.is_drawn());
        play(&mut pos, &["e2-e4"]);
        assert_eq!(pos.draw(), None);
    }

    #[test]
    fn fifty_move_rule() {
        let mut pos: Position = "4k3/8/8/8/8/8/8/R3K3 w - - 49 1".parse().expect("valid FEN");
        play(&mut pos, &["a1-a2"]);
        assert_eq!(pos.reversible_moves(), 50);
        assert_eq!(pos.draw(), Some(DrawKind::FiftyMove));
    }

    #[test]
    fn mate_on_fiftieth_move_is_not_a_draw() {
        let mut pos: Position = "k7/8/1K6/8/8/8/8/7R w - - 49 1".parse().expect("valid FEN");
        play(&mut pos, &["h1-h8"]);
        assert_eq!(pos.reversible_moves(), 50);
        assert!(pos.in_check());
        assert_eq!(pos.draw(), None);
        assert_eq!(pos.outcome(), Outcome::Checkmate { winner: Color::White });
    }

    #[test]
    fn reversible_counter_saturates() {
        let mut pos: Position = "4k3/8/8/8/8/8/8/R3K3 w - - 65535 1".parse().expect("valid FEN");
        play(&mut pos, &["a1-a2"]);
        assert_eq!(pos.reversible_moves(), u16::MAX);
        assert_eq!(pos.draw(), Some(DrawKind::FiftyMove));
    }

    #[test]
    fn insufficient_material() {
        let mut pos: Position = "4k3/8/8/8/8/8/3p4/4KB2 w - - 0 1".parse().expect("valid FEN");
        play(&mut pos, &["e1-d2"]);
        assert_eq!(pos.material(Color::Black), 0);
        assert_eq!(pos.draw(), Some(DrawKind::InsufficientMaterial));
    }

    #[test]
    #[should_panic(expected = "captures a king")]
    fn king_capture_panics() {
        let mut pos: Position = "4k3/8/8/8/8/8/8/4K2R w - - 0 1".parse().expect("valid FEN");
        pos.apply_move(Move::between(sq("h1"), sq("h8"), None));
        pos.apply_move(Move::between(sq("h8"), sq("e8"), None));
    }
}
