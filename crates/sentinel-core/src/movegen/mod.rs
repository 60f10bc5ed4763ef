//! Legal move generation.
//!
//! Pieces are visited rank 1 first, file a first. When the side to move is not in
//! check, pins are computed up front and unpinned pieces emit their moves straight from
//! the geometry. In check, or for a pinned piece, every candidate is verified by a
//! trial execution. King steps and en passant are always verified.

mod king;
mod knights;
mod pawns;
mod sliders;
mod trial;

use crate::chess_move::Move;
use crate::direction::{DIAGONALS, ORTHOGONALS};
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knight;
use self::pawns::gen_pawn;
use self::sliders::gen_slider;

/// Upper bound on the number of legal moves in any position.
pub const MAX_MOVES: usize = 218;

const CAPACITY: usize = 256;

/// Destination for generated moves.
///
/// Generation is written once against this trait so that filling a buffer and merely
/// counting can never disagree.
pub(crate) trait MoveSink {
    fn push(&mut self, mv: Move);
}

/// Stack-allocated buffer for generated moves.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; CAPACITY],
    len: u16,
}

impl MoveList {
    /// Create an empty move list.
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::NULL; CAPACITY],
            len: 0,
        }
    }

    /// Push a move onto the list.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!((self.len as usize) < CAPACITY);
        self.moves[self.len as usize] = mv;
        self.len += 1;
    }

    /// Return the number of moves in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Return `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    /// Return a mutable slice of the moves, for reordering.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len as usize]
    }

    /// `true` if `mv` is in the list.
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl MoveSink for MoveList {
    #[inline]
    fn push(&mut self, mv: Move) {
        MoveList::push(self, mv);
    }
}

/// Counts moves without storing them.
#[derive(Default)]
struct MoveCounter(usize);

impl MoveSink for MoveCounter {
    #[inline]
    fn push(&mut self, _mv: Move) {
        self.0 += 1;
    }
}

fn generate<S: MoveSink>(pos: &mut Position, sink: &mut S) {
    if !pos.in_check {
        pos.compute_pins();
    }

    let us = pos.side_to_move;
    for sq in Square::all() {
        let cell = pos.cells[sq.index()];
        if !cell.is_color(us) {
            continue;
        }
        let verify = pos.in_check || cell.is_pinned();
        match cell.kind() {
            Some(PieceKind::Bishop) => gen_slider(pos, sq, &DIAGONALS, verify, sink),
            Some(PieceKind::Rook) => gen_slider(pos, sq, &ORTHOGONALS, verify, sink),
            Some(PieceKind::Queen) => {
                gen_slider(pos, sq, &DIAGONALS, verify, sink);
                gen_slider(pos, sq, &ORTHOGONALS, verify, sink);
            }
            Some(PieceKind::Knight) => gen_knight(pos, sq, sink),
            Some(PieceKind::King) => gen_king(pos, sq, sink),
            Some(PieceKind::Pawn) => gen_pawn(pos, sq, verify, sink),
            None => {}
        }
    }
}

/// Generate all legal moves for the side to move.
///
/// Takes the position mutably: pin flags are refreshed and candidates are tried on
/// the grid in place. The position is otherwise unchanged on return.
pub fn generate_legal_moves(pos: &mut Position) -> MoveList {
    let mut list = MoveList::new();
    generate(pos, &mut list);
    list
}

/// Count the legal moves for the side to move without storing them.
pub fn count_legal_moves(pos: &mut Position) -> usize {
    let mut counter = MoveCounter::default();
    generate(pos, &mut counter);
    counter.0
}

/// Count the legal moves the opponent would have if it were their turn.
///
/// Mobility comparisons at quiet nodes use this. The side to move and check flag are
/// restored before returning.
pub fn count_opponent_moves(pos: &mut Position) -> usize {
    let (side, in_check) = (pos.side_to_move, pos.in_check);
    pos.side_to_move = !side;
    pos.in_check = pos.king_in_check(!side);
    let count = count_legal_moves(pos);
    pos.side_to_move = side;
    pos.in_check = in_check;
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).expect("valid square")
    }

    fn pos(fen: &str) -> Position {
        fen.parse().expect("valid FEN")
    }

    fn texts(list: &MoveList) -> Vec<String> {
        list.as_slice().iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn starting_position_20_moves() {
        let mut p = Position::starting_position();
        let moves = generate_legal_moves(&mut p);
        assert_eq!(
            moves.len(),
            20,
            "starting position should have 20 legal moves, got {}",
            moves.len()
        );
        assert_eq!(count_legal_moves(&mut p), 20);
    }

    #[test]
    fn generation_order() {
        let mut p = Position::starting_position();
        let moves = texts(&generate_legal_moves(&mut p));
        assert_eq!(&moves[..4], ["b1-c3", "b1-a3", "g1-h3", "g1-f3"]);
        assert_eq!(&moves[4..6], ["a2-a3", "a2-a4"]);
    }

    #[test]
    fn pinned_knight_zero_moves() {
        let mut p = pos("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let moves = generate_legal_moves(&mut p);
        let knight_moves = moves.as_slice().iter().filter(|m| m.from() == sq("e2")).count();
        assert_eq!(knight_moves, 0, "pinned knight should have 0 moves");
    }

    #[test]
    fn pinned_rook_slides_along_pin() {
        let mut p = pos("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        let rook: Vec<&String> = moves.iter().filter(|m| m.starts_with("e2")).collect();
        assert_eq!(rook.len(), 6, "e3..e8 along the pin, got {rook:?}");
        assert!(moves.contains(&"e2-e8".to_string()));
    }

    #[test]
    fn double_check_king_only() {
        let mut p = pos("4r1k1/8/8/8/8/5n2/8/4K3 w - - 0 1");
        let moves = generate_legal_moves(&mut p);
        assert!(!moves.is_empty());
        for mv in moves.as_slice() {
            assert_eq!(
                p.piece_on(mv.from()),
                Some(PieceKind::King),
                "in double check, only king moves should be legal, but got {mv}"
            );
        }
    }

    #[test]
    fn castling_both_sides() {
        let mut p = pos("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        assert!(moves.contains(&"e1-g1".to_string()));
        assert!(moves.contains(&"e1-c1".to_string()));
    }

    #[test]
    fn castling_not_through_check() {
        // Bishop on a6 covers f1
        let mut p = pos("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        assert!(!moves.contains(&"e1-g1".to_string()), "f1 is attacked");
        assert!(moves.contains(&"e1-c1".to_string()));
    }

    #[test]
    fn castling_ignores_attacked_b_file() {
        // Rook on b8 covers b1, which the king never crosses
        let mut p = pos("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        assert!(moves.contains(&"e1-c1".to_string()));
    }

    #[test]
    fn no_castling_without_rights() {
        let mut p = pos("4k3/8/8/8/8/8/8/R3K2R w - - 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        assert!(!moves.contains(&"e1-g1".to_string()));
        assert!(!moves.contains(&"e1-c1".to_string()));
    }

    #[test]
    fn no_castling_in_check() {
        let mut p = pos("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        assert!(!moves.iter().any(|m| m == "e1-g1" || m == "e1-c1"));
    }

    #[test]
    fn en_passant_legal() {
        let mut p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        assert!(moves.contains(&"e5-d6".to_string()), "should have en passant, got {moves:?}");
    }

    #[test]
    fn en_passant_discovered_check_illegal() {
        let mut p = pos("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        assert!(!moves.contains(&"b5-c6".to_string()), "EP should be illegal due to discovered check");
    }

    #[test]
    fn promotion_generates_4_moves() {
        let mut p = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let moves = generate_legal_moves(&mut p);
        let promos: Vec<PieceKind> = moves.as_slice().iter().filter_map(|m| m.promotion()).collect();
        assert_eq!(
            promos,
            [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen],
            "promotion should generate N, B, R, Q in order"
        );
    }

    #[test]
    fn black_pawn_moves() {
        let mut p = pos("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        assert!(moves.contains(&"d7-d6".to_string()));
        assert!(moves.contains(&"d7-d5".to_string()));
        assert_eq!(p.side_to_move(), Color::Black);
    }

    #[test]
    fn check_evasions_only() {
        // Rook check on the e-file: block, capture, or step aside
        let mut p = pos("4r1k1/8/8/8/8/8/3B4/4K1N1 w - - 0 1");
        let moves = texts(&generate_legal_moves(&mut p));
        for mv in &moves {
            assert!(
                mv.starts_with("e1") || mv == "d2-e3" || mv == "g1-e2",
                "{mv} does not answer the check"
            );
        }
        assert!(moves.contains(&"d2-e3".to_string()));
        assert!(moves.contains(&"g1-e2".to_string()));
    }

    #[test]
    fn opponent_moves_counted_without_changing_turn() {
        let mut p = pos("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert_eq!(count_opponent_moves(&mut p), 31);
        assert_eq!(p.side_to_move(), Color::Black);
        assert_eq!(count_legal_moves(&mut p), 20);
    }

    #[test]
    fn generation_leaves_position_unchanged() {
        let mut p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let before = p;
        let _ = generate_legal_moves(&mut p);
        // Only pin flags may differ.
        for s in Square::all() {
            assert_eq!(p.cell(s).with_pinned(false), before.cell(s).with_pinned(false));
        }
        assert_eq!(p.king_square(Color::White), before.king_square(Color::White));
    }
}
