//! The game state: bordered grid, caches, draw bookkeeping and side to move.

use std::fmt;

use crate::cell::Cell;
use crate::chess_move::Move;
use crate::color::Color;
use crate::draw::{DrawKind, Outcome};
use crate::error::{MoveError, PositionError};
use crate::movegen::{count_legal_moves, generate_legal_moves};
use crate::piece_kind::PieceKind;
use crate::square::{BORDER_WIDTH, GRID_SIZE, GRID_WIDTH, Square};

/// Number of reversible half-moves whose fingerprints are remembered.
pub const FINGERPRINT_WINDOW: usize = 50;

/// Capacity of the contested-square list used by the capture extension.
pub const CONTESTED_CAPACITY: usize = 2;

/// A pawnless side below this much material cannot force mate.
pub const MATING_MATERIAL: i32 = 5;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Capture destinations already expanded along the current search line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContestedSquares {
    squares: [Option<Square>; CONTESTED_CAPACITY],
    len: u8,
}

impl ContestedSquares {
    /// `true` if `sq` is already listed.
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.squares[..self.len as usize].contains(&Some(sq))
    }

    /// Add `sq`. Returns `false` when the list is already full.
    #[inline]
    pub fn push(&mut self, sq: Square) -> bool {
        if self.is_full() {
            return false;
        }
        self.squares[self.len as usize] = Some(sq);
        self.len += 1;
        true
    }

    /// `true` when no more squares fit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len as usize == CONTESTED_CAPACITY
    }

    /// Number of listed squares.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// `true` if nothing is listed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over the listed squares in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.squares[..self.len as usize].iter().flatten().copied()
    }
}

/// Complete chess position state.
///
/// `Position` is `Copy`; the search explores a branch by copying the parent and
/// executing one move on the copy.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// The 12x12 grid, border cells included.
    pub(crate) cells: [Cell; GRID_SIZE],
    /// King square per color, indexed by [`Color::index()`].
    pub(crate) kings: [Square; Color::COUNT],
    /// Material sum per color.
    pub(crate) material: [i32; Color::COUNT],
    /// Pawn count per color.
    pub(crate) pawns: [u8; Color::COUNT],
    /// Square of the pawn each color just double-stepped, if any.
    pub(crate) en_passant: [Option<Square>; Color::COUNT],
    /// Consecutive half-moves without a pawn move or capture.
    pub(crate) reversible_moves: u16,
    /// Fingerprint after each reversible half-move, indexed by the counter.
    pub(crate) fingerprints: [u32; FINGERPRINT_WINDOW],
    pub(crate) side_to_move: Color,
    /// Starts at 1, incremented after Black moves.
    pub(crate) move_number: u16,
    pub(crate) in_check: bool,
    pub(crate) draw: Option<DrawKind>,
    pub(crate) contested: ContestedSquares,
}

impl Position {
    /// A position with an intact border, no pieces, White to move.
    ///
    /// The caches are zeroed and the king squares point at A1; callers placing pieces
    /// must call [`refresh_caches`](Self::refresh_caches) afterwards.
    pub(crate) fn empty() -> Position {
        let mut cells = [Cell::BORDER; GRID_SIZE];
        for sq in Square::all() {
            cells[sq.index()] = Cell::EMPTY;
        }
        Position {
            cells,
            kings: [Square::A1; Color::COUNT],
            material: [0; Color::COUNT],
            pawns: [0; Color::COUNT],
            en_passant: [None; Color::COUNT],
            reversible_moves: 0,
            fingerprints: [0; FINGERPRINT_WINDOW],
            side_to_move: Color::White,
            move_number: 1,
            in_check: false,
            draw: None,
            contested: ContestedSquares::default(),
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        let mut pos = Position::empty();
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            let file = file as u8;
            pos.cells[Square::new(0, file).index()] = Cell::piece(kind, Color::White);
            pos.cells[Square::new(1, file).index()] = Cell::piece(PieceKind::Pawn, Color::White);
            pos.cells[Square::new(6, file).index()] = Cell::piece(PieceKind::Pawn, Color::Black);
            pos.cells[Square::new(7, file).index()] = Cell::piece(kind, Color::Black);
        }
        pos.refresh_caches();
        pos.fingerprints[0] = pos.fingerprint();
        pos
    }

    /// Recompute king squares, material, pawn counts and the check flag from the grid.
    pub(crate) fn refresh_caches(&mut self) {
        self.material = [0; Color::COUNT];
        self.pawns = [0; Color::COUNT];
        for sq in Square::all() {
            let cell = self.cells[sq.index()];
            let Some(kind) = cell.kind() else { continue };
            let side = cell.color().index();
            self.material[side] += kind.value();
            match kind {
                PieceKind::Pawn => self.pawns[side] += 1,
                PieceKind::King => self.kings[side] = sq,
                _ => {}
            }
        }
        self.in_check = self.king_in_check(self.side_to_move);
    }

    /// Return the cell on the given square.
    #[inline]
    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.index()]
    }

    /// Return the piece kind on the given square, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<PieceKind> {
        self.cells[sq.index()].kind()
    }

    /// Return the color of the piece on the given square, if any.
    #[inline]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        let cell = self.cells[sq.index()];
        cell.is_piece().then(|| cell.color())
    }

    /// Return the square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Return `color`'s material sum in pawns.
    #[inline]
    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    /// Return both sides' material combined.
    #[inline]
    pub fn total_material(&self) -> i32 {
        self.material[0] + self.material[1]
    }

    /// Return `color`'s pawn count.
    #[inline]
    pub fn pawn_count(&self, color: Color) -> u8 {
        self.pawns[color.index()]
    }

    /// Square of the pawn `color` just advanced two ranks, if any.
    #[inline]
    pub fn en_passant(&self, color: Color) -> Option<Square> {
        self.en_passant[color.index()]
    }

    /// Half-moves since the last pawn move or capture.
    #[inline]
    pub fn reversible_moves(&self) -> u16 {
        self.reversible_moves
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the move number (starts at 1, incremented after Black moves).
    #[inline]
    pub fn move_number(&self) -> u16 {
        self.move_number
    }

    /// `true` if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// The draw recorded by the last move, or by [`outcome`](Self::outcome).
    #[inline]
    pub fn draw(&self) -> Option<DrawKind> {
        self.draw
    }

    /// `true` if a draw has been recorded.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.draw.is_some()
    }

    /// Record that the side to move is stalemated.
    #[inline]
    pub fn mark_stalemate(&mut self) {
        self.draw = Some(DrawKind::Stalemate);
    }

    /// Capture destinations already expanded on this search line.
    #[inline]
    pub fn contested(&self) -> &ContestedSquares {
        &self.contested
    }

    /// Mutable access to the contested-square list.
    #[inline]
    pub fn contested_mut(&mut self) -> &mut ContestedSquares {
        &mut self.contested
    }

    /// Count `color`'s pawns on the four center squares (d4, e4, d5, e5).
    pub fn center_pawns(&self, color: Color) -> i32 {
        (3u8..=4)
            .flat_map(|rank| (3u8..=4).map(move |file| Square::new(rank, file)))
            .filter(|&sq| self.cells[sq.index()].is(PieceKind::Pawn, color))
            .count() as i32
    }

    /// Rolling hash of piece placement.
    ///
    /// Folds the kind and color bits of every in-play square, rank 1 first, as
    /// `sum = sum * 3 + bits` with wrapping arithmetic. Moved/pinned flags, castling
    /// and en-passant availability are not part of the fingerprint.
    pub fn fingerprint(&self) -> u32 {
        Square::all().fold(0u32, |sum, sq| {
            sum.wrapping_mul(3)
                .wrapping_add(self.cells[sq.index()].identity() as u32)
        })
    }

    /// Fingerprints of the reversible half-moves so far, oldest first.
    pub fn fingerprint_history(&self) -> &[u32] {
        let len = (self.reversible_moves as usize + 1).min(FINGERPRINT_WINDOW);
        &self.fingerprints[..len]
    }

    /// Decide whether the game is over.
    ///
    /// With no legal moves this is checkmate or stalemate (stalemate is also recorded
    /// in the draw flag). Otherwise any draw recorded by the last move applies.
    pub fn outcome(&mut self) -> Outcome {
        if count_legal_moves(self) == 0 {
            if self.in_check {
                return Outcome::Checkmate {
                    winner: !self.side_to_move,
                };
            }
            self.mark_stalemate();
            return Outcome::Draw(DrawKind::Stalemate);
        }
        match self.draw {
            Some(kind) => Outcome::Draw(kind),
            None => Outcome::Ongoing,
        }
    }

    /// Match a parsed move against the legal moves of this position.
    ///
    /// A promoting move written without a piece promotes to a queen. A piece on a move
    /// that does not promote is rejected.
    pub fn find_legal(&mut self, wanted: Move) -> Result<Move, MoveError> {
        let moves = generate_legal_moves(self);
        let mut candidates = moves
            .as_slice()
            .iter()
            .filter(|mv| mv.from() == wanted.from() && mv.to() == wanted.to())
            .peekable();

        let Some(&first) = candidates.peek().copied() else {
            return Err(MoveError::Illegal {
                text: wanted.to_string(),
            });
        };

        match (wanted.promotion(), first.promotion()) {
            (None, None) => Ok(first),
            (Some(_), None) => Err(MoveError::UnexpectedPromotion {
                text: wanted.to_string(),
            }),
            (wanted_kind, Some(_)) => {
                let kind = wanted_kind.unwrap_or(PieceKind::Queen);
                candidates
                    .find(|mv| mv.promotion() == Some(kind))
                    .copied()
                    .ok_or_else(|| MoveError::Illegal {
                        text: wanted.to_string(),
                    })
            }
        }
    }

    /// Validate the grid and every cache against a direct board scan.
    ///
    /// Also rejects en-passant targets that no double step could have left and
    /// positions where the side that just moved is still in check.
    pub fn validate(&self) -> Result<(), PositionError> {
        for index in 0..GRID_SIZE {
            let cell = self.cells[index];
            let row = index / GRID_WIDTH;
            let col = index % GRID_WIDTH;
            let playable = (BORDER_WIDTH..BORDER_WIDTH + 8).contains(&row)
                && (BORDER_WIDTH..BORDER_WIDTH + 8).contains(&col);
            if playable == cell.is_border() || (!playable && cell != Cell::BORDER) {
                return Err(PositionError::CorruptBorder { index });
            }
            if playable && !cell.is_empty() && (cell.kind().is_none() || cell.raw() & 0x20 != 0) {
                return Err(PositionError::InvalidCell {
                    index,
                    raw: cell.raw(),
                });
            }
        }

        let mut material = [0i32; Color::COUNT];
        let mut pawns = [0u8; Color::COUNT];
        let mut kings = [0u32; Color::COUNT];
        for sq in Square::all() {
            let cell = self.cells[sq.index()];
            let Some(kind) = cell.kind() else { continue };
            let side = cell.color().index();
            material[side] += kind.value();
            match kind {
                PieceKind::Pawn => {
                    if sq.rank() == 0 || sq.rank() == 7 {
                        return Err(PositionError::PawnsOnBackRank);
                    }
                    pawns[side] += 1;
                }
                PieceKind::King => kings[side] += 1,
                _ => {}
            }
        }

        for color in Color::ALL {
            let side = color.index();
            if kings[side] != 1 {
                return Err(PositionError::InvalidKingCount {
                    color: color.name(),
                    count: kings[side],
                });
            }
            if !self.cells[self.kings[side].index()].is(PieceKind::King, color) {
                return Err(PositionError::KingCacheMismatch { color: color.name() });
            }
            if material[side] != self.material[side] {
                return Err(PositionError::MaterialMismatch {
                    color: color.name(),
                    cached: self.material[side],
                    actual: material[side],
                });
            }
            if pawns[side] != self.pawns[side] {
                return Err(PositionError::PawnCountMismatch {
                    color: color.name(),
                    cached: self.pawns[side],
                    actual: pawns[side],
                });
            }
            if let Some(sq) = self.en_passant[side] {
                let double_step_rank = if color == Color::White { 3 } else { 4 };
                if color == self.side_to_move
                    || sq.rank() != double_step_rank
                    || !self.cells[sq.index()].is(PieceKind::Pawn, color)
                {
                    return Err(PositionError::StaleEnPassant { color: color.name() });
                }
            }
        }

        let waiting = !self.side_to_move;
        if self.king_in_check(waiting) {
            return Err(PositionError::OpponentInCheck {
                color: waiting.name(),
            });
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this position.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{}\")", self)
    }
}

/// Wrapper for printing a position as a two-letter-code grid seen from the mover's
/// side, followed by a status line.
pub struct PrettyBoard<'a>(&'a Position);

impl PrettyBoard<'_> {
    fn square(f: &mut fmt::Formatter<'_>, pos: &Position, sq: Square) -> fmt::Result {
        match pos.cell(sq).code() {
            Some([side, kind]) => write!(f, " {side}{kind}"),
            None if sq.is_light() => write!(f, " --"),
            None => write!(f, " **"),
        }
    }
}

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.0;
        let (ranks, files, header): (Vec<u8>, Vec<u8>, &str) = match pos.side_to_move {
            Color::White => (
                (0..8).rev().collect(),
                (0..8).collect(),
                "    a  b  c  d  e  f  g  h",
            ),
            Color::Black => (
                (0..8).collect(),
                (0..8).rev().collect(),
                "    h  g  f  e  d  c  b  a",
            ),
        };

        writeln!(f, "{header}")?;
        writeln!(f)?;
        for &rank in &ranks {
            write!(f, "{}  ", rank + 1)?;
            for &file in &files {
                PrettyBoard::square(f, pos, Square::new(rank, file))?;
            }
            writeln!(f, "   {}", rank + 1)?;
        }
        writeln!(f)?;
        writeln!(f, "{header}")?;
        writeln!(f)?;

        let mut scratch = *pos;
        let moves = count_legal_moves(&mut scratch);
        let plural = if moves == 1 { "" } else { "s" };
        write!(f, "{}: {} ", pos.move_number, pos.side_to_move.name())?;
        match (pos.in_check, moves) {
            (true, 0) => write!(f, "is checkmated")?,
            (true, n) => write!(f, "is in check with {n} move{plural}")?,
            (false, 0) => write!(f, "is stalemated")?,
            (false, n) => write!(f, "has {n} move{plural}")?,
        }
        if moves > 0
            && let Some(kind) = pos.draw
        {
            write!(f, ", drawn by {kind}")?;
        }

        let white_up = pos.material(Color::White) - pos.material(Color::Black);
        match white_up.signum() {
            0 => write!(f, " (material even)"),
            1 => write!(f, " (white up {white_up})"),
            _ => write!(f, " (black up {})", -white_up),
        }
    }
}
