//! Contents of one grid cell, bit-packed into a single byte.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

const KIND_MASK: u8 = 0x07;
const COLOR_BIT: u8 = 0x08;
const MOVED_BIT: u8 = 0x10;
const PINNED_BIT: u8 = 0x40;
const BORDER_BIT: u8 = 0x80;

/// Contents of a grid cell, bit-packed into a single byte.
///
/// Bit layout:
/// - bits 0-2: [`PieceKind`] code (0 = empty)
/// - bit 3: [`Color`] (0 = White, 1 = Black)
/// - bit 4: the piece has moved at least once
/// - bit 6: the piece is pinned to its own king (transient)
/// - bit 7: border cell, never playable
///
/// An empty playable cell is always exactly `0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell(u8);

impl Cell {
    /// An empty playable cell.
    pub const EMPTY: Cell = Cell(0);

    /// An impassable border cell.
    pub const BORDER: Cell = Cell(BORDER_BIT);

    /// Create an unmoved, unpinned piece.
    #[inline]
    pub const fn piece(kind: PieceKind, color: Color) -> Cell {
        Cell(kind.code() | (color as u8) << 3)
    }

    /// Reinterpret a raw byte (used by snapshot decoding).
    #[inline]
    pub const fn from_raw(raw: u8) -> Cell {
        Cell(raw)
    }

    /// Return the raw byte.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// `true` for a playable cell holding nothing.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` for a border cell.
    #[inline]
    pub const fn is_border(self) -> bool {
        self.0 & BORDER_BIT != 0
    }

    /// The piece kind, if a piece stands here.
    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        PieceKind::from_code(self.0 & KIND_MASK)
    }

    /// `true` if a piece stands here.
    #[inline]
    pub const fn is_piece(self) -> bool {
        self.0 & KIND_MASK != 0
    }

    /// The color bit. Only meaningful when [`is_piece`](Self::is_piece) holds.
    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & COLOR_BIT == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// `true` if a piece of `color` stands here.
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        self.is_piece() && (self.0 & COLOR_BIT) == (color as u8) << 3
    }

    /// `true` if this cell holds exactly `kind` of `color`, ignoring flag bits.
    #[inline]
    pub const fn is(self, kind: PieceKind, color: Color) -> bool {
        self.0 & (KIND_MASK | COLOR_BIT) == Cell::piece(kind, color).0
    }

    /// `true` if a mover standing on `from` may land here: empty, or an opposing piece.
    #[inline]
    pub const fn accepts(self, from: Cell) -> bool {
        self.is_empty() || (self.is_piece() && (self.0 ^ from.0) & COLOR_BIT != 0)
    }

    /// `true` if an opposing piece stands here relative to `from`.
    #[inline]
    pub const fn is_enemy_of(self, from: Cell) -> bool {
        self.is_piece() && (self.0 ^ from.0) & COLOR_BIT != 0
    }

    /// `true` if the piece has moved.
    #[inline]
    pub const fn has_moved(self) -> bool {
        self.0 & MOVED_BIT != 0
    }

    /// `true` if the piece is marked pinned.
    #[inline]
    pub const fn is_pinned(self) -> bool {
        self.0 & PINNED_BIT != 0
    }

    /// Return a copy with the moved flag set.
    #[inline]
    pub const fn moved(self) -> Cell {
        Cell(self.0 | MOVED_BIT)
    }

    /// Return a copy with the pinned flag set or cleared.
    #[inline]
    pub const fn with_pinned(self, pinned: bool) -> Cell {
        if pinned {
            Cell(self.0 | PINNED_BIT)
        } else {
            Cell(self.0 & !PINNED_BIT)
        }
    }

    /// Piece kind and color bits only, the part folded into position fingerprints.
    #[inline]
    pub const fn identity(self) -> u8 {
        self.0 & (KIND_MASK | COLOR_BIT)
    }

    /// Two-letter display code (`WP`, `BK`, ...), if a piece stands here.
    pub fn code(self) -> Option<[char; 2]> {
        let kind = self.kind()?;
        let side = match self.color() {
            Color::White => 'W',
            Color::Black => 'B',
        };
        Some([side, kind.fen_char().to_ascii_uppercase()])
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_border() {
            return write!(f, "##");
        }
        match self.code() {
            Some([side, kind]) => {
                write!(f, "{side}{kind}")?;
                if self.has_moved() {
                    write!(f, "'")?;
                }
                if self.is_pinned() {
                    write!(f, "!")?;
                }
                Ok(())
            }
            None => write!(f, ".."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;
    use crate::color::Color;
    use crate::piece_kind::PieceKind;

    #[test]
    fn piece_roundtrip() {
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let cell = Cell::piece(kind, color);
                assert_eq!(cell.kind(), Some(kind));
                assert_eq!(cell.color(), color);
                assert!(cell.is(kind, color));
                assert!(!cell.is(kind, !color));
                assert!(!cell.has_moved() && !cell.is_pinned() && !cell.is_border());
            }
        }
    }

    #[test]
    fn flags_are_independent() {
        let cell = Cell::piece(PieceKind::Rook, Color::Black).moved().with_pinned(true);
        assert!(cell.has_moved());
        assert!(cell.is_pinned());
        assert!(cell.is(PieceKind::Rook, Color::Black));
        assert_eq!(cell.identity(), Cell::piece(PieceKind::Rook, Color::Black).raw());

        let unpinned = cell.with_pinned(false);
        assert!(!unpinned.is_pinned());
        assert!(unpinned.has_moved());
    }

    #[test]
    fn empty_and_border() {
        assert!(Cell::EMPTY.is_empty());
        assert!(!Cell::EMPTY.is_piece());
        assert!(Cell::BORDER.is_border());
        assert!(!Cell::BORDER.is_empty());
        assert!(!Cell::BORDER.is_piece());
        assert_eq!(Cell::BORDER.kind(), None);
    }

    #[test]
    fn accepts_targets() {
        let white_rook = Cell::piece(PieceKind::Rook, Color::White);
        let black_pawn = Cell::piece(PieceKind::Pawn, Color::Black).moved();
        let white_pawn = Cell::piece(PieceKind::Pawn, Color::White);

        assert!(Cell::EMPTY.accepts(white_rook));
        assert!(black_pawn.accepts(white_rook));
        assert!(!white_pawn.accepts(white_rook));
        assert!(!Cell::BORDER.accepts(white_rook));
        assert!(black_pawn.is_enemy_of(white_rook));
        assert!(!Cell::EMPTY.is_enemy_of(white_rook));
    }

    #[test]
    fn display_codes() {
        assert_eq!(Cell::piece(PieceKind::King, Color::Black).code(), Some(['B', 'K']));
        assert_eq!(Cell::piece(PieceKind::Pawn, Color::White).code(), Some(['W', 'P']));
        assert_eq!(Cell::EMPTY.code(), None);
        assert_eq!(format!("{:?}", Cell::piece(PieceKind::Queen, Color::White).moved()), "WQ'");
    }
}
