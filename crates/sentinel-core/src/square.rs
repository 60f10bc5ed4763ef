//! Squares addressed as indices into the bordered 12x12 grid.

use std::fmt;

/// Width of the grid, playable files plus a two-cell border on each side.
pub const GRID_WIDTH: usize = 12;

/// Total number of grid cells, border included.
pub const GRID_SIZE: usize = GRID_WIDTH * GRID_WIDTH;

/// Width of the border margin around the 8x8 playing area.
pub const BORDER_WIDTH: usize = 2;

/// A grid cell index.
///
/// Index = (rank + 2) * 12 + (file + 2) with zero-based rank and file, so A1 = 26,
/// H1 = 33, A8 = 110, H8 = 117. Any direction offset added to an in-play square lands
/// on a valid grid index (possibly a border cell), so ray walks need no bounds checks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Create a square from a zero-based rank and file (both 0..8).
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Square {
        debug_assert!(rank < 8 && file < 8);
        Square((rank + 2) * GRID_WIDTH as u8 + file + 2)
    }

    /// Create a square from a grid index, returning `None` unless it is in play.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index >= GRID_SIZE {
            return None;
        }
        let row = index / GRID_WIDTH;
        let col = index % GRID_WIDTH;
        if row < BORDER_WIDTH
            || row >= BORDER_WIDTH + 8
            || col < BORDER_WIDTH
            || col >= BORDER_WIDTH + 8
        {
            return None;
        }
        Some(Square(index as u8))
    }

    /// Parse an algebraic notation string (e.g. "e4", case-insensitive) into a square.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let file_byte = bytes[0].to_ascii_lowercase();
        let rank_byte = bytes[1];

        if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
            return None;
        }

        Some(Square::new(rank_byte - b'1', file_byte - b'a'))
    }

    /// Return the grid index (0..144).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based rank (0 = rank 1).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / GRID_WIDTH as u8 - BORDER_WIDTH as u8
    }

    /// Zero-based file (0 = file a).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % GRID_WIDTH as u8 - BORDER_WIDTH as u8
    }

    /// Return the cell `delta` steps away.
    ///
    /// The result may be a border cell; callers test the cell contents before treating
    /// it as playable. Deltas never exceed 25 in magnitude, which the two-cell border
    /// absorbs.
    #[inline]
    pub const fn offset(self, delta: i8) -> Square {
        Square((self.0 as i16 + delta as i16) as u8)
    }

    /// `true` if this square is on the light color of the checkerboard.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }

    /// Iterate over the 64 in-play squares, rank 1 first, file a first within a rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..8).flat_map(|rank| (0u8..8).map(move |file| Square::new(rank, file)))
    }

    pub const A1: Square = Square::new(0, 0);
    pub const B1: Square = Square::new(0, 1);
    pub const C1: Square = Square::new(0, 2);
    pub const D1: Square = Square::new(0, 3);
    pub const E1: Square = Square::new(0, 4);
    pub const F1: Square = Square::new(0, 5);
    pub const G1: Square = Square::new(0, 6);
    pub const H1: Square = Square::new(0, 7);
    pub const A8: Square = Square::new(7, 0);
    pub const B8: Square = Square::new(7, 1);
    pub const C8: Square = Square::new(7, 2);
    pub const D8: Square = Square::new(7, 3);
    pub const E8: Square = Square::new(7, 4);
    pub const F8: Square = Square::new(7, 5);
    pub const G8: Square = Square::new(7, 6);
    pub const H8: Square = Square::new(7, 7);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
