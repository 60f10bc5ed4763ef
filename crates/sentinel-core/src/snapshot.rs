//! Fixed-layout binary image of a [`Position`].
//!
//! Layout (multi-byte integers little-endian):
//!
//! | bytes | field |
//! |------:|-------|
//! | 4 | magic `SNTL` |
//! | 1 | format version |
//! | 144 | grid cells, raw |
//! | 2 | king squares (grid index), White then Black |
//! | 8 | material, two `i32` |
//! | 2 | pawn counts |
//! | 2 | en-passant pawn squares (0 = none) |
//! | 2 | reversible-move counter, `u16` |
//! | 200 | fingerprint history, fifty `u32` |
//! | 1 | side to move |
//! | 2 | move number, `u16` |
//! | 1 | in-check flag |
//! | 1 | draw kind (0 = none) |
//! | 3 | contested-square count and squares |

use tracing::debug;

use crate::cell::Cell;
use crate::color::Color;
use crate::draw::DrawKind;
use crate::error::SnapshotError;
use crate::position::{CONTESTED_CAPACITY, ContestedSquares, FINGERPRINT_WINDOW, Position};
use crate::square::{GRID_SIZE, Square};

const MAGIC: [u8; 4] = *b"SNTL";
const VERSION: u8 = 1;

/// Size of an encoded snapshot in bytes.
pub const SNAPSHOT_LEN: usize =
    4 + 1 + GRID_SIZE + 2 + 8 + 2 + 2 + 2 + 4 * FINGERPRINT_WINDOW + 1 + 2 + 1 + 1 + 1 + CONTESTED_CAPACITY;

/// Sequential reader over a snapshot whose length has already been checked.
struct Reader<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.at..self.at + N]);
        self.at += N;
        out
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    fn square(&mut self, field: &'static str) -> Result<Square, SnapshotError> {
        Square::from_index(self.u8() as usize).ok_or(SnapshotError::InvalidField { field })
    }

    fn optional_square(&mut self, field: &'static str) -> Result<Option<Square>, SnapshotError> {
        match self.u8() {
            0 => Ok(None),
            index => Square::from_index(index as usize)
                .map(Some)
                .ok_or(SnapshotError::InvalidField { field }),
        }
    }

    fn flag(&mut self, field: &'static str) -> Result<bool, SnapshotError> {
        match self.u8() {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(SnapshotError::InvalidField { field }),
        }
    }
}

fn square_byte(sq: Option<Square>) -> u8 {
    sq.map_or(0, |sq| sq.index() as u8)
}

impl Position {
    /// Encode the complete state, fingerprint history included.
    pub fn to_snapshot(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SNAPSHOT_LEN);
        out.extend_from_slice(&MAGIC);
        out.push(VERSION);
        out.extend(self.cells.iter().map(|cell| cell.raw()));
        for color in Color::ALL {
            out.push(self.kings[color.index()].index() as u8);
        }
        for color in Color::ALL {
            out.extend_from_slice(&self.material[color.index()].to_le_bytes());
        }
        out.extend_from_slice(&self.pawns);
        for color in Color::ALL {
            out.push(square_byte(self.en_passant[color.index()]));
        }
        out.extend_from_slice(&self.reversible_moves.to_le_bytes());
        for fingerprint in &self.fingerprints {
            out.extend_from_slice(&fingerprint.to_le_bytes());
        }
        out.push(self.side_to_move as u8);
        out.extend_from_slice(&self.move_number.to_le_bytes());
        out.push(self.in_check as u8);
        out.push(DrawKind::code(self.draw));
        out.push(self.contested.len() as u8);
        let mut listed = self.contested.iter();
        for _ in 0..CONTESTED_CAPACITY {
            out.push(square_byte(listed.next()));
        }
        debug_assert_eq!(out.len(), SNAPSHOT_LEN);
        out
    }

    /// Decode a snapshot produced by [`to_snapshot`](Self::to_snapshot).
    ///
    /// The decoded position must pass [`validate`](Self::validate) and its check flag
    /// must agree with the board.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Position, SnapshotError> {
        if bytes.len() != SNAPSHOT_LEN {
            return Err(SnapshotError::WrongLength {
                expected: SNAPSHOT_LEN,
                found: bytes.len(),
            });
        }
        let mut r = Reader { bytes, at: 0 };
        if r.take::<4>() != MAGIC {
            return Err(SnapshotError::BadMagic);
        }
        if r.u8() != VERSION {
            return Err(SnapshotError::InvalidField { field: "version" });
        }

        let mut pos = Position::empty();
        for cell in pos.cells.iter_mut() {
            *cell = Cell::from_raw(r.u8());
        }
        for color in Color::ALL {
            pos.kings[color.index()] = r.square("king square")?;
        }
        for color in Color::ALL {
            pos.material[color.index()] = r.i32();
        }
        pos.pawns = r.take();
        for color in Color::ALL {
            pos.en_passant[color.index()] = r.optional_square("en passant square")?;
        }
        pos.reversible_moves = r.u16();
        for fingerprint in pos.fingerprints.iter_mut() {
            *fingerprint = r.u32();
        }
        pos.side_to_move = match r.u8() {
            0 => Color::White,
            1 => Color::Black,
            _ => return Err(SnapshotError::InvalidField { field: "side to move" }),
        };
        pos.move_number = r.u16();
        if pos.move_number == 0 {
            return Err(SnapshotError::InvalidField { field: "move number" });
        }
        pos.in_check = r.flag("check flag")?;
        pos.draw = DrawKind::from_code(r.u8()).ok_or(SnapshotError::InvalidField { field: "draw kind" })?;

        let count = r.u8() as usize;
        if count > CONTESTED_CAPACITY {
            return Err(SnapshotError::InvalidField {
                field: "contested squares",
            });
        }
        let mut contested = ContestedSquares::default();
        for slot in 0..CONTESTED_CAPACITY {
            let sq = r.optional_square("contested squares")?;
            match (slot < count, sq) {
                (true, Some(sq)) => {
                    contested.push(sq);
                }
                (false, None) => {}
                _ => {
                    return Err(SnapshotError::InvalidField {
                        field: "contested squares",
                    });
                }
            }
        }
        pos.contested = contested;

        pos.validate()
            .inspect_err(|err| debug!(error = %err, "snapshot position rejected"))?;
        if pos.in_check != pos.king_in_check(pos.side_to_move) {
            return Err(SnapshotError::InvalidField { field: "check flag" });
        }
        Ok(pos)
    }
}
