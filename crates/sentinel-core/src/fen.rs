//! FEN string parsing and serialization for [`Position`].
//!
//! The grid has no castling-rights field; rights map onto the "has moved" flags of
//! the king and rooks instead. The FEN en-passant square (the square skipped) maps
//! onto the square of the pawn that can be captured.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::cell::Cell;
use crate::color::Color;
use crate::error::FenError;
use crate::piece_kind::PieceKind;
use crate::position::{FINGERPRINT_WINDOW, Position};
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Home squares of the king and of the king-side and queen-side rooks.
const fn castling_squares(color: Color) -> (Square, Square, Square) {
    match color {
        Color::White => (Square::E1, Square::H1, Square::A1),
        Color::Black => (Square::E8, Square::H8, Square::A8),
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut pos = Position::empty();

        for (rank_index, rank_str) in ranks.iter().enumerate() {
            // FEN ranks go from 8 to 1 (top to bottom)
            let rank = 7 - rank_index as u8;
            let mut file: u8 = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file += digit as u8;
                    if file > 8 {
                        return Err(FenError::BadRankLength {
                            rank_index,
                            length: file as usize,
                        });
                    }
                    continue;
                }

                let kind = PieceKind::from_fen_char(c)
                    .ok_or(FenError::InvalidPieceChar { character: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };

                if file >= 8 {
                    return Err(FenError::BadRankLength {
                        rank_index,
                        length: file as usize + 1,
                    });
                }

                let sq = Square::new(rank, file);
                let mut cell = Cell::piece(kind, color);
                // Only castling pieces and pawns on their start rank stay unmoved.
                let start_rank = if color == Color::White { 1 } else { 6 };
                if matches!(kind, PieceKind::King | PieceKind::Rook)
                    || (kind == PieceKind::Pawn && rank != start_rank)
                {
                    cell = cell.moved();
                }
                pos.cells[sq.index()] = cell;
                file += 1;
            }

            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file as usize,
                });
            }
        }

        pos.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        apply_castling(&mut pos, fields[2])?;

        if fields[3] != "-" {
            let invalid = || FenError::InvalidEnPassant {
                found: fields[3].to_string(),
            };
            let skipped = Square::from_algebraic(fields[3]).ok_or_else(invalid)?;
            let mover = !pos.side_to_move;
            let expected_rank = if mover == Color::White { 2 } else { 5 };
            if skipped.rank() != expected_rank {
                return Err(invalid());
            }
            let pawn = skipped.offset(12 * mover.forward());
            if !pos.cells[pawn.index()].is(PieceKind::Pawn, mover) {
                return Err(invalid());
            }
            pos.en_passant[mover.index()] = Some(pawn);
        }

        let halfmove_clock = match fields.get(4) {
            Some(field) => field.parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
                field: "halfmove clock",
                found: field.to_string(),
            })?,
            None => 0,
        };

        let move_number = match fields.get(5) {
            Some(field) => field
                .parse::<u16>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| FenError::InvalidMoveCounter {
                    field: "fullmove number",
                    found: field.to_string(),
                })?,
            None => 1,
        };

        pos.move_number = move_number;
        pos.reversible_moves = halfmove_clock;
        pos.refresh_caches();
        pos.validate()
            .inspect_err(|err| debug!(fen, error = %err, "FEN position rejected"))?;

        if (halfmove_clock as usize) < FINGERPRINT_WINDOW {
            pos.fingerprints[halfmove_clock as usize] = pos.fingerprint();
        }

        Ok(pos)
    }
}

fn apply_castling(pos: &mut Position, field: &str) -> Result<(), FenError> {
    let invalid = || FenError::InvalidCastling {
        found: field.to_string(),
    };
    if field == "-" {
        return Ok(());
    }
    if field.is_empty() {
        return Err(invalid());
    }

    for c in field.chars() {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let (king, king_rook, queen_rook) = castling_squares(color);
        let rook = match c.to_ascii_lowercase() {
            'k' => king_rook,
            'q' => queen_rook,
            _ => return Err(invalid()),
        };
        let king_cell = pos.cells[king.index()];
        let rook_cell = pos.cells[rook.index()];
        if !king_cell.is(PieceKind::King, color) || !rook_cell.is(PieceKind::Rook, color) {
            return Err(invalid());
        }
        pos.cells[king.index()] = Cell::piece(PieceKind::King, color);
        pos.cells[rook.index()] = Cell::piece(PieceKind::Rook, color);
    }
    Ok(())
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty_count = 0u8;

            for file in 0u8..8 {
                let cell = self.cell(Square::new(rank, file));
                match cell.kind() {
                    Some(kind) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        let c = match cell.color() {
                            Color::White => kind.fen_char().to_ascii_uppercase(),
                            Color::Black => kind.fen_char(),
                        };
                        write!(f, "{c}")?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }

            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} ", self.side_to_move)?;

        let mut any_rights = false;
        for color in Color::ALL {
            let (king, king_rook, queen_rook) = castling_squares(color);
            let king_cell = self.cell(king);
            if !king_cell.is(PieceKind::King, color) || king_cell.has_moved() {
                continue;
            }
            for (rook, letter) in [(king_rook, 'k'), (queen_rook, 'q')] {
                let rook_cell = self.cell(rook);
                if rook_cell.is(PieceKind::Rook, color) && !rook_cell.has_moved() {
                    let letter = match color {
                        Color::White => letter.to_ascii_uppercase(),
                        Color::Black => letter,
                    };
                    write!(f, "{letter}")?;
                    any_rights = true;
                }
            }
        }
        if !any_rights {
            write!(f, "-")?;
        }

        let mover = !self.side_to_move;
        match self.en_passant(mover) {
            Some(pawn) => write!(f, " {}", pawn.offset(-12 * mover.forward()))?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.reversible_moves, self.move_number)
    }
}
