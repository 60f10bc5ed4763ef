//! Game records: numbered move pairs, one line per full move.
//!
//! ```text
//!   1: e2-e4   e7-e5
//!   2: g1-f3   b8-c6
//!   3: f1-b5
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::chess_move::Move;
use crate::error::{MoveError, RecordError};
use crate::position::Position;

/// A sequence of moves from the starting position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameRecord {
    /// Each move with the one-based line it was read from (0 when built in memory).
    entries: Vec<(usize, Move)>,
}

impl GameRecord {
    /// Build a record from moves played from the starting position.
    pub fn new(moves: &[Move]) -> GameRecord {
        GameRecord {
            entries: moves.iter().map(|&mv| (0, mv)).collect(),
        }
    }

    /// Number of half-moves in the record.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the record holds no moves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The recorded moves, in order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.entries.iter().map(|&(_, mv)| mv)
    }

    /// Replay the record from the starting position.
    ///
    /// Every move is matched against the legal moves of the position it is played
    /// in, so the returned moves carry the promotion the game actually used.
    pub fn replay(&self) -> Result<(Position, Vec<Move>), RecordError> {
        let mut pos = Position::starting_position();
        let mut played = Vec::with_capacity(self.entries.len());
        for &(line, wanted) in &self.entries {
            let mv = pos
                .find_legal(wanted)
                .map_err(|source| RecordError::BadMove { line, source })?;
            pos.apply_move(mv);
            played.push(mv);
        }
        debug!(moves = played.len(), position = %pos, "game record replayed");
        Ok((pos, played))
    }
}

impl FromStr for GameRecord {
    type Err = RecordError;

    fn from_str(text: &str) -> Result<GameRecord, RecordError> {
        let mut entries = Vec::new();
        let mut incomplete = false;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }
            if incomplete {
                return Err(RecordError::TrailingMoves { line });
            }

            let (number, rest) = raw
                .split_once(':')
                .ok_or(RecordError::MalformedLine { line })?;
            let found: u32 = number
                .trim()
                .parse()
                .map_err(|_| RecordError::MalformedLine { line })?;
            let expected = (entries.len() / 2 + 1) as u32;
            if found != expected {
                return Err(RecordError::OutOfSequence {
                    line,
                    expected,
                    found,
                });
            }

            let tokens: Vec<&str> = rest.split_whitespace().collect();
            if tokens.is_empty() || tokens.len() > 2 {
                return Err(RecordError::MalformedLine { line });
            }
            for token in &tokens {
                let mv: Move = token.parse().map_err(|err| RecordError::BadMove {
                    line,
                    source: MoveError::Notation(err),
                })?;
                entries.push((line, mv));
            }
            incomplete = tokens.len() == 1;
        }

        if entries.is_empty() {
            return Err(RecordError::Empty);
        }
        Ok(GameRecord { entries })
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.entries.len().saturating_sub(1);
        for (index, (_, mv)) in self.entries.iter().enumerate() {
            if index % 2 == 0 {
                write!(f, "{:3}: ", index / 2 + 1)?;
            }
            write!(f, "{:<8}", mv.to_string())?;
            if index % 2 == 1 || index == last {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GameRecord;
    use crate::error::{MoveError, RecordError};
    use crate::piece_kind::PieceKind;

    const SCHOLARS_MATE: &str = "  1: e2-e4   e7-e5   \n  2: f1-c4   b8-c6   \n  3: d1-h5   g8-f6   \n  4: h5-f7   \n";

    #[test]
    fn parse_and_write() {
        let record: GameRecord = SCHOLARS_MATE.parse().expect("valid record");
        assert_eq!(record.len(), 7);
        assert_eq!(record.to_string(), SCHOLARS_MATE);
    }

    #[test]
    fn replay_reaches_mate() {
        let record: GameRecord = SCHOLARS_MATE.parse().expect("valid record");
        let (mut pos, moves) = record.replay().expect("legal game");
        assert_eq!(moves.len(), 7);
        assert!(pos.in_check());
        assert!(pos.outcome().is_over());
    }

    #[test]
    fn write_then_parse() {
        let record: GameRecord = SCHOLARS_MATE.parse().expect("valid record");
        let (_, moves) = record.replay().expect("legal game");
        let written = GameRecord::new(&moves).to_string();
        let reparsed: GameRecord = written.parse().expect("valid record");
        assert_eq!(reparsed.moves().collect::<Vec<_>>(), moves);
    }

    #[test]
    fn replay_fills_in_queen_promotion() {
        let text = "1: a2-a4 b7-b5\n2: a4-b5 a7-a6\n3: b5-a6 c8-b7\n4: a6-b7 e7-e6\n5: b7-a8\n";
        let record: GameRecord = text.parse().expect("valid record");
        let (pos, moves) = record.replay().expect("legal game");
        assert_eq!(moves[8].promotion(), Some(PieceKind::Queen));
        assert!(GameRecord::new(&moves).to_string().ends_with("  5: b7-a8/Q \n"));
        assert_eq!(pos.pawn_count(crate::color::Color::White), 7);
    }

    #[test]
    fn empty_record() {
        assert_eq!("".parse::<GameRecord>(), Err(RecordError::Empty));
        assert_eq!("\n  \n".parse::<GameRecord>(), Err(RecordError::Empty));
    }

    #[test]
    fn numbering_must_be_sequential() {
        let err = "1: e2-e4 e7-e5\n3: g1-f3 b8-c6\n".parse::<GameRecord>();
        assert_eq!(
            err,
            Err(RecordError::OutOfSequence {
                line: 2,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn moves_after_half_pair_rejected() {
        let err = "1: e2-e4\n2: g1-f3 b8-c6\n".parse::<GameRecord>();
        assert_eq!(err, Err(RecordError::TrailingMoves { line: 2 }));
    }

    #[test]
    fn malformed_lines() {
        assert_eq!("e2-e4 e7-e5".parse::<GameRecord>(), Err(RecordError::MalformedLine { line: 1 }));
        assert_eq!("x: e2-e4".parse::<GameRecord>(), Err(RecordError::MalformedLine { line: 1 }));
        assert!(matches!(
            "1: e2-e4 e7-e5 g1-f3".parse::<GameRecord>(),
            Err(RecordError::MalformedLine { line: 1 })
        ));
        assert!(matches!(
            "1: e2e4".parse::<GameRecord>(),
            Err(RecordError::BadMove {
                line: 1,
                source: MoveError::Notation(_)
            })
        ));
    }

    #[test]
    fn illegal_move_reports_line() {
        let record: GameRecord = "1: e2-e4 e7-e5\n2: e4-e5 d7-d6\n".parse().expect("valid record");
        assert!(matches!(
            record.replay(),
            Err(RecordError::BadMove {
                line: 2,
                source: MoveError::Illegal { .. }
            })
        ));
    }
}
