//! Console input parsing: a move or a one-letter command.

use std::path::PathBuf;

use sentinel_core::{Color, Move};

use crate::error::ConsoleError;
use crate::options::parse_number;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A move in `e2-e4` or `a7-a8/Q` form, not yet checked for legality.
    Move(Move),
    /// `H`: show the help text.
    Help,
    /// `W n` or `B n`: set a side's level; 0 returns the side to the user.
    SetLevel { color: Color, level: i32 },
    /// `E n`: score every legal move at depths below `n`.
    Evaluate { depth: i32 },
    /// `T n`: take back `n` moves.
    TakeBack { count: usize },
    /// `S file`: save the game record.
    Save(PathBuf),
    /// `L file`: load a game record.
    Load(PathBuf),
    /// `R`: resign and start a new game.
    Resign,
    /// `Q`: resign and quit.
    Quit,
}

/// Parse a single non-empty console line.
///
/// Anything that reads as a move is a move; otherwise the first letter selects a
/// command and the rest of the line, trimmed, is its argument.
pub fn parse_command(line: &str) -> Result<Command, ConsoleError> {
    let line = line.trim();
    if let Ok(mv) = line.parse::<Move>() {
        return Ok(Command::Move(mv));
    }

    let mut chars = line.chars();
    let Some(letter) = chars.next() else {
        return Err(ConsoleError::UnknownCommand {
            command: String::new(),
        });
    };
    let letter = letter.to_ascii_uppercase();
    let argument = chars.as_str().trim();

    match letter {
        'H' => Ok(Command::Help),
        'Q' => Ok(Command::Quit),
        'R' => Ok(Command::Resign),
        'W' => Ok(Command::SetLevel {
            color: Color::White,
            level: parse_number(letter, argument)?,
        }),
        'B' => Ok(Command::SetLevel {
            color: Color::Black,
            level: parse_number(letter, argument)?,
        }),
        'E' => {
            let depth: i32 = parse_number(letter, argument)?;
            Ok(Command::Evaluate { depth: depth.max(1) })
        }
        'T' => {
            let count: usize = parse_number(letter, argument)?;
            Ok(Command::TakeBack {
                count: count.max(1),
            })
        }
        'S' | 'L' => {
            if argument.is_empty() {
                return Err(ConsoleError::MissingFilename);
            }
            let path = PathBuf::from(argument);
            Ok(if letter == 'S' {
                Command::Save(path)
            } else {
                Command::Load(path)
            })
        }
        _ => Err(ConsoleError::UnknownCommand {
            command: line.to_string(),
        }),
    }
}
