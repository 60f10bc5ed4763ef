//! Console errors.

use std::path::PathBuf;

use sentinel_core::{MoveError, RecordError};

/// Errors raised while parsing options or commands and handling game files.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A command-line option that is not recognised.
    #[error("illegal option: {option}")]
    IllegalOption {
        /// The option as given.
        option: String,
    },

    /// A second positional argument after the saved-game path.
    #[error("argument ignored: {argument}")]
    ExtraArgument { argument: String },

    /// A numeric option or command argument that is not a number.
    #[error("invalid number for {name}: {value}")]
    InvalidNumber { name: char, value: String },

    /// A console line that is neither a move nor a known command.
    #[error("illegal command: {command}")]
    UnknownCommand { command: String },

    /// `S` or `L` without a file name.
    #[error("need filename")]
    MissingFilename,

    /// A take-back request with no moves played.
    #[error("no moves to take back")]
    NothingToTakeBack,

    /// A move that does not parse or is not legal.
    #[error("invalid move: {0}")]
    Move(#[from] MoveError),

    /// A game file that could not be parsed or replayed.
    #[error("invalid game file {}: {source}", path.display())]
    InvalidGameFile {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    /// A game file that could not be opened, read or written.
    #[error("can't open file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error on the console streams.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
