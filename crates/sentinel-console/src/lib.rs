//! Interactive console, self-play loop and game files for sentinel.

pub mod command;
pub mod console;
pub mod error;
pub mod game;
pub mod options;
pub mod tally;

pub use command::{Command, parse_command};
pub use console::{Console, spawn_stdin_reader};
pub use error::ConsoleError;
pub use game::Game;
pub use options::ConsoleConfig;
pub use tally::Tally;
