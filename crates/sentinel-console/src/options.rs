//! Command-line options.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use sentinel_core::Color;

use crate::error::ConsoleError;

/// Usage and console command summary.
pub const HELP: &str = "
 Usage:   sentinel [options] [saved game to load on startup]

 Options:
  -H:     display this help message
  -R:     randomize for different games
  -Tn:    maximum thread count, 0 or 1 for single-threaded
  -Gn:    specify number of games to play (otherwise stops on input)
  -Wn:    computer plays white at level n (1 to about 6; higher is slower)
  -Bn:    computer plays black at level n (1 to about 6; higher is slower)

 Commands:
  H <cr>:        display this help message
  W n <cr>:      computer plays white at level n
  B n <cr>:      computer plays black at level n
  E n <cr>:      evaluate legal moves at level n (default=1)
  T n <cr>:      take back n moves (default=1)
  W <cr>:        returns white play to user
  B <cr>:        returns black play to user
  S <file><cr>:  save game to specified file
  L <file><cr>:  load game from specified file
  R <cr>:        resign game and start new game
  Q <cr>:        resign game and quit
";

/// Console settings from the command line, adjustable at runtime.
///
/// A level above zero has the computer search at that depth; zero leaves the side to
/// the user; a negative level plays random legal moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Print the help text on startup.
    pub help: bool,
    /// Seed move scrambling from the clock instead of a fixed state.
    pub randomize: bool,
    /// Root search workers; 0 or 1 searches on one thread.
    pub max_workers: usize,
    /// Games to play before exiting; 0 plays until stopped.
    pub games_to_play: u32,
    pub white_level: i32,
    pub black_level: i32,
    /// Saved game replayed into the first game.
    pub saved_game: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            help: false,
            randomize: false,
            max_workers: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            games_to_play: 0,
            white_level: 0,
            black_level: 0,
            saved_game: None,
        }
    }
}

impl ConsoleConfig {
    /// Parse program arguments, excluding the program name.
    ///
    /// Options start with `-`, take their number directly after the letter (`-W3`) and
    /// are case-insensitive. At most one other argument is accepted: the
    /// saved game to load.
    pub fn from_args<I, S>(args: I) -> Result<ConsoleConfig, ConsoleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = ConsoleConfig::default();

        for arg in args {
            let arg = arg.into();
            let Some(option) = arg.strip_prefix('-') else {
                if config.saved_game.is_some() {
                    return Err(ConsoleError::ExtraArgument { argument: arg });
                }
                config.saved_game = Some(PathBuf::from(arg));
                continue;
            };

            let mut chars = option.chars();
            let letter = chars.next().map(|c| c.to_ascii_uppercase());
            let value = chars.as_str();
            match letter {
                Some('H') => config.help = true,
                Some('R') => config.randomize = true,
                Some('G') => config.games_to_play = parse_number('G', value)?,
                Some('W') => config.white_level = parse_number('W', value)?,
                Some('B') => config.black_level = parse_number('B', value)?,
                Some('T') => config.max_workers = parse_number('T', value)?,
                _ => return Err(ConsoleError::IllegalOption { option: arg }),
            }
        }
        Ok(config)
    }

    /// Level for `color`.
    pub fn level(&self, color: Color) -> i32 {
        match color {
            Color::White => self.white_level,
            Color::Black => self.black_level,
        }
    }

    pub fn set_level(&mut self, color: Color, level: i32) {
        match color {
            Color::White => self.white_level = level,
            Color::Black => self.black_level = level,
        }
    }

    /// `true` if the computer moves for either side.
    pub fn computer_plays(&self) -> bool {
        self.white_level != 0 || self.black_level != 0
    }

    /// `true` if no side is left to the user.
    pub fn self_play(&self) -> bool {
        self.white_level != 0 && self.black_level != 0
    }
}

/// Parse a number; empty text is zero.
pub(crate) fn parse_number<T>(name: char, value: &str) -> Result<T, ConsoleError>
where
    T: std::str::FromStr + Default,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(T::default());
    }
    value.parse().map_err(|_| ConsoleError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ConsoleConfig, ConsoleError> {
        ConsoleConfig::from_args(args.iter().copied())
    }

    #[test]
    fn no_arguments() {
        let config = parse(&[]).expect("empty arguments are fine");
        assert!(!config.help);
        assert!(!config.computer_plays());
        assert_eq!(config.games_to_play, 0);
        assert!(config.max_workers >= 1);
    }

    #[test]
    fn levels_games_and_threads() {
        let config = parse(&["-W3", "-b2", "-G10", "-T1", "-r"]).expect("valid options");
        assert_eq!(config.level(Color::White), 3);
        assert_eq!(config.level(Color::Black), 2);
        assert_eq!(config.games_to_play, 10);
        assert_eq!(config.max_workers, 1);
        assert!(config.randomize);
        assert!(config.self_play());
    }

    #[test]
    fn negative_level_plays_randomly() {
        let config = parse(&["-W-1"]).expect("valid options");
        assert_eq!(config.white_level, -1);
        assert!(config.computer_plays());
        assert!(!config.self_play());
    }

    #[test]
    fn saved_game_argument() {
        let config = parse(&["-h", "game.txt"]).expect("valid options");
        assert!(config.help);
        assert_eq!(config.saved_game, Some(PathBuf::from("game.txt")));
    }

    #[test]
    fn second_positional_rejected() {
        assert!(matches!(
            parse(&["a.txt", "b.txt"]),
            Err(ConsoleError::ExtraArgument { argument }) if argument == "b.txt"
        ));
    }

    #[test]
    fn unknown_option_rejected() {
        assert!(matches!(
            parse(&["-X"]),
            Err(ConsoleError::IllegalOption { option }) if option == "-X"
        ));
        assert!(matches!(parse(&["-"]), Err(ConsoleError::IllegalOption { .. })));
    }

    #[test]
    fn bad_number_rejected() {
        assert!(matches!(
            parse(&["-Wabc"]),
            Err(ConsoleError::InvalidNumber { name: 'W', .. })
        ));
    }

    #[test]
    fn set_level_at_runtime() {
        let mut config = ConsoleConfig::default();
        config.set_level(Color::Black, 4);
        assert_eq!(config.level(Color::Black), 4);
        assert!(config.computer_plays());
    }
}
