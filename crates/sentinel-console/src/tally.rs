//! Running statistics over finished games.

use std::fmt;
use std::time::Duration;

use sentinel_core::{Color, Position};

/// Results and lengths of the games played in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    games: u32,
    white_wins: u32,
    black_wins: u32,
    draws: u32,
    /// Drawn games where White was ahead in material.
    white_ahead_draws: u32,
    black_ahead_draws: u32,
    /// Half-moves played across all games.
    total_moves: u64,
    min_moves: Option<u16>,
    max_moves: u16,
    elapsed: Duration,
}

impl Tally {
    pub fn new() -> Tally {
        Tally::default()
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn white_wins(&self) -> u32 {
        self.white_wins
    }

    pub fn black_wins(&self) -> u32 {
        self.black_wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Record a finished game from its final position.
    ///
    /// A drawn position is a draw; otherwise the side to move has lost, whether by
    /// checkmate or by resigning.
    pub fn record(&mut self, end: &Position) {
        self.games += 1;

        if end.is_drawn() {
            self.draws += 1;
            let white = end.material(Color::White);
            let black = end.material(Color::Black);
            if white > black {
                self.white_ahead_draws += 1;
            } else if black > white {
                self.black_ahead_draws += 1;
            }
        } else {
            match end.side_to_move() {
                Color::White => self.black_wins += 1,
                Color::Black => self.white_wins += 1,
            }
        }

        let move_number = end.move_number();
        let half_moves = 2 * u64::from(move_number)
            - match end.side_to_move() {
                Color::White => 2,
                Color::Black => 1,
            };
        self.total_moves += half_moves;
        self.min_moves = Some(self.min_moves.map_or(move_number, |min| min.min(move_number)));
        self.max_moves = self.max_moves.max(move_number);
    }

    /// Record the session's wall-clock time for the summary.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }
}

fn were(count: u32) -> &'static str {
    if count == 1 { "was" } else { "were" }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.games == 1 {
            if self.white_wins + self.black_wins > 0 {
                let winner = if self.white_wins > 0 { "white" } else { "black" };
                writeln!(f, "1 game, {winner} won")?;
            } else if self.white_ahead_draws + self.black_ahead_draws > 0 {
                let ahead = if self.white_ahead_draws > 0 { "white" } else { "black" };
                writeln!(f, "1 drawn game, but {ahead} was ahead in material")?;
            } else {
                writeln!(f, "1 drawn game")?;
            }
        } else if self.draws > 0 {
            writeln!(
                f,
                "{} games total, white won {} and black won {}, {} {} drawn",
                self.games,
                self.white_wins,
                self.black_wins,
                self.draws,
                were(self.draws)
            )?;
            match (self.white_ahead_draws, self.black_ahead_draws) {
                (0, 0) => {}
                (white, 0) => {
                    writeln!(f, "of the drawn games, white was ahead in material in {white}")?
                }
                (0, black) => {
                    writeln!(f, "of the drawn games, black was ahead in material in {black}")?
                }
                (white, black) => writeln!(
                    f,
                    "of the drawn games, white was ahead in material in {white} and black was in {black}"
                )?,
            }
        } else {
            writeln!(
                f,
                "{} games total, white won {} and black won {}",
                self.games, self.white_wins, self.black_wins
            )?;
        }

        writeln!(f, "{} total moves made", self.total_moves)?;
        writeln!(f, "{} max moves per game", self.max_moves)?;
        writeln!(f, "{} min moves per game", self.min_moves.unwrap_or(0))?;
        write!(f, "play time: {} seconds", self.elapsed.as_secs())
    }
}
