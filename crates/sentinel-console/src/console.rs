//! The interactive and self-play loop.
//!
//! Console input arrives as whole lines on a channel fed by a reader thread, so the
//! loop can poll for a keypress between self-play games without blocking.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use sentinel_core::{Color, Move, generate_legal_moves};
use sentinel_engine::{MoveAnalysis, Scrambler, SearchConfig, SearchOptions, Searcher};
use tracing::{debug, warn};

use crate::command::{Command, parse_command};
use crate::error::ConsoleError;
use crate::game::Game;
use crate::options::{ConsoleConfig, HELP};
use crate::tally::Tally;

const SIGN_ON: &str = "\n SENTINEL  Mailbox Chess Engine\n";

const SEPARATOR: &str =
    "--------------------------------------------------------------------------";

const BELL: char = '\u{7}';

/// Spawn a thread forwarding stdin lines to the returned channel.
///
/// The channel disconnects when stdin closes.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// What the side to move does next.
enum Turn {
    Play(Move),
    /// Nothing to play yet; ask again.
    Stay,
    /// End the current game; the side to move loses.
    Resign,
    /// End the current game and the session.
    Quit,
}

/// Console session writing the board and moves to `out` and prompts and
/// diagnostics to `err`.
pub struct Console<W: Write, E: Write> {
    config: ConsoleConfig,
    searcher: Searcher,
    /// Picks moves for sides at a negative level.
    random: Scrambler,
    lines: Receiver<String>,
    out: W,
    err: E,
    quit: bool,
}

impl<W: Write, E: Write> Console<W, E> {
    pub fn new(config: ConsoleConfig, lines: Receiver<String>, out: W, err: E) -> Self {
        let seed = config.randomize.then(clock_seed);
        let searcher = Searcher::new(SearchConfig {
            depth: 1,
            options: SearchOptions {
                base_depth_boost: true,
                ..SearchOptions::default()
            },
            max_workers: config.max_workers,
            seed,
        });
        let random = seed.map_or_else(Scrambler::default, |seed| Scrambler::new(seed ^ 0x5a5a));
        Self {
            config,
            searcher,
            random,
            lines,
            out,
            err,
            quit: false,
        }
    }

    /// Play games until told to quit, the game limit is reached, or input arrives
    /// during self-play. Returns the session statistics.
    pub fn run(mut self) -> Result<Tally, ConsoleError> {
        writeln!(self.out, "{SIGN_ON}")?;
        if self.config.help {
            write!(self.out, "{HELP}")?;
        }

        let started = Instant::now();
        let mut tally = Tally::new();
        let mut saved_game = self.config.saved_game.take();

        while !self.quit && !(self.config.self_play() && self.input_pending()) {
            let mut game = Game::new();
            if let Some(path) = saved_game.take() {
                self.load_into(&mut game, &path)?;
            }

            self.play_game(&mut game)?;

            if game.has_started() {
                tally.record(game.position());
                writeln!(self.out, "\n\n{}", game.position().pretty())?;
                writeln!(self.out, "{SEPARATOR}")?;
                debug!(games = tally.games(), moves = game.moves().len(), "game finished");

                if self.config.games_to_play != 0 && tally.games() == self.config.games_to_play {
                    break;
                }
            }
        }

        tally.set_elapsed(started.elapsed());
        if tally.games() > 0 {
            writeln!(self.out, "{tally}")?;
        }
        self.out.flush()?;
        Ok(tally)
    }

    /// Play one game to its end, a resignation or a quit.
    fn play_game(&mut self, game: &mut Game) -> Result<(), ConsoleError> {
        loop {
            let outcome = game.position_mut().outcome();
            if outcome.is_over() {
                debug!(%outcome, "game over");
                return Ok(());
            }

            let side = game.position().side_to_move();
            let level = self.config.level(side);
            let turn = if level > 0 {
                self.searcher.set_depth(level);
                match self.searcher.search(game.position()).best_move {
                    Some(mv) => Turn::Play(mv),
                    None => Turn::Resign,
                }
            } else if level < 0 {
                let mut pos = *game.position();
                let mut moves = generate_legal_moves(&mut pos);
                self.random.shuffle(moves.as_mut_slice());
                Turn::Play(moves[0])
            } else {
                self.human_turn(game)?
            };

            match turn {
                Turn::Play(mv) => {
                    let number = game.position().move_number();
                    let played = game.play(mv)?;
                    match side {
                        Color::White => write!(self.out, "{number:3}: {:<8}", played.to_string())?,
                        Color::Black => writeln!(self.out, "{:<8}", played.to_string())?,
                    }
                    self.out.flush()?;
                }
                Turn::Stay => {}
                Turn::Resign => return Ok(()),
                Turn::Quit => {
                    self.quit = true;
                    return Ok(());
                }
            }
        }
    }

    /// Show the board, read one line and act on it.
    fn human_turn(&mut self, game: &mut Game) -> Result<Turn, ConsoleError> {
        writeln!(self.out, "\n\n{}", game.position().pretty())?;
        self.out.flush()?;
        write!(self.err, "input move or command: ")?;
        self.err.flush()?;

        let Ok(line) = self.lines.recv() else {
            return Ok(Turn::Quit);
        };
        if line.trim().is_empty() {
            return Ok(Turn::Stay);
        }

        match parse_command(&line) {
            Ok(Command::Move(wanted)) => match game.position_mut().find_legal(wanted) {
                Ok(mv) => Ok(Turn::Play(mv)),
                Err(err) => {
                    writeln!(self.err, "\n{err}\n{BELL}")?;
                    Ok(Turn::Stay)
                }
            },
            Ok(command) => self.execute(command, game),
            Err(err) => {
                writeln!(self.err, "\n{err}\n{BELL}")?;
                write!(self.err, "{HELP}")?;
                Ok(Turn::Stay)
            }
        }
    }

    fn execute(&mut self, command: Command, game: &mut Game) -> Result<Turn, ConsoleError> {
        match command {
            Command::Move(_) | Command::Help => write!(self.err, "{HELP}")?,
            Command::SetLevel { color, level } => {
                self.config.set_level(color, level);
                debug!(%color, level, "level changed");
            }
            Command::Evaluate { depth } => self.evaluate(game, depth)?,
            Command::TakeBack { count } => {
                let count = if self.config.computer_plays() { count * 2 } else { count };
                if game.take_back(count) == 0 {
                    self.report(&ConsoleError::NothingToTakeBack)?;
                }
            }
            Command::Save(path) => {
                if let Err(err) = game.save(&path) {
                    self.report(&err)?;
                }
            }
            Command::Load(path) => self.load_into(game, &path)?,
            Command::Resign => {
                if self.confirm()? {
                    return Ok(Turn::Resign);
                }
            }
            Command::Quit => {
                if self.confirm()? {
                    return Ok(Turn::Quit);
                }
            }
        }
        Ok(Turn::Stay)
    }

    /// Print every legal move's scores at depths below `depth`.
    fn evaluate(&mut self, game: &Game, depth: i32) -> Result<(), ConsoleError> {
        writeln!(self.out)?;
        let out = &mut self.out;
        let lines = &self.lines;
        let mut written = Ok(());
        let mut index = 0;

        self.searcher.analyze(game.position(), depth, |analysis: &MoveAnalysis| {
            index += 1;
            written = write_analysis(out, index, analysis);
            written.is_ok() && lines.try_recv().is_err()
        });
        written?;
        Ok(())
    }

    /// Replace `game` with the record at `path`, reporting failures on the console.
    fn load_into(&mut self, game: &mut Game, path: &Path) -> Result<(), ConsoleError> {
        match Game::load(path) {
            Ok(loaded) => *game = loaded,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "game not loaded");
                self.report(&err)?;
            }
        }
        Ok(())
    }

    fn report(&mut self, err: &ConsoleError) -> Result<(), ConsoleError> {
        writeln!(self.err, "\n{err}\n{BELL}")?;
        Ok(())
    }

    fn confirm(&mut self) -> Result<bool, ConsoleError> {
        write!(self.err, "are you sure (y or n) ? ")?;
        self.err.flush()?;
        Ok(self
            .lines
            .recv()
            .is_ok_and(|answer| answer.trim_start().starts_with(['y', 'Y'])))
    }

    /// Consume a pending input line, if any.
    fn input_pending(&self) -> bool {
        self.lines.try_recv().is_ok()
    }
}

fn write_analysis<W: Write>(out: &mut W, index: usize, analysis: &MoveAnalysis) -> io::Result<()> {
    let plural = if analysis.scores.len() > 1 { "s" } else { "" };
    write!(out, "{index:2}: {:<8}score{plural} =", analysis.mv.to_string())?;
    for score in &analysis.scores {
        write!(out, "{score:7}")?;
    }
    writeln!(out)?;
    out.flush()
}

/// Seed derived from the wall clock.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as u32)
}
