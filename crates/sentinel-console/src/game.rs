//! Game session: the current position and the moves that led to it.

use std::fs;
use std::path::Path;

use sentinel_core::{GameRecord, Move, MoveError, Position, RecordError};
use tracing::debug;

use crate::error::ConsoleError;

/// A game played from the starting position.
#[derive(Debug, Clone, Default)]
pub struct Game {
    position: Position,
    moves: Vec<Move>,
}

impl Game {
    pub fn new() -> Game {
        Game::default()
    }

    /// Replay a record into a new game.
    pub fn from_record(record: &GameRecord) -> Result<Game, RecordError> {
        let (position, moves) = record.replay()?;
        Ok(Game { position, moves })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// Moves played so far.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// `true` once either side has moved.
    pub fn has_started(&self) -> bool {
        !self.moves.is_empty()
    }

    /// Play `wanted` if it matches a legal move, returning the move actually played.
    pub fn play(&mut self, wanted: Move) -> Result<Move, MoveError> {
        let mv = self.position.find_legal(wanted)?;
        self.position.apply_move(mv);
        self.moves.push(mv);
        Ok(mv)
    }

    /// Take back up to `count` moves by replaying the rest from the start.
    ///
    /// Returns how many moves were removed.
    pub fn take_back(&mut self, count: usize) -> usize {
        let count = count.min(self.moves.len());
        if count == 0 {
            return 0;
        }
        let keep = self.moves.len() - count;
        self.moves.truncate(keep);
        self.position = Position::starting_position();
        for &mv in &self.moves {
            self.position.apply_move(mv);
        }
        debug!(count, remaining = keep, "moves taken back");
        count
    }

    /// The game as a record.
    pub fn record(&self) -> GameRecord {
        GameRecord::new(&self.moves)
    }

    /// Write the game record to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConsoleError> {
        fs::write(path, self.record().to_string()).map_err(|source| ConsoleError::File {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and replay a game record from `path`.
    pub fn load(path: &Path) -> Result<Game, ConsoleError> {
        let text = fs::read_to_string(path).map_err(|source| ConsoleError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let invalid = |source| ConsoleError::InvalidGameFile {
            path: path.to_path_buf(),
            source,
        };
        let record: GameRecord = text.parse().map_err(invalid)?;
        let game = Game::from_record(&record).map_err(invalid)?;
        debug!(path = %path.display(), moves = game.moves.len(), "game loaded");
        Ok(game)
    }
}
