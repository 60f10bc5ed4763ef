//! Core chess rules on a bordered mailbox grid: board representation, attack and pin
//! detection, legal move generation, move execution, draw detection, move text,
//! game records and position snapshots.

mod attacks;
mod cell;
mod chess_move;
mod color;
pub mod direction;
mod draw;
mod error;
mod fen;
mod make_move;
pub mod movegen;
pub mod perft;
mod piece_kind;
mod position;
mod record;
mod snapshot;
mod square;

pub use cell::Cell;
pub use chess_move::Move;
pub use color::Color;
pub use draw::{DrawKind, Outcome};
pub use error::{FenError, MoveError, NotationError, PositionError, RecordError, SnapshotError};
pub use fen::STARTING_FEN;
pub use movegen::{MAX_MOVES, MoveList, count_legal_moves, count_opponent_moves, generate_legal_moves};
pub use piece_kind::PieceKind;
pub use position::{
    CONTESTED_CAPACITY, ContestedSquares, FINGERPRINT_WINDOW, MATING_MATERIAL, Position,
    PrettyBoard,
};
pub use record::GameRecord;
pub use snapshot::SNAPSHOT_LEN;
pub use square::Square;
