//! Error types for move text, game records, snapshots, FEN parsing and position
//! validation.

use std::fmt;

/// Errors from parsing move text such as `e2-e4` or `e7-e8/Q`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    /// The token is not `<square>-<square>[/<letter>]`.
    #[error("malformed move \"{text}\", expected e.g. e2-e4 or e7-e8/Q")]
    Malformed {
        /// The offending token.
        text: String,
    },
    /// One of the two squares is not a board square.
    #[error("invalid square \"{square}\"")]
    InvalidSquare {
        /// The offending square text.
        square: String,
    },
    /// The promotion letter is not one of N, B, R, Q.
    #[error("invalid promotion piece '{letter}'")]
    InvalidPromotion {
        /// The offending letter.
        letter: char,
    },
}

/// Errors from matching a move against the legal moves of a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The move text did not parse.
    #[error(transparent)]
    Notation(#[from] NotationError),
    /// The move parsed but is not legal here.
    #[error("illegal move {text}")]
    Illegal {
        /// The move as written.
        text: String,
    },
    /// A promotion piece was given for a move that does not promote.
    #[error("move {text} does not promote")]
    UnexpectedPromotion {
        /// The move as written.
        text: String,
    },
}

/// Errors from parsing a game record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The record holds no moves.
    #[error("game record is empty")]
    Empty,
    /// A line does not look like `<N>: <move> [<move>]`.
    #[error("line {line}: expected \"<N>: <white> [<black>]\"")]
    MalformedLine {
        /// One-based line number.
        line: usize,
    },
    /// Move numbers are not 1, 2, 3, ...
    #[error("line {line}: expected move number {expected}, found {found}")]
    OutOfSequence {
        /// One-based line number.
        line: usize,
        /// The number that should appear.
        expected: u32,
        /// The number that does appear.
        found: u32,
    },
    /// A line follows a move pair that ended the game with only White's move.
    #[error("line {line}: moves continue after an incomplete move pair")]
    TrailingMoves {
        /// One-based line number.
        line: usize,
    },
    /// A move cannot be replayed.
    #[error("line {line}: {source}")]
    BadMove {
        /// One-based line number.
        line: usize,
        /// Why the move was rejected.
        #[source]
        source: MoveError,
    },
}

/// Errors from decoding a binary position snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The byte image has the wrong size.
    #[error("snapshot is {found} bytes, expected {expected}")]
    WrongLength {
        /// Required size.
        expected: usize,
        /// Actual size.
        found: usize,
    },
    /// The image does not start with the snapshot magic.
    #[error("not a position snapshot")]
    BadMagic,
    /// A field holds a value outside its domain.
    #[error("invalid {field} in snapshot")]
    InvalidField {
        /// The field name.
        field: &'static str,
    },
    /// The decoded position fails validation.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(#[from] PositionError),
}

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// The FEN string does not have 4 to 6 space-separated fields.
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    BadRankLength {
        /// Zero-based rank index (0 = rank 8 in FEN, 7 = rank 1).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// The castling field is malformed or names a right the pieces cannot have.
    InvalidCastling {
        /// The invalid castling string.
        found: String,
    },
    /// The en passant field is not "-" or a square a pawn just skipped.
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter (halfmove clock or fullmove number) is not a valid number.
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The parsed position fails structural validation.
    InvalidPosition {
        /// The underlying validation error.
        source: PositionError,
    },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "expected 4 to 6 FEN fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "expected 8 ranks in piece placement, found {found}")
            }
            FenError::BadRankLength { rank_index, length } => {
                write!(f, "rank {rank_index} describes {length} squares, expected 8")
            }
            FenError::InvalidPieceChar { character } => {
                write!(f, "invalid piece character: '{character}'")
            }
            FenError::InvalidColor { found } => {
                write!(f, "invalid active color: \"{found}\"")
            }
            FenError::InvalidCastling { found } => {
                write!(f, "invalid castling rights: \"{found}\"")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square: \"{found}\"")
            }
            FenError::InvalidMoveCounter { field, found } => {
                write!(f, "invalid {field}: \"{found}\"")
            }
            FenError::InvalidPosition { source } => {
                write!(f, "invalid position: {source}")
            }
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::InvalidPosition { source } => Some(source),
            _ => None,
        }
    }
}

impl From<PositionError> for FenError {
    fn from(source: PositionError) -> Self {
        FenError::InvalidPosition { source }
    }
}

/// Errors from structural validation of a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: u32,
    },
    /// The cached king square does not hold that side's king.
    #[error("cached {color} king square does not hold the king")]
    KingCacheMismatch {
        /// Which side's cache is stale.
        color: &'static str,
    },
    /// The cached material sum differs from a board scan.
    #[error("{color} material cached as {cached}, board holds {actual}")]
    MaterialMismatch {
        /// Which side.
        color: &'static str,
        /// Cached value.
        cached: i32,
        /// Scanned value.
        actual: i32,
    },
    /// The cached pawn count differs from a board scan.
    #[error("{color} pawns cached as {cached}, board holds {actual}")]
    PawnCountMismatch {
        /// Which side.
        color: &'static str,
        /// Cached value.
        cached: u8,
        /// Scanned value.
        actual: u8,
    },
    /// A border cell is not marked border, or a playable cell is.
    #[error("grid cell {index} has a corrupted border mark")]
    CorruptBorder {
        /// Grid index of the bad cell.
        index: usize,
    },
    /// A playable cell holds bits that do not decode to a piece.
    #[error("grid cell {index} holds an invalid value {raw:#04x}")]
    InvalidCell {
        /// Grid index of the bad cell.
        index: usize,
        /// Raw cell byte.
        raw: u8,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// The en-passant target is not a pawn the side that just moved pushed two squares.
    #[error("en passant target for {color} is not a pawn after a double step")]
    StaleEnPassant {
        /// Side whose target is stale.
        color: &'static str,
    },
    /// The side not on move has its king attacked.
    #[error("{color} is in check but it is not {color}'s move")]
    OpponentInCheck {
        /// Side whose king is attacked.
        color: &'static str,
    },
}
