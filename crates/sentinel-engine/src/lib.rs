//! Evaluation and search for sentinel.

pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::scramble::Scrambler;
pub use search::{MoveAnalysis, SearchConfig, SearchOptions, SearchResult, Searcher};
