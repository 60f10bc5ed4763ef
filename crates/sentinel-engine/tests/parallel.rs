//! Integration tests for the parallel root search.
//!
//! With shuffling and decay off, every worker count must reach the sequential score
//! and return a legal move.

use sentinel_core::{Position, generate_legal_moves};
use sentinel_engine::{SearchConfig, SearchOptions, SearchResult, Searcher};

const SCHOLARS_MATE_FEN: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

const SICILIAN_FEN: &str = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";

const RUY_LOPEZ_FEN: &str =
    "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3";

const ENDGAME_FEN: &str = "8/8/8/3k4/8/3K4/4P3/8 w - - 0 1";

fn search_with_workers(fen: &str, depth: i32, workers: usize) -> SearchResult {
    let pos: Position = fen.parse().expect("valid FEN");
    let mut searcher = Searcher::new(SearchConfig {
        depth,
        options: SearchOptions {
            randomize: false,
            decay: false,
            ..SearchOptions::default()
        },
        max_workers: workers,
        seed: None,
    });
    searcher.search(&pos)
}

fn assert_legal(fen: &str, result: &SearchResult) {
    let mut pos: Position = fen.parse().expect("valid FEN");
    let best = result.best_move.expect("a best move");
    assert!(
        generate_legal_moves(&mut pos).contains(best),
        "{best} is not legal in {fen}"
    );
}

// ── Agreement with the sequential search ─────────────────────────────────────

#[test]
fn workers_match_sequential_score() {
    for fen in [SICILIAN_FEN, RUY_LOPEZ_FEN, ENDGAME_FEN] {
        let sequential = search_with_workers(fen, 2, 1);
        for workers in [2, 4] {
            let parallel = search_with_workers(fen, 2, workers);
            assert_eq!(
                parallel.score, sequential.score,
                "{workers} workers disagree with the sequential score on {fen}"
            );
            assert_legal(fen, &parallel);
        }
    }
}

#[test]
fn workers_find_mate_in_one() {
    for workers in [1, 2, 4] {
        let result = search_with_workers(SCHOLARS_MATE_FEN, 1, workers);
        assert_eq!(
            result.best_move.map(|mv| mv.to_string()).as_deref(),
            Some("h5-f7"),
            "{workers} workers should find Qxf7"
        );
        assert_eq!(result.score, 10_000);
    }
}

#[test]
fn more_workers_than_moves() {
    // White has only king moves and a pawn push or two.
    let result = search_with_workers(ENDGAME_FEN, 1, 64);
    assert_legal(ENDGAME_FEN, &result);
}

#[test]
fn terminal_roots_have_no_move() {
    let mated = search_with_workers("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1", 2, 4);
    assert_eq!(mated.best_move, None);
    assert_eq!(mated.score, -10_000);

    let stalemate = search_with_workers("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", 2, 4);
    assert_eq!(stalemate.best_move, None);
    assert_eq!(stalemate.score, 0);
}

#[test]
fn parallel_counts_nodes() {
    let result = search_with_workers(SICILIAN_FEN, 2, 3);
    assert!(result.nodes > 30, "expected many nodes, got {}", result.nodes);
}

#[test]
fn shuffled_parallel_search_returns_legal_moves() {
    let pos = Position::starting_position();
    let mut searcher = Searcher::new(SearchConfig {
        depth: 2,
        max_workers: 4,
        seed: Some(2024),
        ..SearchConfig::default()
    });
    for _ in 0..3 {
        let result = searcher.search(&pos);
        let fen = pos.to_string();
        assert_legal(&fen, &result);
    }
}
