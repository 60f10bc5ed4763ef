//! Colour-mirror symmetry of the search.
//!
//! Flipping the board vertically and swapping colours must give the same score for
//! the side to move, so from White's point of view the two scores are negated.

use sentinel_core::Position;
use sentinel_engine::{SearchConfig, SearchOptions, Searcher};

/// Mirror a FEN: ranks reversed, colours swapped, side to move flipped.
fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let swap_case = |text: &str| -> String {
        text.chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect()
    };

    let board: Vec<String> = fields[0].split('/').rev().map(swap_case).collect();
    let side = if fields[1] == "w" { "b" } else { "w" };

    let mut castling: Vec<char> = swap_case(fields[2]).chars().collect();
    castling.sort_by_key(|&c| (c.is_ascii_lowercase(), c != 'K' && c != 'k'));
    let castling: String = castling.into_iter().collect();

    let en_passant = match fields[3] {
        "-" => "-".to_string(),
        square => {
            let (file, rank) = square.split_at(1);
            let rank: u8 = rank.parse().expect("numeric rank");
            format!("{file}{}", 9 - rank)
        }
    };

    format!(
        "{} {side} {castling} {en_passant} {} {}",
        board.join("/"),
        fields[4],
        fields[5]
    )
}

fn score(fen: &str, depth: i32) -> i32 {
    let pos: Position = fen.parse().expect("valid FEN");
    let mut searcher = Searcher::new(SearchConfig {
        depth,
        options: SearchOptions {
            randomize: false,
            decay: false,
            ..SearchOptions::default()
        },
        ..SearchConfig::default()
    });
    searcher.search(&pos).score
}

#[test]
fn mirror_helper() {
    assert_eq!(
        mirror_fen("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"),
        "rnbqkbnr/pppp1ppp/8/4p3/2P5/8/PP1PPPPP/RNBQKBNR b KQkq c3 0 2"
    );
}

#[test]
fn mirrored_positions_score_alike() {
    let fens = [
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
        "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
        "4k3/pppp4/8/8/4P3/8/PPP5/4K3 w - - 0 1",
        "r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1",
    ];
    for fen in fens {
        let mirrored = mirror_fen(fen);
        for depth in [0, 1, 2] {
            let original = score(fen, depth);
            let flipped = score(&mirrored, depth);
            assert_eq!(
                original, flipped,
                "depth {depth}: {fen} scores {original} but its mirror {mirrored} scores {flipped}"
            );
        }
    }
}
