//! Positional tie-breakers: central pawns and mobility.

use sentinel_core::{Position, count_opponent_moves};

/// Weight of each pawn on d4, e4, d5 or e5.
const CENTER_PAWN_WEIGHT: i32 = 2;

/// Central pawn difference for the side to move, weighted.
pub fn center_pawn_balance(pos: &Position) -> i32 {
    let us = pos.side_to_move();
    (pos.center_pawns(us) - pos.center_pawns(!us)) * CENTER_PAWN_WEIGHT
}

/// Legal-move difference between the side to move and its opponent.
///
/// `legal_moves` is the mover's count; the opponent's is generated here.
pub fn mobility_balance(pos: &mut Position, legal_moves: usize) -> i32 {
    legal_moves as i32 - count_opponent_moves(pos) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::count_legal_moves;

    #[test]
    fn center_pawns_counted_for_mover() {
        let pos: Position = "4k3/8/8/3p4/3PP3/8/8/4K3 b - - 0 1".parse().expect("valid FEN");
        assert_eq!(center_pawn_balance(&pos), -2);
    }

    #[test]
    fn mobility_after_opening_move() {
        // 1. e4: white would have 31 moves, black has 20.
        let mut pos: Position = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
            .parse()
            .expect("valid FEN");
        let ours = count_legal_moves(&mut pos);
        assert_eq!(mobility_balance(&mut pos, ours), 20 - 31);
    }
}
