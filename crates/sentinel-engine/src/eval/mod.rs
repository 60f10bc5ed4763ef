//! Static evaluation of quiet positions.
//!
//! Scores are integers from the side to move's point of view. The material ratio
//! dominates; the positional terms only break ties between materially equal lines.

pub mod material;
pub mod positional;

use sentinel_core::{Color, Position};
use tracing::warn;

use material::material_score;
use positional::{center_pawn_balance, mobility_balance};

/// Material above which a side's total is considered corrupt.
pub const MAX_MATERIAL: i32 = 55;

/// Evaluate `pos` for the side to move.
///
/// `legal_moves` is the mover's legal-move count, already known to the caller. With
/// `positional` set, central pawns and mobility are added to the material ratio.
pub fn evaluate(pos: &mut Position, legal_moves: usize, positional: bool) -> i32 {
    let white = pos.material(Color::White);
    let black = pos.material(Color::Black);
    if white > MAX_MATERIAL || black > MAX_MATERIAL {
        warn!(white, black, "material above {MAX_MATERIAL}");
    }

    let mut score = match pos.side_to_move() {
        Color::White => material_score(white, black),
        Color::Black => -material_score(white, black),
    };
    if positional {
        score += center_pawn_balance(pos);
        score += mobility_balance(pos, legal_moves);
    }
    score
}
