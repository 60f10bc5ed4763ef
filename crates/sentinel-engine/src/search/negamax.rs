//! Fixed-depth negamax with a single-bound cutoff and capture extension.
//!
//! Every call returns the score for the side to move. Internally a node keeps the
//! smallest value any reply leaves the opponent (`worst`) and returns its negation.

use sentinel_core::{MAX_MOVES, Move, MoveList, Position, generate_legal_moves};
use tracing::debug;

use crate::eval::evaluate;
use crate::search::SearchOptions;
use crate::search::scramble::Scrambler;

/// Initial bound at the root, beyond any reachable score.
pub const ROOT_BOUND: i32 = 20_000;

/// Score of a side that is checkmated.
pub const CHECKMATED: i32 = -10_000;

/// Deepest the capture extension may run below the nominal horizon.
pub const DEPTH_FLOOR: i32 = -24;

/// Per-search state threaded through the recursion.
pub(crate) struct SearchContext<'a> {
    pub options: SearchOptions,
    pub scrambler: &'a mut Scrambler,
    pub nodes: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(options: SearchOptions, scrambler: &'a mut Scrambler) -> Self {
        Self {
            options,
            scrambler,
            nodes: 0,
        }
    }
}

/// Amount by which a score shrinks toward zero per ply when decay is on.
#[inline]
pub(crate) fn decay(value: i32) -> i32 {
    (value + 128) >> 8
}

/// Search `pos` to `depth` plies.
///
/// `bound` is the caller's running best; once this node is known to reach it the
/// remaining candidates are skipped. When `best` is given, the move achieving the
/// returned score is stored there and, with the debug option, each candidate's score
/// is traced.
///
/// # Panics
///
/// Panics if `depth` is below [`DEPTH_FLOOR`] or the position has more than
/// [`MAX_MOVES`] legal moves.
pub(crate) fn negamax(
    pos: &mut Position,
    depth: i32,
    bound: i32,
    ctx: &mut SearchContext<'_>,
    best: Option<&mut Option<Move>>,
) -> i32 {
    let bound = if ctx.options.decay { bound + decay(bound) } else { bound };
    assert!(
        depth >= DEPTH_FLOOR,
        "search depth {depth} is below the floor of {DEPTH_FLOOR}"
    );
    ctx.nodes += 1;

    if pos.is_drawn() {
        return 0;
    }

    let mut moves = generate_legal_moves(pos);
    if moves.is_empty() {
        if pos.in_check() {
            return CHECKMATED;
        }
        pos.mark_stalemate();
        return 0;
    }
    assert!(
        moves.len() <= MAX_MOVES,
        "{} legal moves in {pos:?}",
        moves.len()
    );

    if ctx.options.randomize {
        ctx.scrambler.shuffle(moves.as_mut_slice());
    }

    let worst = if depth > 0 || pos.in_check() {
        expand(pos, &moves, depth, bound, ctx, best)
    } else {
        extend_captures(pos, &moves, depth, bound, ctx)
    };

    let worst = if ctx.options.decay { worst - decay(worst) } else { worst };
    -worst
}

/// Full-width node: every legal move is searched one ply shallower.
fn expand(
    pos: &Position,
    moves: &MoveList,
    depth: i32,
    bound: i32,
    ctx: &mut SearchContext<'_>,
    mut best: Option<&mut Option<Move>>,
) -> i32 {
    let trace = ctx.options.debug && best.is_some();
    let mut worst = ROOT_BOUND;

    for (index, &mv) in moves.as_slice().iter().enumerate() {
        let mut child = pos.make_move(mv);
        let child_bound = if trace { ROOT_BOUND } else { worst };
        let value = negamax(&mut child, depth - 1, child_bound, ctx, None);

        if trace {
            debug!(
                target: "sentinel_engine::search",
                index = index + 1,
                mv = %mv,
                score = -value,
                "root candidate"
            );
        }

        if value < worst {
            worst = value;
            if let Some(slot) = best.as_deref_mut() {
                *slot = Some(mv);
            }
            if ctx.options.pruning && -worst >= bound {
                break;
            }
        }
    }
    worst
}

/// Horizon node: start from the static score and follow captures only.
///
/// A capture is followed when its destination is already contested on this line or
/// the line still has room to contest a new square.
fn extend_captures(
    pos: &mut Position,
    moves: &MoveList,
    depth: i32,
    bound: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    let mut worst = -evaluate(pos, moves.len(), ctx.options.positional);

    for &mv in moves {
        if ctx.options.pruning && -worst >= bound {
            break;
        }
        let to = mv.to();
        if pos.cell(to).is_empty() {
            continue;
        }

        let mut child = *pos;
        let contested = child.contested_mut();
        if !contested.contains(to) && !contested.push(to) {
            continue;
        }
        child.apply_move(mv);

        let value = negamax(&mut child, depth - 1, worst, ctx, None);
        worst = worst.min(value);
    }
    worst
}
