//! Parallel root search.
//!
//! Workers pull root candidates from a shared counter and search each on their own
//! copy of the position. The only shared mutable state is the best slot, which is
//! replaced only on strict improvement. Workers never share a pruning window.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use sentinel_core::{Move, MoveList, Position};
use tracing::debug;

use crate::search::SearchOptions;
use crate::search::negamax::{ROOT_BOUND, SearchContext, negamax};
use crate::search::scramble::Scrambler;

/// Best reply found so far: the smallest value left to the opponent, and its move.
struct BestSlot {
    worst: i32,
    mv: Option<Move>,
}

/// Search every root candidate with up to `max_workers` threads.
///
/// `scramblers[i]` drives move shuffling below candidate `i`. Returns the smallest
/// opponent value, the move that produced it and the number of nodes visited.
pub(crate) fn search_root_parallel(
    pos: &Position,
    moves: &MoveList,
    depth: i32,
    options: SearchOptions,
    scramblers: &[Scrambler],
    max_workers: usize,
) -> (i32, Option<Move>, u64) {
    let workers = max_workers.min(moves.len()).max(1);
    let next = AtomicUsize::new(0);
    let nodes = AtomicU64::new(0);
    let best = Mutex::new(BestSlot {
        worst: ROOT_BOUND,
        mv: None,
    });

    debug!(workers, candidates = moves.len(), depth, "parallel root search");

    std::thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| {
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(&mv) = moves.as_slice().get(index) else {
                        break;
                    };

                    let mut scrambler = scramblers[index];
                    let mut ctx = SearchContext::new(options, &mut scrambler);
                    let mut child = pos.make_move(mv);
                    let value = negamax(&mut child, depth - 1, ROOT_BOUND, &mut ctx, None);
                    nodes.fetch_add(ctx.nodes, Ordering::Relaxed);

                    if options.debug {
                        debug!(
                            target: "sentinel_engine::search",
                            index = index + 1,
                            mv = %mv,
                            score = -value,
                            "root candidate"
                        );
                    }

                    let mut slot = best.lock().unwrap_or_else(PoisonError::into_inner);
                    if value < slot.worst {
                        slot.worst = value;
                        slot.mv = Some(mv);
                    }
                }
            });
        }
    });

    let slot = best.into_inner().unwrap_or_else(PoisonError::into_inner);
    (slot.worst, slot.mv, nodes.into_inner())
}
