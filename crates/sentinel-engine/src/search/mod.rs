//! Fixed-depth search: configuration, root adjustments and move analysis.

pub mod negamax;
pub(crate) mod pool;
pub mod scramble;

use sentinel_core::{Color, MAX_MOVES, Move, Position, generate_legal_moves};
use tracing::debug;

use negamax::{ROOT_BOUND, SearchContext, negamax};
use scramble::Scrambler;

/// Depth used for the very first move of a game when the base-depth boost is on.
pub const FIRST_MOVE_DEPTH: i32 = 2;

/// Total-material thresholds below which the root searches one ply deeper each.
pub const MATERIAL_SCALING_THRESHOLDS: [i32; 3] = [40, 20, 10];

/// Independent switches for the search behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Root only: clamp the game's first move to [`FIRST_MOVE_DEPTH`] and enable
    /// material scaling.
    pub base_depth_boost: bool,
    /// Root only, with the boost: extra plies as material comes off the board.
    pub material_scaling: bool,
    /// Skip remaining candidates once a node cannot improve its caller.
    pub pruning: bool,
    /// Shrink scores toward zero at every ply, so nearer wins score higher.
    pub decay: bool,
    /// Shuffle candidates before searching them.
    pub randomize: bool,
    /// Add central-pawn and mobility terms to leaf scores.
    pub positional: bool,
    /// Trace each root candidate's score at debug level.
    pub debug: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            base_depth_boost: false,
            material_scaling: true,
            pruning: true,
            decay: true,
            randomize: true,
            positional: true,
            debug: false,
        }
    }
}

/// Searcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Nominal search depth in plies.
    pub depth: i32,
    pub options: SearchOptions,
    /// Worker threads for the root; 0 or 1 searches on the calling thread.
    pub max_workers: usize,
    /// Seed for move scrambling; `None` starts from a zero state.
    pub seed: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            options: SearchOptions::default(),
            max_workers: 1,
            seed: None,
        }
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move; `None` when the game is already over at the root.
    pub best_move: Option<Move>,
    /// Score for the side to move.
    pub score: i32,
    /// Positions visited.
    pub nodes: u64,
    /// Depth actually searched after root adjustments.
    pub depth: i32,
}

/// Scores of one candidate move at increasing depths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAnalysis {
    pub mv: Move,
    /// `scores[d]` is the score for the analysing side after a depth-`d` reply search.
    pub scores: Vec<i32>,
}

/// Fixed-depth negamax searcher owning its move scrambler.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    scrambler: Scrambler,
}

impl Searcher {
    /// Create a searcher; the scrambler is seeded from `config.seed`.
    pub fn new(config: SearchConfig) -> Self {
        let scrambler = config.seed.map_or_else(Scrambler::default, Scrambler::new);
        Self { config, scrambler }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Set the nominal depth for subsequent searches.
    pub fn set_depth(&mut self, depth: i32) {
        self.config.depth = depth;
    }

    pub fn set_max_workers(&mut self, max_workers: usize) {
        self.config.max_workers = max_workers;
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.config.options = options;
    }

    /// Depth for a root search of `pos` after the base-depth boost and material
    /// scaling.
    fn root_depth(&self, pos: &Position) -> i32 {
        let options = self.config.options;
        if !options.base_depth_boost {
            return self.config.depth;
        }

        let mut depth = self.config.depth;
        if pos.move_number() == 1 && pos.side_to_move() == Color::White {
            depth = FIRST_MOVE_DEPTH;
        }
        if options.material_scaling {
            let total = pos.total_material();
            depth += MATERIAL_SCALING_THRESHOLDS
                .iter()
                .filter(|&&threshold| total < threshold)
                .count() as i32;
        }
        depth
    }

    /// Search `pos` at the configured depth and return the best move.
    ///
    /// # Panics
    ///
    /// Panics if the adjusted depth is below [`negamax::DEPTH_FLOOR`].
    pub fn search(&mut self, pos: &Position) -> SearchResult {
        let depth = self.root_depth(pos);
        let result = self.search_at(pos, depth);
        debug!(
            depth,
            score = result.score,
            nodes = result.nodes,
            best = ?result.best_move.map(|mv| mv.to_string()),
            "search complete"
        );
        result
    }

    /// Search at exactly `depth`, without root adjustments.
    fn search_at(&mut self, pos: &Position, depth: i32) -> SearchResult {
        let mut root = *pos;
        let parallel = self.config.max_workers > 1 && depth > 0 && !root.is_drawn();

        if !parallel {
            let mut ctx = SearchContext::new(self.config.options, &mut self.scrambler);
            let mut best = None;
            let score = negamax(&mut root, depth, ROOT_BOUND, &mut ctx, Some(&mut best));
            return SearchResult {
                best_move: best,
                score,
                nodes: ctx.nodes,
                depth,
            };
        }

        self.search_parallel(&mut root, depth)
    }

    /// Root fan-out across worker threads.
    ///
    /// Mirrors a sequential root: terminal positions score the same, candidates are
    /// shuffled by this searcher's scrambler and decay applies once at the end.
    fn search_parallel(&mut self, root: &mut Position, depth: i32) -> SearchResult {
        let options = self.config.options;
        let mut moves = generate_legal_moves(root);
        if moves.is_empty() {
            let score = if root.in_check() {
                negamax::CHECKMATED
            } else {
                root.mark_stalemate();
                0
            };
            return SearchResult {
                best_move: None,
                score,
                nodes: 1,
                depth,
            };
        }
        assert!(
            moves.len() <= MAX_MOVES,
            "{} legal moves in {root:?}",
            moves.len()
        );
        if options.randomize {
            self.scrambler.shuffle(moves.as_mut_slice());
        }

        let scramblers: Vec<Scrambler> = (0..moves.len()).map(|_| self.scrambler.fork()).collect();
        let (worst, best_move, nodes) = pool::search_root_parallel(
            root,
            &moves,
            depth,
            options,
            &scramblers,
            self.config.max_workers,
        );

        let worst = if options.decay {
            worst - negamax::decay(worst)
        } else {
            worst
        };
        SearchResult {
            best_move,
            score: -worst,
            nodes: nodes + 1,
            depth,
        }
    }

    /// Score every legal move of `pos` after reply searches of depth `0..depth`.
    ///
    /// `on_move` sees each analysis as soon as it is complete; returning `false` from
    /// it stops the analysis early.
    pub fn analyze<F>(&mut self, pos: &Position, depth: i32, mut on_move: F) -> Vec<MoveAnalysis>
    where
        F: FnMut(&MoveAnalysis) -> bool,
    {
        let mut root = *pos;
        let moves = generate_legal_moves(&mut root);
        let mut analyses = Vec::with_capacity(moves.len());

        for &mv in &moves {
            let child = root.make_move(mv);
            let scores = (0..depth.max(1))
                .map(|reply_depth| -self.search_at(&child, reply_depth).score)
                .collect();
            let analysis = MoveAnalysis { mv, scores };
            let keep_going = on_move(&analysis);
            analyses.push(analysis);
            if !keep_going {
                break;
            }
        }
        analyses
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
