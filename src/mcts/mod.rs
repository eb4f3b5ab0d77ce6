//! Monte Carlo Tree Search controller: selection, expansion, randomized
//! rollout, and backpropagation over the shared tree in [`crate::node_pool`].
//!
//! Split into selection/expansion/simulation/backpropagation stages the way
//! a single-threaded `Rc<RefCell<_>>` tree search would be, but generalized
//! to an arena-plus-mutex shape so several worker threads can share one
//! tree, since rollouts here must run outside the lock that protects it.

pub mod logging;

use crate::board::CellId;
use crate::board::Side;
use crate::game_state::{GameState, GameStatus};
use crate::node_pool::{NodeId, NodePool};
use log::debug;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Exploration weight used during selection (`Cp` in the UCB1 score).
pub const CP: f64 = 2.0;
/// Wall-clock search budget.
pub const SEARCH_TIME: Duration = Duration::from_millis(1000);
/// A node must be visited this many times before it is eligible for expansion.
pub const EXPAND_THRESHOLD: u32 = 1;
/// Rollout weight below which a playout is force-terminated.
pub const FAST_STOP_THRESHOLD: f64 = 0.1;
/// Per-ply damping applied to the fast-stop weight, scaled by branching factor.
pub const FAST_STOP_BRANCH_FACTOR: f64 = 0.01;

/// Tunable search parameters. `Default` reproduces the constants above;
/// tests and the CLI driver override fields (typically `search_time` and
/// `thread_num`) without touching the constants themselves.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub cp: f64,
    pub search_time: Duration,
    pub expand_threshold: u32,
    pub fast_stop_threshold: f64,
    pub fast_stop_branch_factor: f64,
    /// `None` resolves to `std::thread::available_parallelism()` (or 1).
    pub thread_num: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            cp: CP,
            search_time: SEARCH_TIME,
            expand_threshold: EXPAND_THRESHOLD,
            fast_stop_threshold: FAST_STOP_THRESHOLD,
            fast_stop_branch_factor: FAST_STOP_BRANCH_FACTOR,
            thread_num: None,
        }
    }
}

/// The result of a `search()` call: the chosen move plus the diagnostic
/// counters a caller (or a test) might want to inspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    pub best_move: Option<CellId>,
    pub iterations: u32,
    pub fast_stop_count: u64,
    pub fast_stop_steps: u64,
}

/// State mutated under the single process-wide search mutex: the whole
/// tree, the pool's free list (both live inside `pool`), and the
/// diagnostic counters.
struct SharedSearch {
    pool: NodePool,
    root_side: Side,
    fast_stop_count: u64,
    fast_stop_steps: u64,
}

/// Owns the node pool across searches (the pool is recycled, not
/// reallocated, between calls) and the tunable parameters.
pub struct Mcts {
    pool: NodePool,
    pub config: SearchConfig,
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Mcts {
    pub fn new(config: SearchConfig) -> Self {
        Mcts {
            pool: NodePool::new(),
            config,
        }
    }

    /// Runs a time-boxed search and returns the best move for
    /// `caller_state`'s side to move. Returns `best_move: None` immediately,
    /// without spawning any workers, if `caller_state` is already in the
    /// `Pass` state.
    pub fn search(&mut self, caller_state: &GameState) -> SearchReport {
        if caller_state.status == GameStatus::Pass {
            return SearchReport {
                best_move: None,
                iterations: 0,
                fast_stop_count: 0,
                fast_stop_steps: 0,
            };
        }

        let mut pool = std::mem::take(&mut self.pool);
        let root = pool.allocate(None, caller_state.clone());
        let root_side = pool.get(root).game.side_to_move();

        let shared = Mutex::new(SharedSearch {
            pool,
            root_side,
            fast_stop_count: 0,
            fast_stop_steps: 0,
        });

        let thread_num = self.config.thread_num.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let thread_num = thread_num.max(1);

        let start_time = Instant::now();
        let config = &self.config;

        thread::scope(|scope| {
            for _ in 0..thread_num {
                let shared = &shared;
                scope.spawn(move || {
                    // Each OS thread gets rand's own thread-local generator,
                    // so no two workers ever contend on a shared PRNG.
                    let mut rng = rand::thread_rng();
                    worker_loop(shared, root, root_side, start_time, config, &mut rng);
                });
            }
        });

        let mut shared = shared.into_inner().expect("search mutex not poisoned");
        let best = best_child(&shared.pool, root, 0.0);
        let report = SearchReport {
            best_move: best.and_then(|b| shared.pool.get(b).game.last_move),
            iterations: shared.pool.get(root).visit,
            fast_stop_count: shared.fast_stop_count,
            fast_stop_steps: shared.fast_stop_steps,
        };

        debug!(
            "search done: iterations={} fast_stop_count={} best={}",
            report.iterations,
            report.fast_stop_count,
            crate::board::id_to_str(report.best_move)
        );
        logging::dump_trees(&shared.pool, root, self.config.cp);

        shared.pool.recycle_subtree(root);
        self.pool = shared.pool;
        report
    }
}

/// One worker's loop body: descend under the lock, roll out unlocked on a
/// private `GameState` snapshot, backpropagate under the lock, then check
/// the deadline/convergence condition.
fn worker_loop(
    shared: &Mutex<SharedSearch>,
    root: NodeId,
    root_side: Side,
    start_time: Instant,
    config: &SearchConfig,
    rng: &mut ThreadRng,
) {
    loop {
        let leaf_game = {
            let mut guard = shared.lock().expect("search mutex not poisoned");
            let leaf = tree_policy(&mut guard, root, config, rng);
            (leaf, guard.pool.get(leaf).game.clone())
        };
        let (leaf, leaf_game) = leaf_game;

        let mut fast_stop_count = 0u64;
        let mut fast_stop_steps = 0u64;
        let value = default_policy(
            leaf_game,
            root_side,
            config,
            rng,
            &mut fast_stop_count,
            &mut fast_stop_steps,
        );

        let mut guard = shared.lock().expect("search mutex not poisoned");
        backpropagate(&mut guard, Some(leaf), value);
        guard.fast_stop_count += fast_stop_count;
        guard.fast_stop_steps += fast_stop_steps;

        if start_time.elapsed() >= config.search_time {
            let most_visited = guard
                .pool
                .get(root)
                .children
                .iter()
                .copied()
                .max_by_key(|&c| guard.pool.get(c).visit);
            let best_score = best_child(&guard.pool, root, 0.0);
            if most_visited == best_score {
                break;
            }
        }
    }
}

/// Selection plus at most one expansion.
fn tree_policy(
    shared: &mut SharedSearch,
    start: NodeId,
    config: &SearchConfig,
    rng: &mut ThreadRng,
) -> NodeId {
    let mut node = start;
    loop {
        if shared.pool.get(node).game.status.is_terminal() {
            return node;
        }
        if shared.pool.get(node).visit < config.expand_threshold {
            return node;
        }
        if !shared.pool.get(node).untried_moves.is_empty() {
            return expand(shared, node, rng);
        }
        node = best_child(&shared.pool, node, config.cp)
            .expect("non-terminal, fully-expanded node must have children");
    }
}

fn expand(shared: &mut SharedSearch, node: NodeId, rng: &mut ThreadRng) -> NodeId {
    let mv = {
        let untried = &mut shared.pool.get_mut(node).untried_moves;
        let idx = rng.gen_range(0..untried.len());
        let last = untried.len() - 1;
        untried.swap(idx, last);
        untried.pop().expect("untried_moves checked non-empty")
    };

    let mut child_game = shared.pool.get(node).game.clone();
    child_game.put(mv);
    let child = shared.pool.allocate(Some(node), child_game);
    shared.pool.get_mut(node).children.push(child);
    child
}

/// UCB1-style score, first-encountered tie-break.
fn best_child(pool: &NodePool, node: NodeId, c: f64) -> Option<NodeId> {
    let parent = pool.get(node);
    // Guarded explicitly: at c == 0 the exploration term must vanish even
    // when `parent.visit == 0` (where `ln(0)` would otherwise poison the
    // product with NaN instead of 0).
    let precomputed = if c == 0.0 {
        0.0
    } else {
        (parent.visit as f64).ln().sqrt() * c
    };

    let mut best: Option<(NodeId, f64)> = None;
    for &child in &parent.children {
        let child_node = pool.get(child);
        let score = child_node.win_rate + child_node.expand_factor * precomputed;
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((child, score)),
        }
    }
    best.map(|(id, _)| id)
}

/// A damped random rollout from a private
/// `GameState` snapshot, returning a value in `[0, 1]` from the root
/// player's perspective.
fn default_policy(
    mut scratch: GameState,
    root_side: Side,
    config: &SearchConfig,
    rng: &mut ThreadRng,
    fast_stop_count: &mut u64,
    fast_stop_steps: &mut u64,
) -> f64 {
    let start_turn = scratch.turn;
    let mut weight = 1.0f64;

    while matches!(scratch.status, GameStatus::Normal | GameStatus::Pass) {
        let factor =
            (1.0 - config.fast_stop_branch_factor * scratch.legal_moves.len() as f64).max(0.5);
        weight *= factor;
        scratch.put_random(rng);

        if weight < config.fast_stop_threshold {
            *fast_stop_count += 1;
            *fast_stop_steps += (scratch.turn - start_turn) as u64;
            scratch.status = calc_better_side(&scratch);
            break;
        }
    }

    let raw = if side_won(scratch.status, root_side) {
        1.0
    } else {
        0.0
    };
    (raw - 0.5) * weight + 0.5
}

fn side_won(status: GameStatus, side: Side) -> bool {
    matches!(
        (status, side),
        (GameStatus::BlackWin, Side::Black) | (GameStatus::WhiteWin, Side::White)
    )
}

/// Fast-stop tiebreak: whichever side leads once pre-move and current
/// counts are summed.
fn calc_better_side(state: &GameState) -> GameStatus {
    let black = state.last_black_count + state.board.black_count;
    let white = state.last_white_count + state.board.white_count;
    if black > white {
        GameStatus::BlackWin
    } else if white > black {
        GameStatus::WhiteWin
    } else {
        GameStatus::Draw
    }
}

/// Walk to the root, updating each ancestor's statistics and flipping
/// `win_rate` to the mover's perspective.
fn backpropagate(shared: &mut SharedSearch, node: Option<NodeId>, value: f64) {
    let root_side = shared.root_side;
    let mut cursor = node;
    while let Some(id) = cursor {
        let node = shared.pool.get_mut(id);
        node.visit += 1;
        node.value += value;
        node.expand_factor = (1.0 / node.visit as f64).sqrt();
        node.win_rate = node.value / node.visit as f64;
        if node.game.side_to_move() == root_side {
            node.win_rate = 1.0 - node.win_rate;
        }
        cursor = node.parent;
    }
}
