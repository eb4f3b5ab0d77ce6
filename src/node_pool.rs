//! Recycling arena for MCTS tree nodes.
//!
//! `TreeNode` needs a parent back-reference, which a naive
//! `Rc<RefCell<Node>>` tree makes awkward to recycle correctly once rollouts
//! run outside the lock that protects the tree. Instead nodes live in a
//! flat `Vec` and refer to each other by index (`NodeId`) — an arena,
//! never an owning parent pointer — so a whole subtree can be hollowed out
//! and its slots pushed onto a free list in one ordinary move, rather than
//! a recursive `Drop`.

use crate::board::CellId;
use crate::game_state::{GameState, GameStatus};

/// Index of a [`TreeNode`] within a [`NodePool`]'s arena.
pub type NodeId = usize;

/// The candidate actions a node can still expand into: one entry per legal
/// move in `game.legal_moves`, or — for a `Pass` node, which by
/// construction has no entries in `legal_moves` — the single synthetic
/// "play the forced pass" action. `None` always means pass, matching
/// `GameState::put`'s own `Option<CellId>` convention.
pub fn candidate_moves(game: &GameState) -> Vec<Option<CellId>> {
    if game.status == GameStatus::Pass {
        vec![None]
    } else {
        game.legal_moves.iter().map(|&id| Some(id)).collect()
    }
}

/// A node in the Monte Carlo search tree.
#[derive(Debug)]
pub struct TreeNode {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub game: GameState,
    pub untried_moves: Vec<Option<CellId>>,
    pub visit: u32,
    pub value: f64,
    pub win_rate: f64,
    pub expand_factor: f64,
}

impl TreeNode {
    fn reset(&mut self, parent: Option<NodeId>, game: GameState) {
        self.parent = parent;
        self.children.clear();
        self.untried_moves = candidate_moves(&game);
        self.game = game;
        self.visit = 0;
        self.value = 0.0;
        self.win_rate = 0.0;
        self.expand_factor = 0.0;
    }
}

/// Recycle-on-demand allocator for [`TreeNode`]s. Every search run
/// allocates a fresh tree from (and returns it to) the same pool, so the
/// backing `Vec`'s allocation is reused across `Mcts::search` calls instead
/// of being freed and reallocated each time.
#[derive(Debug, Default)]
pub struct NodePool {
    nodes: Vec<TreeNode>,
    free: Vec<NodeId>,
}

impl NodePool {
    pub fn new() -> Self {
        NodePool {
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Allocate a node owning `game`, linked to `parent`. Reuses a freed
    /// slot when one is available.
    pub fn allocate(&mut self, parent: Option<NodeId>, game: GameState) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id].reset(parent, game);
            id
        } else {
            let untried_moves = candidate_moves(&game);
            self.nodes.push(TreeNode {
                parent,
                children: Vec::new(),
                game,
                untried_moves,
                visit: 0,
                value: 0.0,
                win_rate: 0.0,
                expand_factor: 0.0,
            });
            self.nodes.len() - 1
        }
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id]
    }

    /// Recycle `id` and its whole subtree back onto the free list. Callers
    /// must not hold any other reference to a recycled id afterwards.
    pub fn recycle_subtree(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id].children);
        for child in children {
            self.recycle_subtree(child);
        }
        self.nodes[id].parent = None;
        self.free.push(id);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_then_recycle_reuses_slot() {
        let mut pool = NodePool::new();
        let root = pool.allocate(None, GameState::init());
        assert_eq!(pool.len(), 1);
        pool.recycle_subtree(root);
        assert_eq!(pool.free_count(), 1);

        let root2 = pool.allocate(None, GameState::init());
        assert_eq!(root2, root);
        assert_eq!(pool.len(), 1); // no new allocation, slot reused
    }

    #[test]
    fn recycle_subtree_frees_children_too() {
        let mut pool = NodePool::new();
        let root = pool.allocate(None, GameState::init());
        let child_a = pool.allocate(Some(root), GameState::init());
        let child_b = pool.allocate(Some(root), GameState::init());
        pool.get_mut(root).children.push(child_a);
        pool.get_mut(root).children.push(child_b);

        pool.recycle_subtree(root);
        assert_eq!(pool.free_count(), 3);
    }

    #[test]
    fn untried_moves_initialized_from_legal_moves() {
        let mut pool = NodePool::new();
        let root = pool.allocate(None, GameState::init());
        assert_eq!(pool.get(root).untried_moves.len(), 4);
    }
}
