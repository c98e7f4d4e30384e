//! MCTS tree structure with arena allocation.
//!
//! Nodes live in one contiguous Vec and refer to each other by `NodeId`.
//! Parents are plain indices, so the whole tree is dropped in one step when
//! a search call returns.

use crate::node::{NodeId, SearchNode};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<M> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<M>>,
}

impl<M: Copy> SearchTree<M> {
    /// Create a new tree holding only `root`.
    pub fn new(root: SearchNode<M>) -> Self {
        Self { nodes: vec![root] }
    }

    /// Root node ID (always 0).
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<M> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<M> {
        &mut self.nodes[id.index()]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate `child` and link it under its parent.
    pub fn add_child(&mut self, child: SearchNode<M>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = child.parent;
        self.nodes.push(child);
        if let Some(parent) = parent {
            self.get_mut(parent).children.push(id);
        }
        id
    }

    /// Child maximizing UCB1, first found on ties.
    ///
    /// An unvisited child is returned as soon as it is seen.
    pub fn select_child(&self, node_id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // ln(N) is shared by every child
        let ln_parent_visits = (node.visit_count.max(1) as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let child = self.get(child_id);
            if child.visit_count == 0 {
                return Some(child_id);
            }
            let score = child.ucb1(ln_parent_visits, exploration_constant);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Walk from `leaf_id` to the root adding one visit and the rollout
    /// result, flipped to each node's mover. `white_result` is White's share.
    pub fn backpropagate(&mut self, leaf_id: NodeId, white_result: f64) {
        let mut current = Some(leaf_id);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visit_count += 1;
            node.value_sum += node.result_for_mover(white_result);
            current = node.parent;
        }
    }

    /// Most visited root child, first found on ties.
    pub fn best_child(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, u32)> = None;
        for &child_id in &self.get(self.root()).children {
            let visits = self.get(child_id).visit_count;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((child_id, visits)),
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
