//! MCTS tree node representation.
//!
//! Each node is a game state reached by playing `mv` from its parent. The
//! position itself is never stored; the search replays moves on one borrowed
//! position instead.

use chess_core::Color;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct SearchNode<M> {
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,

    /// Move that led to this node from its parent (None for root)
    pub mv: Option<M>,

    /// Side that played `mv`. Accumulated value is kept from this side's
    /// point of view.
    pub mover: Color,

    /// Number of rollouts that passed through this node
    pub visit_count: u32,

    /// Sum of rollout results backpropagated through this node
    pub value_sum: f64,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    /// Legal moves not yet expanded
    pub untried: Vec<M>,

    /// Game over at this node
    pub is_terminal: bool,
}

impl<M> SearchNode<M> {
    /// Create a root node. `side_to_move` is the side choosing among the
    /// root's children.
    pub fn new_root(side_to_move: Color, untried: Vec<M>, is_terminal: bool) -> Self {
        Self {
            parent: None,
            mv: None,
            mover: side_to_move.other(),
            visit_count: 0,
            value_sum: 0.0,
            children: Vec::new(),
            untried,
            is_terminal,
        }
    }

    pub fn new_child(
        parent: NodeId,
        mv: M,
        mover: Color,
        untried: Vec<M>,
        is_terminal: bool,
    ) -> Self {
        Self {
            parent: Some(parent),
            mv: Some(mv),
            mover,
            visit_count: 0,
            value_sum: 0.0,
            children: Vec::new(),
            untried,
            is_terminal,
        }
    }

    /// Mean result, for the side that moved into this node.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f64
        }
    }

    /// UCB1 score: `mean + c * sqrt(ln(N) / n)`.
    ///
    /// Unvisited nodes score infinity so every child is tried once before
    /// any is exploited.
    #[inline]
    pub fn ucb1(&self, ln_parent_visits: f64, exploration_constant: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let n = self.visit_count as f64;
        self.mean_value() + exploration_constant * (ln_parent_visits / n).sqrt()
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Result of a rollout seen from `mover`: `result` is White's share.
    #[inline]
    pub fn result_for_mover(&self, white_result: f64) -> f64 {
        match self.mover {
            Color::White => white_result,
            Color::Black => 1.0 - white_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_root() {
        let root = SearchNode::new_root(Color::White, vec![1u8, 2, 3], false);
        assert_eq!(root.parent, None);
        assert_eq!(root.mv, None);
        assert_eq!(root.mover, Color::Black);
        assert_eq!(root.visit_count, 0);
        assert!(!root.is_fully_expanded());
    }

    #[test]
    fn test_unvisited_child_scores_infinity() {
        let child = SearchNode::new_child(NodeId(0), 5u8, Color::White, vec![], false);
        assert_eq!(child.ucb1(2.0_f64.ln(), 1.414), f64::INFINITY);
        assert_eq!(child.mean_value(), 0.0);
    }

    #[test]
    fn test_ucb1_formula() {
        let mut child = SearchNode::new_child(NodeId(0), 5u8, Color::White, vec![], false);
        child.visit_count = 4;
        child.value_sum = 3.0;

        let ln_parent = 16.0_f64.ln();
        let expected = 0.75 + 2.0 * (ln_parent / 4.0).sqrt();
        assert!((child.ucb1(ln_parent, 2.0) - expected).abs() < 1e-12);

        // Zero exploration is pure exploitation
        assert_eq!(child.ucb1(ln_parent, 0.0), 0.75);
    }

    #[test]
    fn test_result_for_mover_flips_for_black() {
        let white = SearchNode::new_child(NodeId(0), 0u8, Color::White, vec![], false);
        let black = SearchNode::new_child(NodeId(0), 0u8, Color::Black, vec![], false);
        assert_eq!(white.result_for_mover(1.0), 1.0);
        assert_eq!(black.result_for_mover(1.0), 0.0);
        assert_eq!(black.result_for_mover(0.5), 0.5);
    }
}
