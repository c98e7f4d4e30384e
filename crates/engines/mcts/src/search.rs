//! MCTS search implementation.
//!
//! Each simulation runs four phases on the borrowed position:
//! 1. Selection: descend by UCB1 while nodes are fully expanded
//! 2. Expansion: add one random untried move as a new child
//! 3. Rollout: play uniformly random moves to the end of the game or the cap
//! 4. Backpropagation: update visits and values back to the root
//!
//! Every move pushed during a simulation is popped before the next one
//! starts, so the position is back in its original state when `run` returns.

use chess_core::{Color, GameState, Outcome, RulesError, Scorer, SearchError};
use rand::Rng;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::{NodeId, SearchNode};
use crate::tree::SearchTree;

/// Result of an MCTS search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsOutcome<M> {
    /// Most visited root move, None for an empty tree
    pub best_move: Option<M>,

    /// Mean result of `best_move` for the side to move, in [0, 1]
    pub value: f64,

    /// Visits of `best_move`
    pub visits: u32,

    /// Number of simulations performed
    pub simulations: u32,

    /// Number of nodes in the final tree
    pub tree_size: usize,
}

/// Rollout result from White's point of view.
pub fn outcome_value(outcome: Outcome) -> f64 {
    match outcome.winner() {
        Some(Color::White) => 1.0,
        Some(Color::Black) => 0.0,
        None => 0.5,
    }
}

/// Maps a White-positive scorer value onto the rollout result scale.
pub fn normalize_score(score: f64, scale: f64) -> f64 {
    0.5 * (1.0 + (score / scale).tanh())
}

/// Rejects settings the search cannot run with.
pub fn validate_config(config: &MctsConfig) -> Result<(), SearchError> {
    let c = config.exploration_constant;
    if !c.is_finite() || c < 0.0 {
        return Err(SearchError::InvalidConfig(format!(
            "exploration constant must be finite and non-negative, got {c}"
        )));
    }
    let scale = config.rollout_score_scale;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SearchError::InvalidConfig(format!(
            "rollout score scale must be finite and positive, got {scale}"
        )));
    }
    Ok(())
}

/// MCTS search state for one call. The tree is dropped with it.
pub struct MctsSearch<'a, G: GameState, S: ?Sized, R> {
    tree: SearchTree<G::Move>,
    pos: &'a mut G,
    scorer: &'a S,
    rng: &'a mut R,
    config: &'a MctsConfig,
}

impl<'a, G, S, R> MctsSearch<'a, G, S, R>
where
    G: GameState,
    S: Scorer<G> + ?Sized,
    R: Rng,
{
    /// Create a search rooted at the current state of `pos`.
    pub fn new(
        pos: &'a mut G,
        scorer: &'a S,
        rng: &'a mut R,
        config: &'a MctsConfig,
    ) -> Result<Self, SearchError> {
        validate_config(config)?;

        let root = SearchNode::new_root(pos.side_to_move(), pos.legal_moves(), pos.is_terminal());
        Ok(Self {
            tree: SearchTree::new(root),
            pos,
            scorer,
            rng,
            config,
        })
    }

    /// Run the configured number of simulations and pick the most visited
    /// root move.
    pub fn run(mut self) -> Result<MctsOutcome<G::Move>, SearchError> {
        for _ in 0..self.config.num_simulations {
            let mut pushed = 0;
            let simulated = self.simulate(&mut pushed);
            let unwound = self.unwind(pushed);
            simulated?;
            unwound?;
        }

        let best = self.tree.best_child();
        let outcome = MctsOutcome {
            best_move: best.and_then(|id| self.tree.get(id).mv),
            value: best.map_or(0.5, |id| self.tree.get(id).mean_value()),
            visits: best.map_or(0, |id| self.tree.get(id).visit_count),
            simulations: self.config.num_simulations,
            tree_size: self.tree.len(),
        };

        debug!(
            simulations = outcome.simulations,
            tree_size = outcome.tree_size,
            visits = outcome.visits,
            value = outcome.value,
            best = ?outcome.best_move.map(|mv| self.pos.move_to_short(mv)),
            "MCTS search complete"
        );

        Ok(outcome)
    }

    /// One select, expand, rollout and backpropagate pass. `pushed` counts
    /// the moves applied to the position so the caller can undo them even
    /// when a step fails.
    fn simulate(&mut self, pushed: &mut usize) -> Result<(), RulesError> {
        let mut node_id = self.select(pushed)?;

        if !self.tree.get(node_id).is_terminal {
            node_id = self.expand(node_id, pushed)?;
        }

        let result = self.rollout(pushed)?;
        self.tree.backpropagate(node_id, result);

        trace!(
            leaf = node_id.0,
            plies = *pushed,
            result,
            "MCTS simulation complete"
        );

        Ok(())
    }

    /// Descend from the root while the current node is fully expanded and
    /// not terminal, applying each traversed move.
    fn select(&mut self, pushed: &mut usize) -> Result<NodeId, RulesError> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal || !node.is_fully_expanded() {
                return Ok(current);
            }

            let Some(child_id) = self
                .tree
                .select_child(current, self.config.exploration_constant)
            else {
                return Ok(current);
            };

            if let Some(mv) = self.tree.get(child_id).mv {
                self.pos.push(mv)?;
                *pushed += 1;
            }
            current = child_id;
        }
    }

    /// Take one untried move at random, apply it and add the child node.
    fn expand(&mut self, node_id: NodeId, pushed: &mut usize) -> Result<NodeId, RulesError> {
        let untried = &mut self.tree.get_mut(node_id).untried;
        if untried.is_empty() {
            return Ok(node_id);
        }
        let index = self.rng.gen_range(0..untried.len());
        let mv = untried.swap_remove(index);

        let mover = self.pos.side_to_move();
        self.pos.push(mv)?;
        *pushed += 1;

        let child = SearchNode::new_child(
            node_id,
            mv,
            mover,
            self.pos.legal_moves(),
            self.pos.is_terminal(),
        );
        Ok(self.tree.add_child(child))
    }

    /// Random playout from the current position. Returns White's result.
    fn rollout(&mut self, pushed: &mut usize) -> Result<f64, RulesError> {
        let mut plies = 0;
        loop {
            if let Some(outcome) = self.pos.outcome() {
                return Ok(outcome_value(outcome));
            }
            if plies >= self.config.max_rollout_plies {
                let score = self.scorer.score(&*self.pos);
                return Ok(normalize_score(score, self.config.rollout_score_scale));
            }

            let moves = self.pos.legal_moves();
            if moves.is_empty() {
                return Ok(0.5);
            }
            let mv = moves[self.rng.gen_range(0..moves.len())];
            self.pos.push(mv)?;
            *pushed += 1;
            plies += 1;
        }
    }

    fn unwind(&mut self, pushed: usize) -> Result<(), RulesError> {
        for _ in 0..pushed {
            self.pos.pop()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
