//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    /// Zero leaves the tree empty and the search proposes no move.
    pub num_simulations: u32,

    /// Exploration constant `c` in UCB1. Must be finite and non-negative.
    /// Higher values encourage exploration, 0 is pure exploitation.
    pub exploration_constant: f64,

    /// Rollouts still running after this many plies are cut off and scored
    /// with the position scorer instead.
    pub max_rollout_plies: u32,

    /// Scorer units mapped onto the [0, 1] result scale at a cutoff:
    /// `0.5 * (1 + tanh(score / scale))`.
    pub rollout_score_scale: f64,

    /// Seed for the engine's random source. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            exploration_constant: 1.414,
            max_rollout_plies: 200,
            rollout_score_scale: 1000.0,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast, deterministic config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 200,
            max_rollout_plies: 40,
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the rollout length cap.
    pub fn with_max_rollout_plies(mut self, plies: u32) -> Self {
        self.max_rollout_plies = plies;
        self
    }

    /// Builder pattern: set the cutoff normalization scale.
    pub fn with_rollout_score_scale(mut self, scale: f64) -> Self {
        self.rollout_score_scale = scale;
        self
    }

    /// Builder pattern: fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
