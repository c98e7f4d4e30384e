//! Monte Carlo Tree Search engine with random rollouts.
//!
//! Works with any position implementing [`GameState`]. Each search builds a
//! fresh tree from the given position and runs a fixed number of simulations:
//!
//! 1. **Selection**: descend through fully expanded nodes by UCB1,
//!    `mean + c * sqrt(ln(N) / n)`, trying unvisited children first
//! 2. **Expansion**: add one random untried move
//! 3. **Rollout**: play random moves until the game ends, or score the
//!    position with a [`Scorer`] once the ply cap is reached
//! 4. **Backpropagation**: add the result to every node on the path, from
//!    the point of view of the side that moved into that node
//!
//! The move played is the most visited root child.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chess_core::{Engine, Position};
//! use mcts_engine::{MctsConfig, MctsEngine};
//!
//! let mut engine = MctsEngine::new(MctsConfig::default().with_seed(42));
//! let mut pos = Position::startpos();
//! let result = engine.search(&mut pos)?;
//! ```

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

pub use config::MctsConfig;
pub use node::{NodeId, SearchNode};
pub use search::{normalize_score, outcome_value, MctsOutcome, MctsSearch};
pub use tree::SearchTree;

use chess_core::{
    DefaultScorer, Diagnostics, Engine, GameState, Scorer, SearchError, SearchResult,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Run MCTS from `pos` with an explicit random source.
///
/// `pos` is restored before returning. A zero simulation budget returns an
/// outcome without a move even when legal moves exist.
pub fn run_mcts<G, S, R>(
    pos: &mut G,
    config: &MctsConfig,
    scorer: &S,
    rng: &mut R,
) -> Result<MctsOutcome<G::Move>, SearchError>
where
    G: GameState,
    S: Scorer<G> + ?Sized,
    R: Rng,
{
    MctsSearch::new(pos, scorer, rng, config)?.run()
}

/// MCTS engine owning its random source.
///
/// The diagnostics counter is the cumulative number of rollouts.
#[derive(Debug, Clone)]
pub struct MctsEngine<S = DefaultScorer> {
    config: MctsConfig,
    scorer: S,
    rng: ChaCha20Rng,
    name: String,
    rollouts: u64,
}

impl Default for MctsEngine {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

impl MctsEngine {
    pub fn new(config: MctsConfig) -> Self {
        Self::with_scorer(config, DefaultScorer::default())
    }
}

impl<S> MctsEngine<S> {
    /// Create an engine that scores truncated rollouts with `scorer`.
    pub fn with_scorer(config: MctsConfig, scorer: S) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self {
            name: format!("MCTS {}", config.num_simulations),
            config,
            scorer,
            rng,
            rollouts: 0,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn rollouts(&self) -> u64 {
        self.rollouts
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(&self.name, self.rollouts, &self.config)
    }

    pub fn reset_stats(&mut self) {
        self.rollouts = 0;
    }

    /// Searches with an explicit budget and exploration constant, overriding
    /// the configured ones.
    ///
    /// # Returns
    /// `best_move` is `None` for a zero budget or a position without legal
    /// moves. `score` is the chosen move's mean result for the side to move.
    pub fn best_move<G>(
        &mut self,
        pos: &mut G,
        simulations: u32,
        exploration_constant: f64,
    ) -> Result<SearchResult<G::Move>, SearchError>
    where
        G: GameState,
        S: Scorer<G>,
    {
        let config = self
            .config
            .clone()
            .with_simulations(simulations)
            .with_exploration_constant(exploration_constant);

        let outcome = run_mcts(pos, &config, &self.scorer, &mut self.rng)?;
        let rollouts = u64::from(outcome.simulations);
        self.rollouts += rollouts;

        Ok(SearchResult {
            best_move: outcome.best_move,
            score: outcome.value,
            nodes: rollouts,
        })
    }
}

impl<G, S> Engine<G> for MctsEngine<S>
where
    G: GameState,
    S: Scorer<G>,
{
    fn search(&mut self, pos: &mut G) -> Result<SearchResult<G::Move>, SearchError> {
        self.best_move(
            pos,
            self.config.num_simulations,
            self.config.exploration_constant,
        )
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn diagnostics(&self) -> Diagnostics {
        MctsEngine::<S>::diagnostics(self)
    }

    fn reset_stats(&mut self) {
        MctsEngine::<S>::reset_stats(self)
    }

    /// Reseeds from the configured seed so seeded games replay identically.
    fn new_game(&mut self) {
        if let Some(seed) = self.config.seed {
            self.rng = ChaCha20Rng::seed_from_u64(seed);
        }
    }
}
