//! Minimax Chess Engine
//!
//! Depth-bounded alpha-beta search over any [`GameState`], with a pluggable
//! [`Scorer`] at the leaves. This is the baseline engine the statistical and
//! learned engines are compared against.

mod search;

pub use search::pick_best_move;

use chess_core::{
    DefaultScorer, Diagnostics, Engine, GameState, Scorer, SearchError, SearchResult,
};
use serde::{Deserialize, Serialize};

/// Search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Search depth in plies. 0 evaluates the root and proposes no move.
    pub depth: u8,
    /// Skip siblings once `alpha >= beta`. Off gives a full minimax with the
    /// same result.
    pub alpha_beta: bool,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            alpha_beta: true,
        }
    }
}

impl MinimaxConfig {
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_alpha_beta(mut self, alpha_beta: bool) -> Self {
        self.alpha_beta = alpha_beta;
        self
    }
}

/// Alpha-beta minimax engine.
///
/// White maximizes the scorer's value and Black minimizes it. The node
/// counter is cumulative across searches until [`Engine::reset_stats`].
#[derive(Debug, Clone)]
pub struct MinimaxEngine<S = DefaultScorer> {
    config: MinimaxConfig,
    scorer: S,
    /// Cached name string (avoids allocation on every call)
    name: String,
    /// Node counter for statistics
    nodes: u64,
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(MinimaxConfig::default())
    }
}

impl MinimaxEngine {
    /// Creates an engine using the material scorer with terminal overrides.
    pub fn new(config: MinimaxConfig) -> Self {
        Self::with_scorer(config, DefaultScorer::default())
    }
}

impl<S> MinimaxEngine<S> {
    pub fn with_scorer(config: MinimaxConfig, scorer: S) -> Self {
        Self {
            name: format!("Minimax d{}", config.depth),
            config,
            scorer,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(&self.name, self.nodes, &self.config)
    }

    pub fn reset_stats(&mut self) {
        self.nodes = 0;
    }

    /// Searches `pos` to `depth` plies, overriding the configured depth.
    ///
    /// # Returns
    /// `best_move` is `None` when there are no legal moves or `depth` is 0;
    /// `score` is the White-positive root evaluation either way.
    pub fn best_move<G>(
        &mut self,
        pos: &mut G,
        depth: u8,
    ) -> Result<SearchResult<G::Move>, SearchError>
    where
        G: GameState,
        S: Scorer<G>,
    {
        let result = pick_best_move(
            pos,
            depth,
            self.config.alpha_beta,
            &self.scorer,
            &mut self.nodes,
        )?;
        Ok(result)
    }
}

impl<G, S> Engine<G> for MinimaxEngine<S>
where
    G: GameState,
    S: Scorer<G>,
{
    fn search(&mut self, pos: &mut G) -> Result<SearchResult<G::Move>, SearchError> {
        self.best_move(pos, self.config.depth)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn diagnostics(&self) -> Diagnostics {
        MinimaxEngine::<S>::diagnostics(self)
    }

    fn reset_stats(&mut self) {
        MinimaxEngine::<S>::reset_stats(self)
    }
}
