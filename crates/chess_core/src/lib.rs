pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod scorer;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::{RulesError, SearchError};
pub use game::{DrawReason, GameState, Outcome};
pub use movegen::*;
pub use notation::*;
pub use perft::perft;
pub use scorer::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by the minimax, MCTS and network engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    /// The best move found (None if no legal moves, or a zero budget)
    pub best_move: Option<M>,
    /// Evaluation backing the choice, in the engine's own units
    pub score: f64,
    /// Nodes (minimax), rollouts (MCTS) or scored positions (network) spent
    /// on this call
    pub nodes: u64,
}

impl<M> SearchResult<M> {
    pub fn no_move(score: f64, nodes: u64) -> Self {
        Self {
            best_move: None,
            score,
            nodes,
        }
    }
}

/// Diagnostics snapshot: cumulative work counter plus the configuration in use.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Diagnostics {
    pub engine: String,
    /// Cumulative since construction or the last `reset_stats()`.
    pub nodes_evaluated: u64,
    pub config: serde_json::Value,
}

impl Diagnostics {
    pub fn new<C: serde::Serialize>(engine: &str, nodes_evaluated: u64, config: &C) -> Self {
        Self {
            engine: engine.to_string(),
            nodes_evaluated,
            config: serde_json::to_value(config).unwrap_or_default(),
        }
    }
}

/// Trait that all engines implement.
///
/// This allows swapping between alpha-beta search, MCTS and the learned
/// network. The position is borrowed mutably for the duration of the call and
/// is always handed back unchanged.
pub trait Engine<G: GameState> {
    /// Proposes a move for the side to move.
    fn search(&mut self, pos: &mut G) -> Result<SearchResult<G::Move>, SearchError>;

    /// Returns the engine's name for identification
    fn name(&self) -> &str;

    fn diagnostics(&self) -> Diagnostics;

    /// Zeroes the cumulative counter reported by `diagnostics()`.
    fn reset_stats(&mut self);

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
