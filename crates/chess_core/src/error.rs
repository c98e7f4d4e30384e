//! Error types shared by the rules engine and the search engines.

use thiserror::Error;

/// Failures reported by the rules engine.
///
/// Engines treat these as contract violations and propagate them instead of
/// continuing with an unbalanced make/undo stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no move to undo")]
    NoMoveToUndo,

    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// Errors returned by engine search calls.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("rules engine error: {0}")]
    Rules(#[from] RulesError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
