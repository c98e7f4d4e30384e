//! Position scoring shared by every engine.
//!
//! All scorers use one convention: larger values favour White. Minimax leaf
//! evaluation, MCTS rollout cutoffs and network training targets all read the
//! same scale.

use crate::{
    game::{GameState, Outcome},
    types::{Color, Piece, PieceKind},
};

/// Score magnitude for a checkmated position.
pub const MATE_SCORE: f64 = 10_000.0;

/// Material values in centipawns, indexed by `PieceKind::idx()`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [f64; 6] = [100.0, 320.0, 330.0, 500.0, 900.0, 0.0];

/// Numeric evaluation of a position, White-positive.
pub trait Scorer<G: GameState> {
    fn score(&self, pos: &G) -> f64;
}

impl<G: GameState, S: Scorer<G> + ?Sized> Scorer<G> for &S {
    fn score(&self, pos: &G) -> f64 {
        (**self).score(pos)
    }
}

/// Static heuristic: material balance read from the board encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl<G: GameState> Scorer<G> for MaterialScorer {
    fn score(&self, pos: &G) -> f64 {
        pos.encode()
            .iter()
            .flatten()
            .filter_map(|&code| Piece::from_code(code))
            .map(|pc| piece_value(pc.kind) * pc.color.sign())
            .sum()
    }
}

fn piece_value(kind: PieceKind) -> f64 {
    PIECE_VALUES[kind.idx()]
}

/// Scores finished games directly and defers to `inner` otherwise:
/// checkmate is `±MATE_SCORE` for the winner, any draw is 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalOverride<S> {
    pub inner: S,
}

impl<S> TerminalOverride<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<G: GameState, S: Scorer<G>> Scorer<G> for TerminalOverride<S> {
    fn score(&self, pos: &G) -> f64 {
        match pos.outcome() {
            Some(outcome) => terminal_score(outcome),
            None => self.inner.score(pos),
        }
    }
}

pub fn terminal_score(outcome: Outcome) -> f64 {
    match outcome.winner() {
        Some(Color::White) => MATE_SCORE,
        Some(Color::Black) => -MATE_SCORE,
        None => 0.0,
    }
}

/// Default heuristic used by engines that are not given a scorer.
pub type DefaultScorer = TerminalOverride<MaterialScorer>;

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod scorer_tests;
