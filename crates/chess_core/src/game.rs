//! The position interface consumed by every search engine.
//!
//! Engines never touch [`Position`] internals. They drive a game through
//! [`GameState`]: enumerate moves, push/pop them in strictly balanced pairs,
//! and query terminal status, side to move and the board encoding.

use std::fmt::Debug;

use crate::{
    board::Position,
    error::RulesError,
    movegen::{has_legal_move, legal_moves},
    notation,
    types::{BoardEncoding, Color, Move},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Draw(DrawReason),
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(*winner),
            Outcome::Draw(_) => None,
        }
    }
}

/// Mutable game-state handle with make/undo semantics.
pub trait GameState {
    type Move: Copy + Eq + Debug;

    /// Legal moves in a fixed, deterministic order, without duplicates.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Applies a move. Fails without changing anything if the move is illegal.
    fn push(&mut self, mv: Self::Move) -> Result<(), RulesError>;

    /// Undoes the most recent pushed move.
    fn pop(&mut self) -> Result<Self::Move, RulesError>;

    /// `Some` exactly when the game is over.
    fn outcome(&self) -> Option<Outcome>;

    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    fn side_to_move(&self) -> Color;

    fn encode(&self) -> BoardEncoding;

    /// Textual board notation (FEN for chess).
    fn to_notation(&self) -> String;

    /// Short-form move notation (SAN for chess). Diagnostics only.
    fn move_to_short(&self, mv: Self::Move) -> String;

    /// Coordinate move notation (UCI for chess). Diagnostics only.
    fn move_to_coord(&self, mv: Self::Move) -> String;
}

impl GameState for Position {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    fn push(&mut self, mv: Move) -> Result<(), RulesError> {
        Position::push(self, mv)
    }

    fn pop(&mut self) -> Result<Move, RulesError> {
        Position::pop(self)
    }

    fn outcome(&self) -> Option<Outcome> {
        if !has_legal_move(self) {
            return Some(if self.in_check(self.side_to_move) {
                Outcome::Checkmate {
                    winner: self.side_to_move.other(),
                }
            } else {
                Outcome::Draw(DrawReason::Stalemate)
            });
        }
        if self.is_insufficient_material() {
            return Some(Outcome::Draw(DrawReason::InsufficientMaterial));
        }
        if self.is_fifty_move_draw() {
            return Some(Outcome::Draw(DrawReason::FiftyMoveRule));
        }
        if self.is_threefold_repetition() {
            return Some(Outcome::Draw(DrawReason::ThreefoldRepetition));
        }
        None
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn encode(&self) -> BoardEncoding {
        Position::encode(self)
    }

    fn to_notation(&self) -> String {
        self.to_fen()
    }

    fn move_to_short(&self, mv: Move) -> String {
        notation::move_to_san(self, mv)
    }

    fn move_to_coord(&self, mv: Move) -> String {
        notation::move_to_uci(mv)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
