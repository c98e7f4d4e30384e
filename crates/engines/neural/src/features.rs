//! Network input features.

use chess_core::GameState;
use ndarray::Array1;

/// Number of input features: one per square.
pub const NUM_FEATURES: usize = 64;

/// Largest absolute piece code in the board encoding (king).
const MAX_PIECE_CODE: f64 = 6.0;

/// Board encoding flattened rank 8 first, scaled into [-1, 1].
pub fn board_features<G: GameState>(pos: &G) -> Array1<f64> {
    pos.encode()
        .iter()
        .flatten()
        .map(|&code| f64::from(code) / MAX_PIECE_CODE)
        .collect()
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod features_tests;
