use chess_core::{GameState, Scorer};

use crate::features::board_features;
use crate::network::EvalNetwork;

/// Network output units per centipawn-scale unit. Training targets are
/// scorer values divided by this.
pub const OUTPUT_SCALE: f64 = 1000.0;

/// Scores positions with the evaluation network, White-positive, on the
/// same scale as the material scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkScorer {
    network: EvalNetwork,
}

impl NetworkScorer {
    pub fn new(network: EvalNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &EvalNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut EvalNetwork {
        &mut self.network
    }
}

impl<G: GameState> Scorer<G> for NetworkScorer {
    fn score(&self, pos: &G) -> f64 {
        self.network.forward(board_features(pos).view()) * OUTPUT_SCALE
    }
}
