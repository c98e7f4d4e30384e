//! Neural Network Chess Engine
//!
//! A small learned evaluator used as a one-ply move selector. The network is
//! a 64-128-1 regressor with a tanh hidden layer, trained by plain SGD to
//! approximate a static scorer (see [`training`]).
//!
//! # Model Loading
//!
//! Models are stored as JSON in versioned subdirectories:
//! ```text
//! models/
//!   v001/
//!     network.json
//!   v002/
//!     network.json
//! ```

pub mod error;
pub mod features;
pub mod network;
pub mod scorer;
pub mod training;

pub use error::{ModelError, TrainingError};
pub use features::{board_features, NUM_FEATURES};
pub use network::{EvalNetwork, Sample, TrainingReport};
pub use scorer::{NetworkScorer, OUTPUT_SCALE};
pub use training::collect_training_positions;

use std::path::{Path, PathBuf};

use chess_core::{
    Color, Diagnostics, Engine, GameState, RulesError, Scorer, SearchError, SearchResult,
    TerminalOverride,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// File name of a saved network inside a model version directory.
pub const MODEL_FILE: &str = "network.json";

/// Network shape and training settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub hidden_size: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    /// Seed for weight initialization. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hidden_size: 128,
            epochs: 100,
            learning_rate: 0.01,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// What `diagnostics()` reports as configuration.
#[derive(Serialize)]
struct EngineInfo<'a> {
    layers: [usize; 3],
    version: &'a str,
    #[serde(flatten)]
    config: &'a NetworkConfig,
}

/// Network-driven chess engine.
///
/// Scores the position after every legal move with the network and plays the
/// best one for the side to move. Finished games bypass the network:
/// checkmate scores ±10000 and draws 0.
pub struct NeuralEngine {
    scorer: TerminalOverride<NetworkScorer>,
    config: NetworkConfig,
    /// Model version string
    version: String,
    /// Path to the loaded model (if any)
    model_path: Option<PathBuf>,
    /// Cached name string
    name: String,
    /// Positions scored, for statistics
    nodes: u64,
}

impl Default for NeuralEngine {
    fn default() -> Self {
        Self::new(NetworkConfig::default())
    }
}

impl NeuralEngine {
    /// Creates an engine with a freshly initialized, untrained network.
    pub fn new(config: NetworkConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let network = EvalNetwork::new(NUM_FEATURES, config.hidden_size, &mut rng);
        Self::from_network(network, config, "untrained")
    }

    fn from_network(network: EvalNetwork, config: NetworkConfig, version: &str) -> Self {
        Self {
            scorer: TerminalOverride::new(NetworkScorer::new(network)),
            config,
            version: version.to_string(),
            model_path: None,
            name: format!("Neural-{version}"),
            nodes: 0,
        }
    }

    /// Creates a neural engine with a specific model version.
    ///
    /// # Arguments
    /// * `models_dir` - Base directory containing model versions (e.g., "models/")
    /// * `version` - Version string (e.g., "v001")
    ///
    /// # Example
    /// ```ignore
    /// let engine = NeuralEngine::with_model("models/", "v001")?;
    /// ```
    pub fn with_model(models_dir: impl AsRef<Path>, version: &str) -> Result<Self, ModelError> {
        let model_path = models_dir.as_ref().join(version).join(MODEL_FILE);
        let network = EvalNetwork::load(&model_path)?;

        if network.input_size() != NUM_FEATURES {
            return Err(ModelError::Shape(format!(
                "expected {NUM_FEATURES} inputs, model has {}",
                network.input_size()
            )));
        }

        let config = NetworkConfig::default().with_hidden_size(network.hidden_size());
        let mut engine = Self::from_network(network, config, version);
        engine.model_path = Some(model_path);
        Ok(engine)
    }

    /// Saves the current network under `models_dir/version/` and returns the
    /// file path.
    pub fn save_model(
        &self,
        models_dir: impl AsRef<Path>,
        version: &str,
    ) -> Result<PathBuf, ModelError> {
        let path = models_dir.as_ref().join(version).join(MODEL_FILE);
        self.network().save(&path)?;
        Ok(path)
    }

    /// Returns the currently loaded model version.
    pub fn model_version(&self) -> &str {
        &self.version
    }

    /// Returns the path to the currently loaded model, if any.
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn network(&self) -> &EvalNetwork {
        self.scorer.inner.network()
    }

    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let info = EngineInfo {
            layers: [NUM_FEATURES, self.network().hidden_size(), 1],
            version: &self.version,
            config: &self.config,
        };
        Diagnostics::new(&self.name, self.nodes, &info)
    }

    pub fn reset_stats(&mut self) {
        self.nodes = 0;
    }

    /// Trains the network with the configured epochs and learning rate.
    pub fn train(&mut self, samples: &[Sample]) -> Result<TrainingReport, TrainingError> {
        let (epochs, learning_rate) = (self.config.epochs, self.config.learning_rate);
        self.scorer
            .inner
            .network_mut()
            .train(samples, epochs, learning_rate)
    }

    /// Picks the move whose resulting position the network likes best for
    /// the side to move: White takes the maximum score, Black the minimum.
    ///
    /// Ties keep the first move in generation order. `best_move` is `None`
    /// only when there are no legal moves.
    pub fn best_move<G: GameState>(
        &mut self,
        pos: &mut G,
    ) -> Result<SearchResult<G::Move>, SearchError> {
        Ok(pick_one_ply(pos, &self.scorer, &mut self.nodes)?)
    }
}

/// One-ply selection: push each legal move, score the result, pop.
///
/// When no score beats the initial bound (NaN scores) the first legal move
/// is returned together with its own score.
fn pick_one_ply<G, S>(
    pos: &mut G,
    scorer: &S,
    nodes: &mut u64,
) -> Result<SearchResult<G::Move>, RulesError>
where
    G: GameState,
    S: Scorer<G> + ?Sized,
{
    let moves = pos.legal_moves();
    if moves.is_empty() {
        return Ok(SearchResult::no_move(scorer.score(&*pos), 0));
    }

    let maximizing = pos.side_to_move() == Color::White;
    let start_nodes = *nodes;
    let mut best_move = None;
    let mut best_score = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut first_score = best_score;

    for (i, &mv) in moves.iter().enumerate() {
        pos.push(mv)?;
        let value = scorer.score(&*pos);
        *nodes += 1;
        pos.pop()?;

        if i == 0 {
            first_score = value;
        }
        let improves = if maximizing {
            value > best_score
        } else {
            value < best_score
        };
        if improves {
            best_score = value;
            best_move = Some(mv);
        }
    }

    if best_move.is_none() {
        warn!(
            fen = %pos.to_notation(),
            "no move improved on the initial bound, falling back to the first legal move"
        );
        best_move = Some(moves[0]);
        best_score = first_score;
    }

    if let Some(mv) = best_move {
        debug!(
            best = %pos.move_to_short(mv),
            score = best_score,
            "network move selection"
        );
    }

    Ok(SearchResult {
        best_move,
        score: best_score,
        nodes: *nodes - start_nodes,
    })
}

impl<G: GameState> Engine<G> for NeuralEngine {
    fn search(&mut self, pos: &mut G) -> Result<SearchResult<G::Move>, SearchError> {
        self.best_move(pos)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn diagnostics(&self) -> Diagnostics {
        NeuralEngine::diagnostics(self)
    }

    fn reset_stats(&mut self) {
        NeuralEngine::reset_stats(self)
    }
}
