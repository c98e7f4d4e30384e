//! Arena configuration loaded from TOML.
//!
//! ```toml
//! games = 4
//! max_moves = 150
//!
//! [engine1]
//! kind = "minimax"
//! depth = 3
//!
//! [engine2]
//! kind = "mcts"
//! num_simulations = 500
//! seed = 7
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chess_core::{Engine, Position};
use mcts_engine::{MctsConfig, MctsEngine};
use minimax_engine::{MinimaxConfig, MinimaxEngine};
use neural_engine::{NetworkConfig, NeuralEngine};
use serde::{Deserialize, Serialize};

use crate::error::TournamentError;
use crate::match_runner::MatchConfig;

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

/// Which engine to build, with its settings inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EngineSpec {
    Minimax(MinimaxConfig),
    Mcts(MctsConfig),
    Neural(NeuralSpec),
}

/// Network engine settings. With `version` set the weights are loaded from
/// `models_dir/<version>/network.json`, otherwise the network starts
/// untrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralSpec {
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(flatten)]
    pub network: NetworkConfig,
}

impl EngineSpec {
    pub fn build(&self) -> Result<Box<dyn Engine<Position>>, TournamentError> {
        Ok(match self {
            EngineSpec::Minimax(config) => Box::new(MinimaxEngine::new(*config)),
            EngineSpec::Mcts(config) => Box::new(MctsEngine::new(config.clone())),
            EngineSpec::Neural(spec) => match &spec.version {
                Some(version) => Box::new(NeuralEngine::with_model(&spec.models_dir, version)?),
                None => Box::new(NeuralEngine::new(spec.network.clone())),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of games to play
    pub games: u32,
    /// Plies per game before declaring a draw
    pub max_moves: u32,
    /// Whether engine1 switches colour every game
    pub alternate_colors: bool,
    pub engine1: EngineSpec,
    pub engine2: EngineSpec,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_moves: 200,
            alternate_colors: true,
            engine1: EngineSpec::Minimax(MinimaxConfig::default()),
            engine2: EngineSpec::Mcts(MctsConfig::default()),
        }
    }
}

impl ArenaConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, TournamentError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let text = fs::read_to_string(path).map_err(|source| TournamentError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            num_games: self.games,
            max_moves: self.max_moves,
            alternate_colors: self.alternate_colors,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
