use std::path::PathBuf;

use chess_core::SearchError;
use neural_engine::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid arena config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("failed to build engine: {0}")]
    Model(#[from] ModelError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}
