use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while training the evaluation network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainingError {
    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("sample {index} has {actual} features, network expects {expected}")]
    ShapeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("no training samples")]
    NoSamples,
}

/// Errors raised while loading or saving a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("model I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed model: {0}")]
    Shape(String),
}
