//! Two-layer feed-forward regressor: `tanh(x·W1 + b1)·W2 + b2`.
//!
//! Trained with plain per-sample gradient descent on the squared residual.
//! No momentum, batching or regularization.

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ModelError, TrainingError};

/// Standard deviation of the initial weights.
const INIT_STD: f64 = 0.01;

/// One training example: network input and regression target.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Array1<f64>,
    pub target: f64,
}

impl Sample {
    pub fn new(features: Array1<f64>, target: f64) -> Self {
        Self { features, target }
    }
}

/// Per-epoch mean squared residual. Observability only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    pub epoch_losses: Vec<f64>,
}

impl TrainingReport {
    pub fn initial_loss(&self) -> Option<f64> {
        self.epoch_losses.first().copied()
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.epoch_losses.last().copied()
    }
}

/// Activations kept from a forward pass for backpropagation.
struct ForwardPass {
    hidden: Array1<f64>,
    output: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalNetwork {
    /// input × hidden
    w1: Array2<f64>,
    b1: Array1<f64>,
    /// hidden × 1
    w2: Array2<f64>,
    b2: Array1<f64>,
}

impl EvalNetwork {
    /// Gaussian weights (σ = 0.01) and zero biases.
    pub fn new<R: Rng>(input_size: usize, hidden_size: usize, rng: &mut R) -> Self {
        let mut init = || INIT_STD * rng.sample::<f64, _>(StandardNormal);
        let w1 = Array2::from_shape_simple_fn((input_size, hidden_size), &mut init);
        let w2 = Array2::from_shape_simple_fn((hidden_size, 1), &mut init);
        Self {
            w1,
            b1: Array1::zeros(hidden_size),
            w2,
            b2: Array1::zeros(1),
        }
    }

    pub fn input_size(&self) -> usize {
        self.w1.nrows()
    }

    pub fn hidden_size(&self) -> usize {
        self.w1.ncols()
    }

    /// Scalar prediction for `input`. Pure.
    ///
    /// # Panics
    /// If `input.len()` differs from [`input_size`](Self::input_size).
    pub fn forward(&self, input: ArrayView1<f64>) -> f64 {
        self.forward_pass(input).output
    }

    fn forward_pass(&self, input: ArrayView1<f64>) -> ForwardPass {
        let hidden = (input.dot(&self.w1) + &self.b1).mapv(f64::tanh);
        let output = hidden.dot(&self.w2.column(0)) + self.b2[0];
        ForwardPass { hidden, output }
    }

    /// Trains on `samples` in order for `epochs` passes, one gradient step
    /// per sample.
    ///
    /// # Returns
    /// The mean squared residual of every epoch, measured while training.
    pub fn train(
        &mut self,
        samples: &[Sample],
        epochs: usize,
        learning_rate: f64,
    ) -> Result<TrainingReport, TrainingError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(TrainingError::InvalidLearningRate(learning_rate));
        }
        if samples.is_empty() {
            return Err(TrainingError::NoSamples);
        }
        let expected = self.input_size();
        if let Some((index, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.features.len() != expected)
        {
            return Err(TrainingError::ShapeMismatch {
                index,
                expected,
                actual: sample.features.len(),
            });
        }

        let mut report = TrainingReport {
            epoch_losses: Vec::with_capacity(epochs),
        };
        for epoch in 0..epochs {
            let total: f64 = samples
                .iter()
                .map(|sample| self.step(sample, learning_rate))
                .sum();
            let loss = total / samples.len() as f64;
            report.epoch_losses.push(loss);

            if epoch % 10 == 0 {
                info!(epoch, loss, "training");
            }
        }

        debug!(
            epochs,
            samples = samples.len(),
            final_loss = ?report.final_loss(),
            "training complete"
        );
        Ok(report)
    }

    /// One SGD update. Returns the squared residual before the update.
    fn step(&mut self, sample: &Sample, learning_rate: f64) -> f64 {
        let pass = self.forward_pass(sample.features.view());
        let residual = pass.output - sample.target;

        // Hidden gradient uses W2 before it is updated
        let dz1 = self.w2.column(0).mapv(|w| w * residual)
            * pass.hidden.mapv(|a| 1.0 - a * a);
        let dw1 = sample
            .features
            .view()
            .insert_axis(Axis(1))
            .dot(&dz1.view().insert_axis(Axis(0)));

        self.w2
            .column_mut(0)
            .scaled_add(-learning_rate * residual, &pass.hidden);
        self.b2[0] -= learning_rate * residual;
        self.w1.scaled_add(-learning_rate, &dw1);
        self.b1.scaled_add(-learning_rate, &dz1);

        residual * residual
    }

    /// Writes the weights as JSON.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Reads weights written by [`save`](Self::save) and checks the layer
    /// shapes agree.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let network: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
        network.check_shapes()?;
        Ok(network)
    }

    fn check_shapes(&self) -> Result<(), ModelError> {
        let hidden = self.hidden_size();
        if self.b1.len() != hidden || self.w2.dim() != (hidden, 1) || self.b2.len() != 1 {
            return Err(ModelError::Shape(format!(
                "w1 {:?}, b1 {}, w2 {:?}, b2 {}",
                self.w1.dim(),
                self.b1.len(),
                self.w2.dim(),
                self.b2.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "network_tests.rs"]
mod network_tests;
