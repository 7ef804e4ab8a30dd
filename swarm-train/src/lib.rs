//! # SwarmTrain
//!
//! **Gradient-free training of feedforward classifiers with a particle swarm.**
//!
//! The weight vector of a fixed-topology network is treated as a point in
//! continuous space. A swarm of particles searches that space, scoring each
//! position by the network's mean squared error on the training set. Every
//! stochastic decision comes from one explicitly seeded generator, so a run is
//! bit-reproducible.
//!
//! ## Quick Start
//!
//! ```rust
//! use swarm_train::prelude::*;
//!
//! # fn main() -> swarm_train::Result<()> {
//! let data = swarm_train::iris::train_set()?;
//! let mut net = FeedForwardNet::new(4, 6, 3)?;
//!
//! let config = TrainingConfig::builder()
//!     .num_particles(6)
//!     .max_epochs(20)
//!     .build();
//! let mut trainer = Trainer::new(config)?;
//! let report = trainer.train(&mut net, &data)?;
//!
//! assert_eq!(report.outcome.best_position.len(), 51);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`swarm_train_core`]: RNG, fitness seam and the swarm optimizer (no_std compatible)
//! - [`swarm_train_models`]: feedforward scorer, dataset, loss selection
//! - [`checkpoint`]: weight checkpoint files
//! - [`report`]: plain-text rendering of vectors and matrices
//! - [`iris`]: the 30-row iris sample used by the demo binary

#![forbid(unsafe_code)]

// Re-export sub-crates
pub use swarm_train_core as core;
pub use swarm_train_models as models;

// Re-export commonly used items at the top level
pub use swarm_train_core::{
    algorithms::{ParticleSwarmConfig, SwarmOutcome, SwarmState, Termination},
    rng::{UniformExt, XorShift128, REFERENCE_SEED},
    swarm::ParticleSwarm,
    traits::{FitnessFunction, SwarmModel},
    Error as CoreError,
};
pub use swarm_train_models::{
    data::Dataset,
    feedforward::{FeedForwardNet, NetworkShape, TrainingParams},
    fitness::Loss,
    WeightCheckpoint,
};

pub mod checkpoint;
pub mod iris;
pub mod report;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Prelude module for convenient imports
///
/// ```rust
/// use swarm_train::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::models::prelude::*;

    pub use crate::{Trainer, TrainingConfig, TrainingReport};
}

/// Result type for SwarmTrain operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the top-level crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Shape, parameter or dataset error from the core crates
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Checkpoint file could not be read or written
    #[error("checkpoint i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Checkpoint file is not valid JSON for the expected schema
    #[error("checkpoint encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Stored digest does not match the stored weights
    #[error("checkpoint digest mismatch: expected {expected}, found {actual}")]
    ChecksumMismatch { expected: String, actual: String },
    /// Checkpoint was written by an unknown schema version
    #[error("unsupported checkpoint schema version {0}")]
    UnsupportedVersion(u32),
}

/// Configuration for a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Swarm parameters
    pub swarm: ParticleSwarmConfig,
    /// Loss minimized by the swarm
    pub loss: Loss,
    /// Seed words of the trainer's generator
    pub seed: [u32; 4],
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            swarm: ParticleSwarmConfig::default(),
            loss: Loss::MeanSquared,
            seed: REFERENCE_SEED,
        }
    }
}

impl TrainingConfig {
    /// Create a new builder
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::new()
    }

    /// Parameters handed to [`FeedForwardNet::train`].
    pub fn params(&self) -> TrainingParams {
        TrainingParams {
            swarm: self.swarm.clone(),
            loss: self.loss,
        }
    }
}

/// Builder for TrainingConfig
#[derive(Debug, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles
    pub fn num_particles(mut self, n: usize) -> Self {
        self.config.swarm.num_particles = n;
        self
    }

    /// Set the epoch budget
    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.config.swarm.max_epochs = epochs;
        self
    }

    /// Set the early-exit error threshold
    pub fn exit_error(mut self, threshold: f64) -> Self {
        self.config.swarm.exit_error = threshold;
        self
    }

    /// Set the per-epoch death probability
    pub fn prob_death(mut self, p: f64) -> Self {
        self.config.swarm.prob_death = p;
        self
    }

    /// Set inertia, cognitive and social coefficients
    pub fn coefficients(mut self, inertia: f64, cognitive: f64, social: f64) -> Self {
        self.config.swarm.inertia = inertia;
        self.config.swarm.cognitive = cognitive;
        self.config.swarm.social = social;
        self
    }

    /// Set the position bounds
    pub fn bounds(mut self, min_x: f64, max_x: f64) -> Self {
        self.config.swarm.min_x = min_x;
        self.config.swarm.max_x = max_x;
        self
    }

    /// Set the loss
    pub fn loss(mut self, loss: Loss) -> Self {
        self.config.loss = loss;
        self
    }

    /// Set the generator seed
    pub fn seed(mut self, seed: [u32; 4]) -> Self {
        self.config.seed = seed;
        self
    }

    /// Build the configuration
    pub fn build(self) -> TrainingConfig {
        self.config
    }
}

/// Result of [`Trainer::train`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Swarm outcome (best weights, fitness, epochs, termination)
    pub outcome: SwarmOutcome,
    /// Accuracy of the trained weights on the training set
    pub train_accuracy: f64,
}

/// Runs swarm training with a validated configuration and its own generator.
///
/// The generator persists across calls, so consecutive `train` calls continue
/// one sequence rather than replaying it.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    rng: XorShift128,
}

impl Trainer {
    /// Create a trainer; rejects invalid swarm parameters.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.swarm.validate()?;
        let rng = XorShift128::from_words(config.seed);
        Ok(Self { config, rng })
    }

    /// Get the training configuration
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `net` on `data`; the network keeps the best weights found.
    pub fn train(&mut self, net: &mut FeedForwardNet, data: &Dataset) -> Result<TrainingReport> {
        let outcome = net.train(data, &self.config.params(), &mut self.rng)?;
        let train_accuracy = net.accuracy(data)?;
        info!(
            termination = ?outcome.termination,
            epochs = outcome.epochs,
            best = outcome.best_fitness,
            train_accuracy,
            "training complete"
        );
        Ok(TrainingReport {
            outcome,
            train_accuracy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TrainingConfig::builder()
            .num_particles(20)
            .max_epochs(50)
            .exit_error(0.01)
            .prob_death(0.1)
            .coefficients(0.5, 1.0, 2.0)
            .bounds(-5.0, 5.0)
            .loss(Loss::CrossEntropy)
            .seed([1, 2, 3, 4])
            .build();

        assert_eq!(config.swarm.num_particles, 20);
        assert_eq!(config.swarm.max_epochs, 50);
        assert_eq!(config.swarm.exit_error, 0.01);
        assert_eq!(config.swarm.prob_death, 0.1);
        assert_eq!(config.swarm.social, 2.0);
        assert_eq!((config.swarm.min_x, config.swarm.max_x), (-5.0, 5.0));
        assert_eq!(config.loss, Loss::CrossEntropy);
        assert_eq!(config.seed, [1, 2, 3, 4]);
    }

    #[test]
    fn builder_defaults_are_reference_run() {
        let config = TrainingConfig::builder().build();
        assert_eq!(config, TrainingConfig::default());
        assert_eq!(config.params(), TrainingParams::new(12, 700, 0.06, 0.005));
        assert_eq!(config.seed, REFERENCE_SEED);
    }

    #[test]
    fn trainer_rejects_invalid_config() {
        let config = TrainingConfig::builder().num_particles(0).build();
        assert!(matches!(
            Trainer::new(config),
            Err(Error::Core(CoreError::InvalidParameter(_)))
        ));
        let config = TrainingConfig::builder().prob_death(2.0).build();
        assert!(Trainer::new(config).is_err());
    }

    #[test]
    fn core_errors_convert_and_display() {
        let err: Error = CoreError::EmptyDataset.into();
        assert_eq!(err.to_string(), "dataset has no rows");
    }
}
