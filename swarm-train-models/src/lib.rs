//! # SwarmTrain Models
//!
//! The feedforward scorer and training entry points for SwarmTrain.
//!
//! This crate provides:
//! - [`feedforward::FeedForwardNet`]: a tanh/softmax network whose flat weight
//!   vector is the swarm's search space
//! - [`data::Dataset`]: validated rows of features followed by one-hot targets
//! - [`fitness::NetworkFitness`]: binds a network, dataset and loss into a
//!   fitness function for [`swarm_train_core::swarm::ParticleSwarm`]
//! - [`WeightCheckpoint`]: a serializable snapshot of trained weights
//!
//! The crate always links `std` (`tanh`, `exp`, `ln`). Its `std` feature only
//! forwards to `swarm-train-core` and `postcard`.

#![forbid(unsafe_code)]

pub mod activation;
pub mod data;
pub mod feedforward;
pub mod fitness;

use serde::{Deserialize, Serialize};
use swarm_train_core::{Error, Result};

use crate::feedforward::{FeedForwardNet, NetworkShape};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::data::Dataset;
    pub use crate::feedforward::{FeedForwardNet, NetworkShape, TrainingParams};
    pub use crate::fitness::{Loss, NetworkFitness};
    pub use crate::WeightCheckpoint;
}

/// Snapshot of a network's weights for persistence.
///
/// `weights` uses the canonical flat layout documented in [`feedforward`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightCheckpoint {
    /// Model name/identifier
    pub name: String,
    /// Version of the checkpoint format
    pub version: u32,
    /// Network shape the weights belong to
    pub shape: NetworkShape,
    /// Flattened weights and biases
    pub weights: Vec<f64>,
}

impl WeightCheckpoint {
    /// Current checkpoint format version
    pub const VERSION: u32 = 1;

    /// Capture the current weights of `net`.
    pub fn capture(name: impl Into<String>, net: &FeedForwardNet) -> Self {
        Self {
            name: name.into(),
            version: Self::VERSION,
            shape: net.shape(),
            weights: net.get_weights(),
        }
    }

    /// Rebuild a network carrying these weights.
    pub fn restore(&self) -> Result<FeedForwardNet> {
        // check before allocating: the shape may come from an untrusted file
        let expected = self.shape.num_weights();
        if self.weights.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: self.weights.len(),
            });
        }
        let mut net = FeedForwardNet::with_shape(self.shape);
        net.set_weights(&self.weights)?;
        Ok(net)
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> core::result::Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> core::result::Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_bytes_roundtrip() {
        let mut net = FeedForwardNet::new(4, 6, 3).unwrap();
        let weights: Vec<f64> = (0..51).map(|i| (i as f64).sin() * 7.5).collect();
        net.set_weights(&weights).unwrap();

        let checkpoint = WeightCheckpoint::capture("iris", &net);
        let bytes = checkpoint.to_bytes().unwrap();
        let decoded = WeightCheckpoint::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, checkpoint);
        assert_eq!(decoded.restore().unwrap(), net);
    }

    #[test]
    fn restore_rejects_mismatched_weights() {
        let net = FeedForwardNet::new(2, 2, 2).unwrap();
        let mut checkpoint = WeightCheckpoint::capture("bad", &net);
        checkpoint.weights.pop();
        assert!(matches!(
            checkpoint.restore(),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn truncated_bytes_fail_to_decode() {
        let net = FeedForwardNet::new(2, 2, 2).unwrap();
        let bytes = WeightCheckpoint::capture("short", &net).to_bytes().unwrap();
        assert!(WeightCheckpoint::from_bytes(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn oversized_shape_fails_to_decode() {
        let json = r#"{"name":"huge","version":1,
            "shape":{"num_input":4294967296,"num_hidden":4294967296,"num_output":1},
            "weights":[]}"#;
        assert!(serde_json::from_str::<WeightCheckpoint>(json).is_err());
    }

    #[test]
    fn restore_checks_length_before_building() {
        let shape = NetworkShape::new(1000, 1000, 1000).unwrap();
        let checkpoint = WeightCheckpoint {
            name: "wide".into(),
            version: WeightCheckpoint::VERSION,
            shape,
            weights: vec![0.0; 4],
        };
        assert_eq!(
            checkpoint.restore().unwrap_err(),
            Error::ShapeMismatch {
                expected: shape.num_weights(),
                actual: 4
            }
        );
    }
}
