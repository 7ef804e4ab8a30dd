//! # SwarmTrain Core
//!
//! Core swarm search primitives for SwarmTrain.
//!
//! This crate is `no_std` compatible (it needs `alloc`) and provides:
//! - A deterministic xorshift random source ([`rng::XorShift128`])
//! - The [`traits::FitnessFunction`] and [`traits::SwarmModel`] seams
//! - Particle swarm configuration and state ([`algorithms`])
//! - The particle swarm optimizer and its epoch loop ([`swarm::ParticleSwarm`])
//!
//! ## Feature Flags
//!
//! - `std` (default): Enable standard library support

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod algorithms;
pub mod rng;
pub mod swarm;
pub mod traits;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::*;
    pub use crate::rng::{UniformExt, XorShift128, REFERENCE_SEED};
    pub use crate::swarm::ParticleSwarm;
    pub use crate::traits::*;
}

/// Result type for SwarmTrain operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for SwarmTrain core operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A weight or input vector disagrees with the network shape
    ShapeMismatch {
        /// Length the shape requires
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
    /// A construction or call parameter is out of range
    InvalidParameter(&'static str),
    /// A dataset with no rows was supplied
    EmptyDataset,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected length {expected}, got {actual}")
            }
            Error::InvalidParameter(what) => write!(f, "invalid parameter: {what}"),
            Error::EmptyDataset => write!(f, "dataset has no rows"),
        }
    }
}
