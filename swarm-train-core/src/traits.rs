//! Core traits for SwarmTrain
//!
//! These traits are the seam between the optimizer and whatever it is
//! optimizing. The optimizer only ever sees flat parameter vectors and a
//! scalar fitness; models decide what those parameters mean.

use alloc::vec::Vec;

use crate::Result;

/// A model whose parameters can be searched by the swarm.
pub trait SwarmModel {
    /// Flatten the model parameters into a fresh vector (canonical layout).
    fn parameters(&self) -> Vec<f64>;

    /// Load parameters from a flat vector in the canonical layout.
    fn load_parameters(&mut self, params: &[f64]) -> Result<()>;

    /// Length of the flat parameter vector.
    fn num_parameters(&self) -> usize;
}

/// A fitness function for swarm optimization. Lower is better.
///
/// Takes `&mut self` because evaluators are free to load the candidate into
/// internal buffers while scoring it.
pub trait FitnessFunction {
    /// Score one candidate position.
    fn evaluate(&mut self, position: &[f64]) -> Result<f64>;
}

impl<F> FitnessFunction for F
where
    F: FnMut(&[f64]) -> Result<f64>,
{
    fn evaluate(&mut self, position: &[f64]) -> Result<f64> {
        self(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_fitness_functions() {
        let mut calls = 0usize;
        let mut sphere = |x: &[f64]| {
            calls += 1;
            Ok::<_, crate::Error>(x.iter().map(|v| v * v).sum::<f64>())
        };
        assert_eq!(sphere.evaluate(&[1.0, 2.0]).unwrap(), 5.0);
        assert_eq!(sphere.evaluate(&[0.0]).unwrap(), 0.0);
        drop(sphere);
        assert_eq!(calls, 2);
    }
}
