//! Feedforward scorer
//!
//! A fixed `input -> hidden (tanh) -> output (softmax)` network used purely as
//! a fitness evaluator for the swarm.
//!
//! ## Weight layout
//!
//! The flat weight vector (the swarm's particle position) is laid out as:
//!
//! 1. input→hidden weights, row-major `(num_input, num_hidden)`
//! 2. hidden biases `(num_hidden,)`
//! 3. hidden→output weights, row-major `(num_hidden, num_output)`
//! 4. output biases `(num_output,)`
//!
//! The network stores the four blocks in the same order and layout, so
//! [`FeedForwardNet::set_weights`] and [`FeedForwardNet::get_weights`] are
//! exact inverses.

use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use tracing::info;

use swarm_train_core::algorithms::{ParticleSwarmConfig, SwarmOutcome};
use swarm_train_core::swarm::ParticleSwarm;
use swarm_train_core::traits::SwarmModel;
use swarm_train_core::{Error, Result};

use crate::activation::{hyperbolic_tangent, softmax};
use crate::data::Dataset;
use crate::fitness::{Loss, NetworkFitness};

/// Immutable `(num_input, num_hidden, num_output)` triple.
///
/// Every dimension is positive and the weight count fits in `usize`; decoding
/// re-runs the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub struct NetworkShape {
    num_input: usize,
    num_hidden: usize,
    num_output: usize,
}

#[derive(Deserialize)]
struct RawShape {
    num_input: usize,
    num_hidden: usize,
    num_output: usize,
}

impl TryFrom<RawShape> for NetworkShape {
    type Error = Error;

    fn try_from(raw: RawShape) -> Result<Self> {
        Self::new(raw.num_input, raw.num_hidden, raw.num_output)
    }
}

impl NetworkShape {
    /// Create a shape; every dimension must be positive.
    pub fn new(num_input: usize, num_hidden: usize, num_output: usize) -> Result<Self> {
        if num_input == 0 || num_hidden == 0 || num_output == 0 {
            return Err(Error::InvalidParameter(
                "network dimensions must be positive",
            ));
        }
        num_input
            .checked_mul(num_hidden)
            .zip(num_hidden.checked_mul(num_output))
            .and_then(|(ih, ho)| ih.checked_add(ho))
            .and_then(|w| w.checked_add(num_hidden))
            .and_then(|w| w.checked_add(num_output))
            .ok_or(Error::InvalidParameter("network weight count overflows"))?;
        Ok(Self {
            num_input,
            num_hidden,
            num_output,
        })
    }

    pub fn num_input(&self) -> usize {
        self.num_input
    }

    pub fn num_hidden(&self) -> usize {
        self.num_hidden
    }

    pub fn num_output(&self) -> usize {
        self.num_output
    }

    /// Length of the flat weight vector.
    pub fn num_weights(&self) -> usize {
        self.num_input * self.num_hidden
            + self.num_hidden
            + self.num_hidden * self.num_output
            + self.num_output
    }
}

/// Parameters of a swarm training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Swarm configuration (bounds, coefficients, budget, death rate)
    pub swarm: ParticleSwarmConfig,
    /// Loss minimized by the swarm
    pub loss: Loss,
}

impl TrainingParams {
    /// Reference coefficients with the given run parameters.
    pub fn new(num_particles: usize, max_epochs: usize, exit_error: f64, prob_death: f64) -> Self {
        Self {
            swarm: ParticleSwarmConfig {
                num_particles,
                max_epochs,
                exit_error,
                prob_death,
                ..Default::default()
            },
            loss: Loss::MeanSquared,
        }
    }

    /// Use a different loss.
    pub fn with_loss(mut self, loss: Loss) -> Self {
        self.loss = loss;
        self
    }
}

/// Feedforward network with one tanh hidden layer and a softmax output.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardNet {
    shape: NetworkShape,
    /// Row-major `(num_input, num_hidden)`
    ih_weights: Vec<f64>,
    h_biases: Vec<f64>,
    /// Row-major `(num_hidden, num_output)`
    ho_weights: Vec<f64>,
    o_biases: Vec<f64>,
}

impl FeedForwardNet {
    /// Create a zero-initialized network.
    pub fn new(num_input: usize, num_hidden: usize, num_output: usize) -> Result<Self> {
        Ok(Self::with_shape(NetworkShape::new(
            num_input, num_hidden, num_output,
        )?))
    }

    /// Create a zero-initialized network from a validated shape.
    pub fn with_shape(shape: NetworkShape) -> Self {
        Self {
            ih_weights: vec![0.0; shape.num_input * shape.num_hidden],
            h_biases: vec![0.0; shape.num_hidden],
            ho_weights: vec![0.0; shape.num_hidden * shape.num_output],
            o_biases: vec![0.0; shape.num_output],
            shape,
        }
    }

    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    /// Unflatten `weights` into the four weight/bias blocks.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        let expected = self.shape.num_weights();
        if weights.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: weights.len(),
            });
        }

        let (ih, rest) = weights.split_at(self.ih_weights.len());
        let (hb, rest) = rest.split_at(self.h_biases.len());
        let (ho, ob) = rest.split_at(self.ho_weights.len());
        self.ih_weights.copy_from_slice(ih);
        self.h_biases.copy_from_slice(hb);
        self.ho_weights.copy_from_slice(ho);
        self.o_biases.copy_from_slice(ob);
        Ok(())
    }

    /// Flatten the weights into a fresh vector.
    pub fn get_weights(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.shape.num_weights());
        out.extend_from_slice(&self.ih_weights);
        out.extend_from_slice(&self.h_biases);
        out.extend_from_slice(&self.ho_weights);
        out.extend_from_slice(&self.o_biases);
        out
    }

    /// Forward pass for one input vector; returns class probabilities.
    ///
    /// NaN or infinite inputs are not rejected and propagate into the output.
    pub fn compute_outputs(&self, x: &[f64]) -> Result<Vec<f64>> {
        let NetworkShape {
            num_input,
            num_hidden,
            num_output,
        } = self.shape;
        if x.len() != num_input {
            return Err(Error::ShapeMismatch {
                expected: num_input,
                actual: x.len(),
            });
        }

        let mut h_outputs = vec![0.0; num_hidden];
        for (j, h) in h_outputs.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (i, xi) in x.iter().enumerate() {
                sum += xi * self.ih_weights[i * num_hidden + j];
            }
            sum += self.h_biases[j];
            *h = hyperbolic_tangent(sum);
        }

        let mut o_sums = vec![0.0; num_output];
        for (k, o) in o_sums.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (j, hj) in h_outputs.iter().enumerate() {
                sum += hj * self.ho_weights[j * num_output + k];
            }
            *o = sum + self.o_biases[k];
        }

        Ok(softmax(&o_sums))
    }

    /// Load `weights`, then return `loss` summed within each row and averaged
    /// over the rows.
    pub fn mean_loss(&mut self, data: &Dataset, weights: &[f64], loss: Loss) -> Result<f64> {
        self.set_weights(weights)?;
        self.check_dataset(data)?;

        let mut total = 0.0;
        for (x, t) in data.rows() {
            let y = self.compute_outputs(x)?;
            total += loss.row_loss(t, &y);
        }
        Ok(total / data.len() as f64)
    }

    /// Load `weights`, then return the per-row sum of squared output errors
    /// averaged over the rows.
    pub fn mean_squared_error(&mut self, data: &Dataset, weights: &[f64]) -> Result<f64> {
        self.mean_loss(data, weights, Loss::MeanSquared)
    }

    /// Load `weights`, then return the mean cross-entropy against the one-hot
    /// targets. Terms whose logarithm is not finite are skipped.
    pub fn mean_cross_entropy(&mut self, data: &Dataset, weights: &[f64]) -> Result<f64> {
        self.mean_loss(data, weights, Loss::CrossEntropy)
    }

    /// Winner-takes-all accuracy with the current weights.
    ///
    /// A row counts as correct when its target is exactly `1.0` at the
    /// output argmax (first maximum wins ties).
    pub fn accuracy(&self, data: &Dataset) -> Result<f64> {
        self.check_dataset(data)?;

        let mut num_correct = 0usize;
        for (x, t) in data.rows() {
            let y = self.compute_outputs(x)?;
            if t[max_index(&y)] == 1.0 {
                num_correct += 1;
            }
        }
        Ok(num_correct as f64 / data.len() as f64)
    }

    /// Search the weight space with a particle swarm.
    ///
    /// On return the network holds the global-best weights, which are also
    /// the outcome's `best_position`.
    pub fn train<R>(
        &mut self,
        data: &Dataset,
        params: &TrainingParams,
        rng: &mut R,
    ) -> Result<SwarmOutcome>
    where
        R: RngCore + ?Sized,
    {
        self.check_dataset(data)?;
        let mut swarm = ParticleSwarm::new(params.swarm.clone(), self.shape.num_weights())?;

        let outcome = {
            let mut fitness = NetworkFitness::new(self, data, params.loss);
            swarm.optimize(&mut fitness, rng)?
        };
        self.set_weights(&outcome.best_position)?;

        info!(
            rows = data.len(),
            weights = outcome.best_position.len(),
            epochs = outcome.epochs,
            best = outcome.best_fitness,
            loss = ?params.loss,
            "network trained"
        );
        Ok(outcome)
    }

    fn check_dataset(&self, data: &Dataset) -> Result<()> {
        if data.num_input() != self.shape.num_input {
            return Err(Error::ShapeMismatch {
                expected: self.shape.num_input,
                actual: data.num_input(),
            });
        }
        if data.num_output() != self.shape.num_output {
            return Err(Error::ShapeMismatch {
                expected: self.shape.num_output,
                actual: data.num_output(),
            });
        }
        Ok(())
    }
}

impl SwarmModel for FeedForwardNet {
    fn parameters(&self) -> Vec<f64> {
        self.get_weights()
    }

    fn load_parameters(&mut self, params: &[f64]) -> Result<()> {
        self.set_weights(params)
    }

    fn num_parameters(&self) -> usize {
        self.shape.num_weights()
    }
}

/// Index of the largest value; the first occurrence wins ties.
fn max_index(values: &[f64]) -> usize {
    let mut big_index = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[big_index] {
            big_index = i;
        }
    }
    big_index
}
