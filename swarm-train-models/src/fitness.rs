//! Loss selection and the fitness adapter handed to the swarm.

use serde::{Deserialize, Serialize};
use swarm_train_core::traits::FitnessFunction;
use swarm_train_core::Result;

use crate::data::Dataset;
use crate::feedforward::FeedForwardNet;

/// Loss minimized by the swarm.
///
/// Each variant scores one row (`target` vs softmax `output`); the network
/// averages the row scores over the dataset. Log terms that come out NaN or
/// infinite are skipped, so zero targets or saturated outputs do not poison
/// the sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loss {
    /// Sum of squared output errors per row, averaged over rows
    #[default]
    MeanSquared,
    /// Negative log-likelihood of the target class, averaged over rows
    CrossEntropy,
    /// `exp` of the row's squared error
    Exponential,
    /// `sqrt(sum (sqrt(y) - sqrt(t))^2) / sqrt(2)`
    Hellinger,
    /// `sum t * ln(t / y)`
    KullbackLeibler,
    /// `sum t * ln(t / y) - t + y` over the terms whose log is finite
    GeneralizedKullbackLeibler,
    /// `sum (t/y)^2 - ln((t/y)^2) - 1`
    ItakuraSaito,
}

impl Loss {
    /// Score one row.
    pub fn row_loss(self, target: &[f64], output: &[f64]) -> f64 {
        let pairs = target.iter().zip(output);
        match self {
            Loss::MeanSquared => squared(target, output),
            Loss::CrossEntropy => -pairs
                .filter_map(|(t, y)| finite(y.ln()).map(|l| l * t))
                .sum::<f64>(),
            Loss::Exponential => squared(target, output).exp(),
            Loss::Hellinger => {
                let sum: f64 = pairs
                    .map(|(t, y)| {
                        let d = y.sqrt() - t.sqrt();
                        d * d
                    })
                    .sum();
                sum.sqrt() / core::f64::consts::SQRT_2
            }
            Loss::KullbackLeibler => pairs
                .filter_map(|(t, y)| finite((t / y).ln()).map(|l| t * l))
                .sum(),
            Loss::GeneralizedKullbackLeibler => pairs
                .filter_map(|(t, y)| finite(t * (t / y).ln()).map(|l| l - t + y))
                .sum(),
            Loss::ItakuraSaito => pairs
                .filter_map(|(t, y)| {
                    let r = (t * t) / (y * y);
                    finite(r.ln()).map(|l| r - l - 1.0)
                })
                .sum(),
        }
    }
}

fn squared(target: &[f64], output: &[f64]) -> f64 {
    target
        .iter()
        .zip(output)
        .map(|(t, y)| (y - t) * (y - t))
        .sum()
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// Binds a network, a dataset and a loss into a [`FitnessFunction`].
///
/// Every evaluation loads the candidate into the network, so after a run the
/// network holds whichever position was scored last.
#[derive(Debug)]
pub struct NetworkFitness<'a> {
    net: &'a mut FeedForwardNet,
    data: &'a Dataset,
    loss: Loss,
}

impl<'a> NetworkFitness<'a> {
    pub fn new(net: &'a mut FeedForwardNet, data: &'a Dataset, loss: Loss) -> Self {
        Self { net, data, loss }
    }

    pub fn loss(&self) -> Loss {
        self.loss
    }
}

impl FitnessFunction for NetworkFitness<'_> {
    fn evaluate(&mut self, position: &[f64]) -> Result<f64> {
        self.net.mean_loss(self.data, position, self.loss)
    }
}
