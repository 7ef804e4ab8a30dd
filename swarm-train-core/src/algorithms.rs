//! Swarm optimization algorithms
//!
//! Configuration and state types for the particle swarm. The epoch loop itself
//! lives in [`crate::swarm`].

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Particle Swarm Optimization (PSO) configuration
///
/// The defaults are the canonical constricted-PSO coefficients and the
/// reference run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSwarmConfig {
    /// Number of particles in the swarm
    pub num_particles: usize,
    /// Inertia weight (momentum)
    pub inertia: f64,
    /// Cognitive coefficient (attraction to personal best)
    pub cognitive: f64,
    /// Social coefficient (attraction to global best)
    pub social: f64,
    /// Lower bound of every position coordinate
    pub min_x: f64,
    /// Upper bound of every position coordinate
    pub max_x: f64,
    /// Initial velocities are drawn from `[velocity_scale * min_x, velocity_scale * max_x]`
    pub velocity_scale: f64,
    /// Epoch budget
    pub max_epochs: usize,
    /// Stop before an epoch once the global best fitness drops below this
    pub exit_error: f64,
    /// Per-particle, per-epoch probability of respawning at a random position
    pub prob_death: f64,
}

impl Default for ParticleSwarmConfig {
    fn default() -> Self {
        Self {
            num_particles: 12,
            inertia: 0.729,
            cognitive: 1.49445,
            social: 1.49445,
            min_x: -10.0,
            max_x: 10.0,
            velocity_scale: 0.1,
            max_epochs: 700,
            exit_error: 0.06,
            prob_death: 0.005,
        }
    }
}

impl ParticleSwarmConfig {
    /// Reject parameters that would otherwise fail deep inside the epoch loop.
    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(Error::InvalidParameter("num_particles must be positive"));
        }
        let coefficients = [
            self.inertia,
            self.cognitive,
            self.social,
            self.min_x,
            self.max_x,
            self.velocity_scale,
        ];
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidParameter("swarm coefficients must be finite"));
        }
        if self.min_x >= self.max_x {
            return Err(Error::InvalidParameter("min_x must be below max_x"));
        }
        if self.exit_error.is_nan() || self.exit_error < 0.0 {
            return Err(Error::InvalidParameter("exit_error must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.prob_death) {
            return Err(Error::InvalidParameter("prob_death must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Particle state in PSO
///
/// Construction deep-copies every slice, so no two particles (and no particle
/// and the optimizer) ever share a buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub(crate) position: Vec<f64>,
    pub(crate) fitness: f64,
    pub(crate) velocity: Vec<f64>,
    pub(crate) best_position: Vec<f64>,
    pub(crate) best_fitness: f64,
}

impl Particle {
    /// Create a particle from its current and best-seen state.
    pub fn new(
        position: &[f64],
        fitness: f64,
        velocity: &[f64],
        best_position: &[f64],
        best_fitness: f64,
    ) -> Self {
        Self {
            position: position.to_vec(),
            fitness,
            velocity: velocity.to_vec(),
            best_position: best_position.to_vec(),
            best_fitness,
        }
    }

    /// Current position (a candidate weight vector).
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Fitness of the current position.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Current velocity.
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Best position this particle has visited since it was last (re)spawned.
    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    /// Fitness at [`Particle::best_position`].
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }
}

/// Lifecycle of a [`crate::swarm::ParticleSwarm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmState {
    /// Particles not yet drawn
    Initializing,
    /// Epoch loop in progress
    Running,
    /// Global best fell below `exit_error`
    Converged,
    /// `max_epochs` epochs ran
    EpochBudgetExhausted,
}

/// Why a run stopped. Both outcomes carry a usable global best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Global best fell below `exit_error`
    Converged,
    /// `max_epochs` epochs ran
    EpochBudgetExhausted,
}

impl From<Termination> for SwarmState {
    fn from(t: Termination) -> Self {
        match t {
            Termination::Converged => SwarmState::Converged,
            Termination::EpochBudgetExhausted => SwarmState::EpochBudgetExhausted,
        }
    }
}

/// Result of a finished swarm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmOutcome {
    /// Copy of the global best position
    pub best_position: Vec<f64>,
    /// Fitness at `best_position`
    pub best_fitness: f64,
    /// Number of epochs that ran
    pub epochs: usize,
    /// Why the run stopped
    pub termination: Termination,
    /// Global best fitness after initialization, then after every epoch
    pub history: Vec<f64>,
}

impl SwarmOutcome {
    /// Whether the run stopped on the error threshold.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_reference_parameters() {
        let config = ParticleSwarmConfig::default();
        assert_eq!(config.num_particles, 12);
        assert_eq!(config.max_epochs, 700);
        assert_eq!(config.inertia, 0.729);
        assert_eq!(config.cognitive, 1.49445);
        assert_eq!(config.social, 1.49445);
        assert_eq!((config.min_x, config.max_x), (-10.0, 10.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let cases = [
            ParticleSwarmConfig {
                num_particles: 0,
                ..Default::default()
            },
            ParticleSwarmConfig {
                min_x: 1.0,
                max_x: 1.0,
                ..Default::default()
            },
            ParticleSwarmConfig {
                prob_death: 1.5,
                ..Default::default()
            },
            ParticleSwarmConfig {
                exit_error: -0.1,
                ..Default::default()
            },
            ParticleSwarmConfig {
                inertia: f64::NAN,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn particle_copies_its_inputs() {
        let mut position = alloc::vec![1.0, 2.0];
        let particle = Particle::new(&position, 3.0, &[0.5, 0.5], &position, 3.0);
        position[0] = 99.0;
        assert_eq!(particle.position(), &[1.0, 2.0]);
        assert_eq!(particle.best_position(), &[1.0, 2.0]);
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = ParticleSwarmConfig {
            num_particles: 4,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ParticleSwarmConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
