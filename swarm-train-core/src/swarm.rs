//! Particle swarm optimizer
//!
//! Drives a set of [`Particle`]s through the epoch loop:
//!
//! 1. velocity: `v' = w*v + c1*r1*(pbest - x) + c2*r2*(gbest - x)` per coordinate
//! 2. position: `x' = clamp(x + v', min_x, max_x)` (clipped, not reflected)
//! 3. fitness of `x'`, strict-improvement updates of personal and global best
//! 4. death: with probability `prob_death` the particle respawns at a fresh
//!    random position and its personal best is overwritten by that state
//!
//! Particles are visited in a freshly shuffled order each epoch. A particle's
//! update reads only its own state and the current global best.
//!
//! The global best is owned here and only ever replaced by copy.

use alloc::vec;
use alloc::vec::Vec;

use rand_core::RngCore;
use tracing::{debug, info, trace};

use crate::algorithms::{Particle, ParticleSwarmConfig, SwarmOutcome, SwarmState, Termination};
use crate::rng::{shuffle, UniformExt};
use crate::traits::FitnessFunction;
use crate::{Error, Result};

/// Particle swarm searching a `dimensions`-long parameter space.
#[derive(Debug, Clone)]
pub struct ParticleSwarm {
    config: ParticleSwarmConfig,
    dimensions: usize,
    particles: Vec<Particle>,
    sequence: Vec<usize>,
    global_best_position: Vec<f64>,
    global_best_fitness: f64,
    epoch: usize,
    state: SwarmState,
    history: Vec<f64>,
}

impl ParticleSwarm {
    /// Create an uninitialized swarm. Validates the configuration.
    pub fn new(config: ParticleSwarmConfig, dimensions: usize) -> Result<Self> {
        config.validate()?;
        if dimensions == 0 {
            return Err(Error::InvalidParameter("dimensions must be positive"));
        }
        Ok(Self {
            sequence: (0..config.num_particles).collect(),
            particles: Vec::with_capacity(config.num_particles),
            global_best_position: vec![0.0; dimensions],
            global_best_fitness: f64::MAX,
            epoch: 0,
            state: SwarmState::Initializing,
            history: Vec::new(),
            config,
            dimensions,
        })
    }

    pub fn config(&self) -> &ParticleSwarmConfig {
        &self.config
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn state(&self) -> SwarmState {
        self.state
    }

    /// Epochs completed so far.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Global best position and its fitness.
    pub fn global_best(&self) -> (&[f64], f64) {
        (&self.global_best_position, self.global_best_fitness)
    }

    /// Global best fitness after initialization and after each epoch.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Draw every particle's position and velocity, score it, and seed the
    /// personal and global bests. Calling this again restarts the swarm.
    pub fn initialize<F, R>(&mut self, fitness: &mut F, rng: &mut R) -> Result<()>
    where
        F: FitnessFunction + ?Sized,
        R: RngCore + ?Sized,
    {
        let ParticleSwarmConfig {
            num_particles,
            min_x,
            max_x,
            velocity_scale,
            ..
        } = self.config;
        let (min_v, max_v) = (velocity_scale * min_x, velocity_scale * max_x);

        self.particles.clear();
        self.sequence = (0..num_particles).collect();
        self.global_best_position = vec![0.0; self.dimensions];
        self.global_best_fitness = f64::MAX;
        self.epoch = 0;
        self.history.clear();

        for _ in 0..num_particles {
            let position: Vec<f64> = (0..self.dimensions)
                .map(|_| rng.next_in(min_x, max_x))
                .collect();
            let error = fitness.evaluate(&position)?;
            let velocity: Vec<f64> = (0..self.dimensions)
                .map(|_| rng.next_in(min_v, max_v))
                .collect();

            let particle = Particle::new(&position, error, &velocity, &position, error);
            if particle.fitness < self.global_best_fitness {
                self.global_best_fitness = particle.fitness;
                self.global_best_position.copy_from_slice(&particle.position);
            }
            self.particles.push(particle);
        }

        self.history.push(self.global_best_fitness);
        self.state = SwarmState::Running;
        debug!(
            particles = num_particles,
            dimensions = self.dimensions,
            best = self.global_best_fitness,
            "swarm initialized"
        );
        Ok(())
    }

    /// Start-of-epoch check. Moves the swarm into a terminal state and returns
    /// why, or `None` if another epoch should run.
    pub fn check_termination(&mut self) -> Option<Termination> {
        match self.state {
            SwarmState::Converged => return Some(Termination::Converged),
            SwarmState::EpochBudgetExhausted => return Some(Termination::EpochBudgetExhausted),
            SwarmState::Initializing => return None,
            SwarmState::Running => {}
        }

        let termination = if self.epoch >= self.config.max_epochs {
            Termination::EpochBudgetExhausted
        } else if self.global_best_fitness < self.config.exit_error {
            Termination::Converged
        } else {
            return None;
        };
        self.state = termination.into();
        Some(termination)
    }

    /// Run one epoch over every particle in a freshly shuffled order.
    pub fn run_epoch<F, R>(&mut self, fitness: &mut F, rng: &mut R) -> Result<()>
    where
        F: FitnessFunction + ?Sized,
        R: RngCore + ?Sized,
    {
        if self.state != SwarmState::Running {
            return Err(Error::InvalidParameter("swarm is not running"));
        }

        shuffle(rng, &mut self.sequence);
        for pi in 0..self.sequence.len() {
            let i = self.sequence[pi];
            self.update_particle(i, fitness, rng)?;
        }

        self.epoch += 1;
        self.history.push(self.global_best_fitness);
        debug!(
            epoch = self.epoch,
            best = self.global_best_fitness,
            "epoch complete"
        );
        Ok(())
    }

    /// Run to completion: initialize if needed, then loop epochs until the
    /// error threshold or the epoch budget stops the swarm.
    pub fn optimize<F, R>(&mut self, fitness: &mut F, rng: &mut R) -> Result<SwarmOutcome>
    where
        F: FitnessFunction + ?Sized,
        R: RngCore + ?Sized,
    {
        if self.state == SwarmState::Initializing {
            self.initialize(fitness, rng)?;
        }

        let termination = loop {
            if let Some(termination) = self.check_termination() {
                break termination;
            }
            self.run_epoch(fitness, rng)?;
        };

        info!(
            epochs = self.epoch,
            best = self.global_best_fitness,
            ?termination,
            "swarm finished"
        );
        Ok(self.outcome(termination))
    }

    fn outcome(&self, termination: Termination) -> SwarmOutcome {
        SwarmOutcome {
            best_position: self.global_best_position.clone(),
            best_fitness: self.global_best_fitness,
            epochs: self.epoch,
            termination,
            history: self.history.clone(),
        }
    }

    fn update_particle<F, R>(&mut self, index: usize, fitness: &mut F, rng: &mut R) -> Result<()>
    where
        F: FitnessFunction + ?Sized,
        R: RngCore + ?Sized,
    {
        let Self {
            config,
            particles,
            global_best_position,
            global_best_fitness,
            ..
        } = self;
        let particle = &mut particles[index];

        // 1. velocity
        let mut new_velocity = vec![0.0; particle.velocity.len()];
        for (j, v) in new_velocity.iter_mut().enumerate() {
            let r1 = rng.next_double();
            let r2 = rng.next_double();
            let x = particle.position[j];
            *v = config.inertia * particle.velocity[j]
                + config.cognitive * r1 * (particle.best_position[j] - x)
                + config.social * r2 * (global_best_position[j] - x);
        }
        particle.velocity.copy_from_slice(&new_velocity);

        // 2. position
        let new_position: Vec<f64> = particle
            .position
            .iter()
            .zip(&new_velocity)
            .map(|(x, v)| (x + v).clamp(config.min_x, config.max_x))
            .collect();
        particle.position.copy_from_slice(&new_position);

        // 3. fitness and bests
        let error = fitness.evaluate(&new_position)?;
        particle.fitness = error;
        if error < particle.best_fitness {
            particle.best_position.copy_from_slice(&new_position);
            particle.best_fitness = error;
        }
        if error < *global_best_fitness {
            global_best_position.copy_from_slice(&new_position);
            *global_best_fitness = error;
        }

        // 4. death: position respawns, velocity kept, personal best reset
        let die = rng.next_double();
        if die < config.prob_death {
            for x in particle.position.iter_mut() {
                *x = rng.next_in(config.min_x, config.max_x);
            }
            particle.fitness = fitness.evaluate(&particle.position)?;
            particle.best_position.copy_from_slice(&particle.position);
            particle.best_fitness = particle.fitness;
            trace!(particle = index, fitness = particle.fitness, "particle respawned");

            if particle.fitness < *global_best_fitness {
                *global_best_fitness = particle.fitness;
                global_best_position.copy_from_slice(&particle.position);
            }
        }

        Ok(())
    }
}
