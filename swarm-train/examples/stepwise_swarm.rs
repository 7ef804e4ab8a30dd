//! Stepwise Swarm Example
//!
//! Drives the optimizer one epoch at a time on a plain closure instead of a
//! network, printing the global best as it improves.

use swarm_train::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SwarmTrain Stepwise Example");
    println!("===========================");

    // shifted sphere, minimum 0 at (1, -2, 3)
    let target = [1.0, -2.0, 3.0];
    let mut fitness = |x: &[f64]| -> swarm_train::core::Result<f64> {
        Ok(x.iter().zip(&target).map(|(a, b)| (a - b) * (a - b)).sum())
    };

    let config = ParticleSwarmConfig {
        num_particles: 16,
        max_epochs: 200,
        exit_error: 1e-6,
        ..ParticleSwarmConfig::default()
    };
    let mut swarm = ParticleSwarm::new(config, target.len())?;
    let mut rng = XorShift128::reference();

    swarm.initialize(&mut fitness, &mut rng)?;
    let termination = loop {
        if let Some(t) = swarm.check_termination() {
            break t;
        }
        swarm.run_epoch(&mut fitness, &mut rng)?;
        if swarm.epoch() % 25 == 0 {
            let (_, best) = swarm.global_best();
            println!("  epoch {:>3}: best = {best:.8}", swarm.epoch());
        }
    };

    let (position, best) = swarm.global_best();
    println!("\nStopped after {} epochs: {termination:?}", swarm.epoch());
    println!("Best position: {position:.4?} (error {best:.2e})");

    Ok(())
}
