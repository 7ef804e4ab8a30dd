//! Property tests for the deterministic random source and the optimizer.

use proptest::prelude::*;
use rand_core::RngCore;

use swarm_train_core::prelude::*;
use swarm_train_core::rng::shuffle;

proptest! {
    #[test]
    fn any_seed_stays_nonzero(words in any::<[u32; 4]>()) {
        let mut rng = XorShift128::from_words(words);
        for _ in 0..64 {
            rng.next_u32();
            prop_assert!(rng.words().iter().any(|w| *w != 0));
        }
    }

    #[test]
    fn range_draws_stay_in_range(words in any::<[u32; 4]>(), min in 0usize..1000, span in 1usize..1000) {
        let mut rng = XorShift128::from_words(words);
        for _ in 0..32 {
            let r = rng.next_range(min, min + span);
            prop_assert!(r >= min && r < min + span);
            let x = rng.next_in(-10.0, 10.0);
            prop_assert!((-10.0..=10.0).contains(&x));
        }
    }

    #[test]
    fn shuffle_permutes(words in any::<[u32; 4]>(), len in 0usize..64) {
        let mut rng = XorShift128::from_words(words);
        let mut seq: Vec<usize> = (0..len).collect();
        shuffle(&mut rng, &mut seq);
        seq.sort_unstable();
        prop_assert_eq!(seq, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn global_best_never_increases(words in any::<[u32; 4]>(), prob_death in 0.0f64..=1.0) {
        let config = ParticleSwarmConfig {
            num_particles: 5,
            max_epochs: 15,
            exit_error: 0.0,
            prob_death,
            ..ParticleSwarmConfig::default()
        };
        let mut swarm = ParticleSwarm::new(config, 3).unwrap();
        let mut rng = XorShift128::from_words(words);
        let mut sphere = |x: &[f64]| -> swarm_train_core::Result<f64> {
            Ok(x.iter().map(|v| v * v).sum())
        };

        let outcome = swarm.optimize(&mut sphere, &mut rng).unwrap();
        prop_assert_eq!(outcome.termination, Termination::EpochBudgetExhausted);
        for pair in outcome.history.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
        for p in swarm.particles() {
            prop_assert!(p.best_fitness() >= outcome.best_fitness);
        }
    }
}
