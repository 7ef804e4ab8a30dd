//! Reference iris run through the public API.

use swarm_train::prelude::*;
use swarm_train::{checkpoint, iris, CoreError};

fn reference_run() -> (FeedForwardNet, TrainingReport) {
    let train = iris::train_set().unwrap();
    let mut net = FeedForwardNet::new(4, 6, 3).unwrap();
    let mut trainer = Trainer::new(TrainingConfig::default()).unwrap();
    let report = trainer.train(&mut net, &train).unwrap();
    (net, report)
}

#[test]
fn reference_run_learns_the_training_set() {
    let (net, report) = reference_run();
    let outcome = &report.outcome;

    assert_eq!(outcome.best_position.len(), 51);
    assert!(outcome.epochs <= 700);
    match outcome.termination {
        Termination::Converged => assert!(outcome.best_fitness < 0.06),
        Termination::EpochBudgetExhausted => assert_eq!(outcome.epochs, 700),
    }
    assert!(report.train_accuracy > 0.5, "accuracy {}", report.train_accuracy);

    // the network is left holding the best weights
    assert_eq!(net.get_weights(), outcome.best_position);
    assert!(outcome.best_position.iter().all(|w| (-10.0..=10.0).contains(w)));

    let test_accuracy = net.accuracy(&iris::test_set().unwrap()).unwrap();
    assert!((0.0..=1.0).contains(&test_accuracy));
}

#[test]
fn reference_run_is_bit_reproducible() {
    let (net_a, report_a) = reference_run();
    let (net_b, report_b) = reference_run();

    assert_eq!(report_a, report_b);
    assert_eq!(net_a, net_b);
    for (a, b) in report_a
        .outcome
        .best_position
        .iter()
        .zip(&report_b.outcome.best_position)
    {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn best_error_history_never_increases() {
    let (_, report) = reference_run();
    let history = &report.outcome.history;

    assert_eq!(history.len(), report.outcome.epochs + 1);
    for pair in history.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    assert_eq!(history.last().copied(), Some(report.outcome.best_fitness));
}

#[test]
fn different_seed_gives_a_different_run() {
    let train = iris::train_set().unwrap();
    let config = TrainingConfig::builder()
        .max_epochs(30)
        .seed([1, 2, 3, 4])
        .build();

    let mut net = FeedForwardNet::new(4, 6, 3).unwrap();
    let seeded = Trainer::new(config).unwrap().train(&mut net, &train).unwrap();

    let mut reference = FeedForwardNet::new(4, 6, 3).unwrap();
    let config = TrainingConfig::builder().max_epochs(30).build();
    let baseline = Trainer::new(config).unwrap().train(&mut reference, &train).unwrap();

    assert_ne!(seeded.outcome.best_position, baseline.outcome.best_position);
}

#[test]
fn trained_weights_survive_a_checkpoint() {
    let train = iris::train_set().unwrap();
    let config = TrainingConfig::builder().max_epochs(25).build();
    let mut net = FeedForwardNet::new(4, 6, 3).unwrap();
    Trainer::new(config).unwrap().train(&mut net, &train).unwrap();

    let path = std::env::temp_dir().join(format!(
        "swarmtrain_e2e_{}_checkpoint.json",
        std::process::id()
    ));
    checkpoint::save_checkpoint(&path, &net).unwrap();
    let restored = checkpoint::load_checkpoint(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(restored, net);
    assert_eq!(
        restored.accuracy(&train).unwrap(),
        net.accuracy(&train).unwrap()
    );
}

#[test]
fn mismatched_network_is_rejected() {
    let train = iris::train_set().unwrap();
    let mut net = FeedForwardNet::new(3, 6, 3).unwrap();
    let mut trainer = Trainer::new(TrainingConfig::default()).unwrap();

    assert!(matches!(
        trainer.train(&mut net, &train),
        Err(swarm_train::Error::Core(CoreError::ShapeMismatch { .. }))
    ));
}
