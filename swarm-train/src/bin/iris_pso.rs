use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use swarm_train::prelude::*;
use swarm_train::report::{format_matrix, format_summary, format_vector};
use swarm_train::{checkpoint, iris};

fn usage() -> ! {
    eprintln!("Usage: iris_pso [checkpoint_path]");
    eprintln!();
    eprintln!("Trains a 4-6-3 network on the iris sample with a particle swarm.");
    eprintln!("Set RUST_LOG=debug to trace per-epoch progress.");
    std::process::exit(2);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(checkpoint_path: Option<PathBuf>) -> swarm_train::Result<()> {
    let train = iris::train_set()?;
    let test = iris::test_set()?;

    println!("The training data is:");
    println!("{}", format_matrix(&iris::TRAIN_ROWS, 1));
    println!("The test data is:");
    println!("{}", format_matrix(&iris::TEST_ROWS, 1));

    println!("Creating a 4-input, 6-hidden, 3-output neural network");
    println!("Using tanh and softmax activations");
    let mut net = FeedForwardNet::new(iris::NUM_INPUT, 6, iris::NUM_OUTPUT)?;

    let config = TrainingConfig::default();
    let swarm = &config.swarm;
    println!("Setting numParticles = {}", swarm.num_particles);
    println!("Setting maxEpochs = {}", swarm.max_epochs);
    println!("Setting early exit MSE error = {:.3}", swarm.exit_error);
    println!("Setting probDeath = {:.3}", swarm.prob_death);

    println!("\nBeginning training using a particle swarm\n");
    let mut trainer = Trainer::new(config)?;
    let report = trainer.train(&mut net, &train)?;
    println!("Training complete");
    println!("Final neural network weights and bias values:");
    print!("{}", format_vector(&report.outcome.best_position, 10, 3));

    let test_accuracy = net.accuracy(&test)?;
    println!();
    print!("{}", format_summary(&report, Some(test_accuracy)));

    if let Some(path) = checkpoint_path {
        let digest = checkpoint::save_checkpoint(&path, &net)?;
        println!("\nCheckpoint written to {} (sha256 {digest})", path.display());
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.len() > 1 || args.iter().any(|a| a == "-h" || a == "--help") {
        usage();
    }
    let checkpoint_path = args.pop().map(PathBuf::from);

    init_tracing();

    if let Err(e) = run(checkpoint_path) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
