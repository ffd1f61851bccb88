//! Trains a network on an MNIST CSV file and scores it on a second one.
//!
//!   neuro-mlp --train mnist_train_100.csv --test mnist_test_10.csv
//!
//! Set `RUST_LOG=debug` for per-network and per-file detail.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use neuro_mlp::data::mnist_csv;
use neuro_mlp::{evaluate, train_epochs, Network, NetworkConfig, TrainConfig};

#[derive(Parser, Debug)]
#[command(name = "neuro-mlp")]
#[command(about = "Train and score a three-layer perceptron on MNIST CSV data")]
struct Args {
    /// Training records, one `label,pixels...` line each
    #[arg(long)]
    train: String,

    /// Held-out records scored after training
    #[arg(long)]
    test: String,

    /// JSON network configuration; flags below are ignored when given
    #[arg(long)]
    config: Option<String>,

    /// Hidden layer size
    #[arg(long, default_value_t = 200)]
    hidden: usize,

    /// Number of classes (output nodes)
    #[arg(long, default_value_t = 10)]
    classes: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    lr: f64,

    /// Activation kind (linear, binary, sigmoid, tanh, arctan, relu, prelu, elu, softplus)
    #[arg(long, default_value = "sigmoid")]
    activation: String,

    /// Parameter for prelu / elu
    #[arg(long, default_value_t = 0.0)]
    param: f64,

    /// Passes over the training set
    #[arg(long, default_value_t = 5)]
    epochs: usize,

    /// Also train on copies rotated by +/- this many degrees
    #[arg(long)]
    rotations: Option<f64>,

    /// Shuffle record order every epoch
    #[arg(long)]
    shuffle: bool,

    /// Seed for weight initialization and shuffling
    #[arg(long)]
    seed: Option<u64>,
}

/// `RUST_LOG` when set and valid, `info` otherwise.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Fails when a record length or the class count disagrees with the layer
/// sizes, before any weights are drawn.
fn check_dimensions(config: &NetworkConfig, input_len: usize, classes: usize) -> Result<()> {
    if config.input_nodes != input_len {
        bail!(
            "network expects {} inputs but records have {} pixels",
            config.input_nodes,
            input_len
        );
    }
    if config.output_nodes != classes {
        bail!(
            "network has {} output nodes but --classes is {}",
            config.output_nodes,
            classes
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let args = Args::parse();

    let train_set = mnist_csv::load(&args.train, args.classes)
        .with_context(|| format!("loading training data from {}", args.train))?;
    let test_set = mnist_csv::load(&args.test, args.classes)
        .with_context(|| format!("loading test data from {}", args.test))?;

    let input_nodes = train_set
        .first()
        .map(|s| s.input.len())
        .context("training set is empty")?;

    let net_config = match &args.config {
        Some(path) => NetworkConfig::load_json(path)
            .with_context(|| format!("reading network config {path}"))?,
        None => NetworkConfig::new(input_nodes, args.hidden, args.classes, args.lr)
            .with_activation(args.activation.clone(), args.param),
    };
    check_dimensions(&net_config, input_nodes, args.classes)?;
    if let Some(sample) = test_set.first() {
        check_dimensions(&net_config, sample.input.len(), args.classes)
            .context("test set does not fit the network")?;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut network = Network::new(&net_config, &mut rng).context("building network")?;
    info!(
        input = network.input_nodes(),
        hidden = network.hidden_nodes(),
        output = network.output_nodes(),
        records = train_set.len(),
        "training"
    );

    let train_config = TrainConfig {
        epochs: args.epochs,
        shuffle: args.shuffle,
        rotation_degrees: args.rotations,
        ..TrainConfig::default()
    };
    let history = train_epochs(&mut network, &train_set, &train_config, &mut rng)
        .context("training")?;

    for stats in &history {
        println!("Epoch {}/{}: loss = {:.6}", stats.epoch, stats.total_epochs, stats.train_loss);
    }

    let card = evaluate(&network, &test_set).context("scoring test set")?;
    println!(
        "Performance = {:.4} ({}/{})",
        card.performance(),
        card.correct,
        card.total
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn rust_log_overrides_default_level() {
        let debug_enabled = |filter: EnvFilter| {
            let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
            tracing::subscriber::with_default(subscriber, || tracing::enabled!(Level::DEBUG))
        };

        std::env::set_var("RUST_LOG", "debug");
        assert!(debug_enabled(env_filter()));

        std::env::remove_var("RUST_LOG");
        assert!(!debug_enabled(env_filter()));
    }

    #[test]
    fn dimensions_must_match_records_and_classes() {
        let cfg = NetworkConfig::new(784, 200, 10, 0.1);
        assert!(check_dimensions(&cfg, 784, 10).is_ok());

        let err = check_dimensions(&cfg, 784, 3).unwrap_err();
        assert!(err.to_string().contains("--classes is 3"));

        let err = check_dimensions(&cfg, 4, 10).unwrap_err();
        assert!(err.to_string().contains("records have 4 pixels"));
    }
}
