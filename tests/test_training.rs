// End-to-end training tests: loss descent, digit-like classification, and
// the epoch driver around the engine.

use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};

use neuro_mlp::data::mnist_csv;
use neuro_mlp::data::sample::{scale_pixel, Sample};
use neuro_mlp::{
    evaluate, train_epochs, train_network, MseLoss, Network, NetworkConfig, TrainConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIDE: usize = 28;

/// A 28×28 "digit": class `k` lights a two-row band starting at row
/// `4 + 2k`, over a dim noisy background. Raw values are in `[0, 255]`.
fn synthetic_digit(label: usize, rng: &mut StdRng) -> Sample {
    let band = 4 + 2 * label..6 + 2 * label;
    let input = (0..SIDE * SIDE)
        .map(|i| {
            let raw = if band.contains(&(i / SIDE)) {
                rng.gen_range(200.0..=255.0)
            } else {
                rng.gen_range(0.0..20.0)
            };
            scale_pixel(raw)
        })
        .collect();
    Sample::new(input, label, 10)
}

#[test]
fn repeated_training_on_one_pair_reduces_error() {
    let mut net = Network::new(&NetworkConfig::new(3, 3, 3, 0.3), &mut StdRng::seed_from_u64(5)).unwrap();
    let input = [1.0, 0.5, -1.5];
    let target = [0.99, 0.01, 0.5];

    let mut losses = Vec::with_capacity(1000);
    for _ in 0..1000 {
        let out = net.query(&input).unwrap();
        losses.push(MseLoss::loss(&out, &target));
        net.train(&input, &target).unwrap();
    }

    let head: f64 = losses[..100].iter().sum::<f64>() / 100.0;
    let tail: f64 = losses[900..].iter().sum::<f64>() / 100.0;
    assert!(tail < head, "tail {tail} not below head {head}");
    assert!(losses[999] < losses[0]);
}

#[test]
fn learns_digit_like_classes() {
    let mut rng = StdRng::seed_from_u64(2024);
    let train_set: Vec<Sample> = (0..100).map(|i| synthetic_digit(i % 10, &mut rng)).collect();
    let test_set: Vec<Sample> = (0..10).map(|k| synthetic_digit(k, &mut rng)).collect();

    for sample in &train_set {
        assert!(sample.input.iter().all(|&v| (0.01..=1.0).contains(&v)));
    }

    let mut net = Network::new(&NetworkConfig::new(784, 200, 10, 0.1), &mut rng).unwrap();
    let history = train_epochs(&mut net, &train_set, &TrainConfig::new(5), &mut rng).unwrap();
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].steps, 100);

    let card = evaluate(&net, &test_set).unwrap();
    assert_eq!(card.total, 10);
    assert!(card.performance() > 0.5, "performance {}", card.performance());
}

#[test]
fn epoch_loss_goes_down() {
    let mut rng = StdRng::seed_from_u64(7);
    let samples: Vec<Sample> = (0..40).map(|i| synthetic_digit(i % 4, &mut rng)).collect();
    let mut net = Network::new(&NetworkConfig::new(784, 30, 10, 0.1), &mut rng).unwrap();

    let config = TrainConfig { epochs: 4, shuffle: true, ..TrainConfig::default() };
    let history = train_epochs(&mut net, &samples, &config, &mut rng).unwrap();
    assert!(history[3].train_loss < history[0].train_loss);
}

#[test]
fn rotations_triple_the_steps() {
    let mut rng = StdRng::seed_from_u64(3);
    let samples: Vec<Sample> = (0..5).map(|i| synthetic_digit(i, &mut rng)).collect();
    let mut net = Network::new(&NetworkConfig::new(784, 10, 10, 0.1), &mut rng).unwrap();

    let config = TrainConfig { epochs: 1, rotation_degrees: Some(10.0), ..TrainConfig::default() };
    let history = train_epochs(&mut net, &samples, &config, &mut rng).unwrap();
    assert_eq!(history[0].steps, 15);
}

#[test]
fn progress_channel_and_stop_flag() {
    let mut rng = StdRng::seed_from_u64(1);
    let samples: Vec<Sample> = (0..4).map(|i| synthetic_digit(i, &mut rng)).collect();
    let mut net = Network::new(&NetworkConfig::new(784, 8, 10, 0.1), &mut rng).unwrap();

    let (tx, rx) = mpsc::channel();
    let config = TrainConfig { epochs: 3, progress_tx: Some(tx), ..TrainConfig::default() };
    train_epochs(&mut net, &samples, &config, &mut rng).unwrap();
    drop(config);
    let epochs: Vec<usize> = rx.iter().map(|s| s.epoch).collect();
    assert_eq!(epochs, vec![1, 2, 3]);

    let config = TrainConfig {
        epochs: 3,
        stop_flag: Some(Arc::new(AtomicBool::new(true))),
        ..TrainConfig::default()
    };
    let before = net.snapshot();
    let history = train_epochs(&mut net, &samples, &config, &mut rng).unwrap();
    assert!(history.is_empty());
    assert_eq!(net.snapshot(), before);
}

#[test]
fn csv_records_feed_the_engine() {
    let text = "label,a,b,c,d\n1,0,255,0,255\n0,255,0,255,0\n";
    let samples = mnist_csv::parse_records(text, 2).unwrap();
    let mut net = Network::new(&NetworkConfig::new(4, 3, 2, 0.3), &mut StdRng::seed_from_u64(0)).unwrap();

    let inputs: Vec<Vec<f64>> = samples.iter().map(|s| s.input.clone()).collect();
    let targets: Vec<Vec<f64>> = samples.iter().map(|s| s.target.clone()).collect();
    let first = train_network(&mut net, &inputs, &targets).unwrap();
    let mut last = first;
    for _ in 0..300 {
        last = train_network(&mut net, &inputs, &targets).unwrap();
    }
    assert!(last < first);
    assert_eq!(evaluate(&net, &samples).unwrap().correct, 2);
}
