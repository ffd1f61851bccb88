use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::data::augment::{rotate, square_side};
use crate::data::sample::{argmax, Sample, LOW};
use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::{EpochStats, Scorecard};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_step;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Runs `config.epochs` passes of online training over `samples`.
///
/// Returns the statistics of every completed epoch. `rng` is only drawn
/// from when `config.shuffle` is set.
///
/// # Early termination
/// The loop stops before the next epoch if `config.stop_flag` is set or the
/// `progress_tx` receiver has been dropped.
pub fn train_epochs<R: Rng + ?Sized>(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);
    let mut order: Vec<usize> = (0..samples.len()).collect();

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(rng);
        }

        let (train_loss, steps) = run_one_epoch(network, samples, &order, config.rotation_degrees)?;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            steps,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            epoch,
            total = config.epochs,
            loss = stats.train_loss,
            steps,
            elapsed_ms = stats.elapsed_ms,
            "epoch finished"
        );

        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(history)
}

/// Queries every sample and counts argmax matches against its label.
pub fn evaluate(network: &Network, samples: &[Sample]) -> Result<Scorecard> {
    let mut card = Scorecard { correct: 0, total: samples.len() };
    for sample in samples {
        let output = network.query(&sample.input)?;
        if argmax(&output) == Some(sample.label) {
            card.correct += 1;
        }
    }
    Ok(card)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One pass over `samples` in `order`. Returns (mean loss, step count).
fn run_one_epoch(
    network: &mut Network,
    samples: &[Sample],
    order: &[usize],
    rotation_degrees: Option<f64>,
) -> Result<(f64, usize)> {
    let mut total_loss = 0.0;
    let mut steps = 0usize;

    for &idx in order {
        let sample = &samples[idx];
        total_loss += train_step(network, &sample.input, &sample.target)?;
        steps += 1;

        let Some(degrees) = rotation_degrees else { continue };
        let Some(side) = square_side(sample.input.len()) else { continue };
        for angle in [degrees, -degrees] {
            let rotated = rotate(&sample.input, side, angle, LOW)?;
            total_loss += train_step(network, &rotated, &sample.target)?;
            steps += 1;
        }
    }

    let mean = if steps == 0 { 0.0 } else { total_loss / steps as f64 };
    Ok((mean, steps))
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}
