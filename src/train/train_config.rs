use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_epochs` run.
///
/// # Fields
/// - `epochs`           - total number of full passes over the samples
/// - `shuffle`          - visit samples in a fresh random order each epoch
/// - `rotation_degrees` - when set, every square-image sample is also trained
///                        rotated by `+deg` and `-deg`
/// - `progress_tx`      - optional channel; one `EpochStats` is sent per
///                        completed epoch. A dropped receiver stops the run.
/// - `stop_flag`        - optional flag checked between epochs
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub rotation_degrees: Option<f64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// In-order passes, no augmentation, no progress channel, no stop flag.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            ..TrainConfig::default()
        }
    }
}
