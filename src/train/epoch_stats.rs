use serde::{Serialize, Deserialize};

/// Per-epoch statistics produced by `train_epochs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean squared error over every training step of this epoch, measured
    /// on the output each sample produced just before its own update.
    pub train_loss: f64,
    /// Number of `train` calls made, including rotated copies.
    pub steps: usize,
    pub elapsed_ms: u64,
}

/// Outcome of scoring a held-out set by argmax match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub correct: usize,
    pub total: usize,
}

impl Scorecard {
    /// Fraction correct in `[0, 1]`; zero for an empty set.
    pub fn performance(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}
