pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::{EpochStats, Scorecard};
pub use loop_fn::{evaluate, train_epochs};
pub use train_config::TrainConfig;
pub use trainer::{train_network, train_step};
