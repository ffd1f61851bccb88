pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::{Activation, ActivationKind};
pub use network::{Network, NetworkConfig, NetworkSnapshot};
pub use loss::mse::MseLoss;
pub use data::sample::Sample;
pub use train::{evaluate, train_epochs, train_network, EpochStats, Scorecard, TrainConfig};
