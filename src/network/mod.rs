pub mod backward;
pub mod config;
pub mod forward;
pub mod network;

pub use config::NetworkConfig;
pub use forward::TrainingStep;
pub use network::{Network, NetworkSnapshot};
