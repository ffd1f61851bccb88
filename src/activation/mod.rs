pub mod activation;
pub mod kind;

pub use activation::Activation;
pub use kind::ActivationKind;
