pub mod augment;
pub mod mnist_csv;
pub mod sample;

pub use sample::Sample;
