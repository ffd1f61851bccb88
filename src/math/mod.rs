pub mod init;
pub mod matrix;

pub use matrix::Matrix;
