use thiserror::Error;

/// Every failure the engine and its data helpers can report.
///
/// All variants are local and synchronous: the call that produced one has
/// not changed any network state.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// A vector or matrix length disagrees with the configured node count.
    #[error("shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// The activation name did not match any known kind.
    #[error("unsupported activation function: {0:?}")]
    UnsupportedActivation(String),

    /// An activation produced an undefined or overflowing value.
    #[error("numeric instability in {kind} at x = {input}")]
    NumericInstability { kind: &'static str, input: f64 },

    /// Constructor arguments outside their valid range.
    #[error("invalid network configuration: {0}")]
    InvalidConfig(String),

    /// A dataset record could not be parsed.
    #[error("dataset error at line {line}: {reason}")]
    Dataset { line: usize, reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
