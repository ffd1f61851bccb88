use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::error::NetworkError;

/// The nine supported nonlinearities.
///
/// `Prelu` and `Elu` read the scalar parameter carried next to the kind in
/// [`Activation`](crate::activation::Activation); every other kind ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    Linear,
    Binary,
    #[default]
    Sigmoid,
    Tanh,
    /// Reciprocal tangent, `1 / tan(x)`. Not the inverse tangent despite the name.
    Arctan,
    Relu,
    Prelu,
    Elu,
    /// `ln(1 + (1 + e^x))`, which is `ln(2 + e^x)` rather than the textbook `ln(1 + e^x)`.
    Softplus,
}

impl ActivationKind {
    pub const ALL: [ActivationKind; 9] = [
        ActivationKind::Linear,
        ActivationKind::Binary,
        ActivationKind::Sigmoid,
        ActivationKind::Tanh,
        ActivationKind::Arctan,
        ActivationKind::Relu,
        ActivationKind::Prelu,
        ActivationKind::Elu,
        ActivationKind::Softplus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActivationKind::Linear => "linear",
            ActivationKind::Binary => "binary",
            ActivationKind::Sigmoid => "sigmoid",
            ActivationKind::Tanh => "tanh",
            ActivationKind::Arctan => "arctan",
            ActivationKind::Relu => "relu",
            ActivationKind::Prelu => "prelu",
            ActivationKind::Elu => "elu",
            ActivationKind::Softplus => "softplus",
        }
    }

    /// Whether the scalar parameter changes the formula.
    pub fn takes_param(&self) -> bool {
        matches!(self, ActivationKind::Prelu | ActivationKind::Elu)
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive lookup by name; surrounding whitespace is ignored.
impl FromStr for ActivationKind {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ActivationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| NetworkError::UnsupportedActivation(s.to_string()))
    }
}
