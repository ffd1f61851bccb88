use std::fmt;

use crate::activation::kind::ActivationKind;
use crate::error::{NetworkError, Result};

/// `f(x, p)`: activation value for pre-activation `x` and parameter `p`.
type ForwardFn = fn(f64, f64) -> Result<f64>;

/// `f'(x, y, p)`: slope at pre-activation `x`, where `y = f(x)`.
///
/// Sigmoid and tanh read their slope off `y`, which is the classic
/// `y · (1 - y)` form the training step is written around.
type DerivativeFn = fn(f64, f64, f64) -> f64;

/// An activation kind resolved once into a function/derivative pair.
///
/// Evaluation never substitutes a placeholder value: non-finite inputs,
/// `exp` overflow, and the `tan(x) = 0` pole all surface as
/// [`NetworkError::NumericInstability`].
#[derive(Clone, Copy)]
pub struct Activation {
    kind: ActivationKind,
    param: f64,
    forward: ForwardFn,
    derivative: DerivativeFn,
}

impl Activation {
    pub fn new(kind: ActivationKind, param: f64) -> Activation {
        let (forward, derivative): (ForwardFn, DerivativeFn) = match kind {
            ActivationKind::Linear => (linear, d_linear),
            ActivationKind::Binary => (binary, d_binary),
            ActivationKind::Sigmoid => (sigmoid, d_sigmoid),
            ActivationKind::Tanh => (tanh, d_tanh),
            ActivationKind::Arctan => (reciprocal_tan, d_reciprocal_tan),
            ActivationKind::Relu => (relu, d_relu),
            ActivationKind::Prelu => (prelu, d_prelu),
            ActivationKind::Elu => (elu, d_elu),
            ActivationKind::Softplus => (softplus, d_softplus),
        };
        Activation { kind, param, forward, derivative }
    }

    /// Looks up `name` (case-insensitive) and binds `param`.
    pub fn resolve(name: &str, param: f64) -> Result<Activation> {
        Ok(Activation::new(name.parse()?, param))
    }

    pub fn kind(&self) -> ActivationKind {
        self.kind
    }

    pub fn param(&self) -> f64 {
        self.param
    }

    pub fn apply(&self, x: f64) -> Result<f64> {
        let y = (self.forward)(self.checked_input(x)?, self.param)?;
        self.checked_output(x, y)
    }

    /// Slope at `x`, given the already computed `y = self.apply(x)`.
    pub fn derivative(&self, x: f64, y: f64) -> Result<f64> {
        let d = (self.derivative)(self.checked_input(x)?, y, self.param);
        self.checked_output(x, d)
    }

    fn checked_input(&self, x: f64) -> Result<f64> {
        if x.is_finite() {
            Ok(x)
        } else {
            Err(self.instability(x))
        }
    }

    fn checked_output(&self, x: f64, y: f64) -> Result<f64> {
        if y.is_finite() {
            Ok(y)
        } else {
            Err(self.instability(x))
        }
    }

    fn instability(&self, x: f64) -> NetworkError {
        NetworkError::NumericInstability { kind: self.kind.name(), input: x }
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activation::new(ActivationKind::default(), 0.0)
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation")
            .field("kind", &self.kind)
            .field("param", &self.param)
            .finish()
    }
}

impl PartialEq for Activation {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.param.to_bits() == other.param.to_bits()
    }
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

fn checked_exp(kind: ActivationKind, x: f64) -> Result<f64> {
    let e = x.exp();
    if e.is_finite() {
        Ok(e)
    } else {
        Err(NetworkError::NumericInstability { kind: kind.name(), input: x })
    }
}

fn linear(x: f64, _: f64) -> Result<f64> {
    Ok(x)
}

fn binary(x: f64, _: f64) -> Result<f64> {
    Ok(if x < 0.0 { 0.0 } else { 1.0 })
}

fn sigmoid(x: f64, _: f64) -> Result<f64> {
    Ok(1.0 / (1.0 + checked_exp(ActivationKind::Sigmoid, -x)?))
}

fn tanh(x: f64, _: f64) -> Result<f64> {
    Ok(x.tanh())
}

fn reciprocal_tan(x: f64, _: f64) -> Result<f64> {
    let t = x.tan();
    if t == 0.0 {
        return Err(NetworkError::NumericInstability { kind: ActivationKind::Arctan.name(), input: x });
    }
    Ok(1.0 / t)
}

fn relu(x: f64, _: f64) -> Result<f64> {
    Ok(if x < 0.0 { 0.0 } else { x })
}

fn prelu(x: f64, p: f64) -> Result<f64> {
    Ok(if x < 0.0 { p * x } else { x })
}

fn elu(x: f64, p: f64) -> Result<f64> {
    Ok(if x < 0.0 { p * (x.exp() - 1.0) } else { x })
}

fn softplus(x: f64, _: f64) -> Result<f64> {
    Ok((1.0 + checked_exp(ActivationKind::Softplus, x)?).ln_1p())
}

// ---------------------------------------------------------------------------
// Derivatives
// ---------------------------------------------------------------------------

fn d_linear(_: f64, _: f64, _: f64) -> f64 {
    1.0
}

fn d_binary(_: f64, _: f64, _: f64) -> f64 {
    0.0
}

fn d_sigmoid(_: f64, y: f64, _: f64) -> f64 {
    y * (1.0 - y)
}

fn d_tanh(_: f64, y: f64, _: f64) -> f64 {
    1.0 - y * y
}

fn d_reciprocal_tan(x: f64, _: f64, _: f64) -> f64 {
    let s = x.sin();
    -1.0 / (s * s)
}

fn d_relu(x: f64, _: f64, _: f64) -> f64 {
    if x < 0.0 { 0.0 } else { 1.0 }
}

fn d_prelu(x: f64, _: f64, p: f64) -> f64 {
    if x < 0.0 { p } else { 1.0 }
}

fn d_elu(x: f64, _: f64, p: f64) -> f64 {
    if x < 0.0 { p * x.exp() } else { 1.0 }
}

/// d/dx ln(2 + e^x) = e^x / (2 + e^x), rearranged so it cannot overflow.
fn d_softplus(x: f64, _: f64, _: f64) -> f64 {
    1.0 / (1.0 + 2.0 * (-x).exp())
}
