use crate::activation::Activation;
use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;
use crate::network::forward::{forward, TrainingStep};

/// Weight deltas for one sample, before scaling by the learning rate.
#[derive(Debug, Clone)]
pub struct Gradients {
    /// `output_delta · hidden_outᵗ`, shape of `Who`.
    pub who: Matrix,
    /// `hidden_delta · inputᵗ`, shape of `Wih`.
    pub wih: Matrix,
}

/// Computes both weight deltas from a cached forward pass.
///
/// The error is `target - output` and each delta multiplies it by the slope
/// of the configured activation. Training was historically hardwired to the
/// sigmoid slope `y · (1 - y)` whatever kind ran forward; here the slope
/// always matches the kind, and for sigmoid it is exactly that expression.
/// Kinds with a zero slope (`binary`) therefore never move the weights.
///
/// `hidden_error` is propagated through `Who` as it was before this step.
pub fn gradients(
    who: &Matrix,
    activation: &Activation,
    step: &TrainingStep,
    target: &[f64],
) -> Result<Gradients> {
    if target.len() != step.final_out.rows {
        return Err(NetworkError::ShapeMismatch {
            context: "target vector",
            expected: step.final_out.rows,
            got: target.len(),
        });
    }

    let output_error = Matrix::column(target).difference(&step.final_out)?;
    let output_slope = slope(activation, &step.final_in, &step.final_out)?;
    let output_delta = output_error.hadamard(&output_slope)?;

    let hidden_error = who.transpose().dot(&output_delta)?;
    let hidden_slope = slope(activation, &step.hidden_in, &step.hidden_out)?;
    let hidden_delta = hidden_error.hadamard(&hidden_slope)?;

    Ok(Gradients {
        who: output_delta.dot(&step.hidden_out.transpose())?,
        wih: hidden_delta.dot(&step.input.transpose())?,
    })
}

/// One online gradient step on `(input, target)`.
///
/// Everything is computed before either matrix is written, so on error
/// both weight matrices are exactly as they were.
pub fn backward(
    wih: &mut Matrix,
    who: &mut Matrix,
    activation: &Activation,
    learning_rate: f64,
    input: &[f64],
    target: &[f64],
) -> Result<()> {
    if target.len() != who.rows {
        return Err(NetworkError::ShapeMismatch {
            context: "target vector",
            expected: who.rows,
            got: target.len(),
        });
    }

    let step = forward(wih, who, activation, input)?;
    let grads = gradients(who, activation, &step, target)?;

    who.add_scaled(&grads.who, learning_rate)?;
    wih.add_scaled(&grads.wih, learning_rate)?;
    Ok(())
}

fn slope(activation: &Activation, pre: &Matrix, post: &Matrix) -> Result<Matrix> {
    let data = pre.data.iter().zip(post.data.iter())
        .map(|(xs, ys)| {
            xs.iter().zip(ys.iter())
                .map(|(&x, &y)| activation.derivative(x, y))
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;
    Matrix::from_data(data)
}
