use crate::activation::Activation;
use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;

/// Signals cached by one forward pass, all as column vectors.
///
/// Lives only for the duration of a single `query` or `train` call.
#[derive(Debug, Clone)]
pub struct TrainingStep {
    pub input: Matrix,
    pub hidden_in: Matrix,
    pub hidden_out: Matrix,
    pub final_in: Matrix,
    pub final_out: Matrix,
}

/// Runs `input` through both layers without touching the weights.
pub fn forward(
    wih: &Matrix,
    who: &Matrix,
    activation: &Activation,
    input: &[f64],
) -> Result<TrainingStep> {
    if input.len() != wih.cols {
        return Err(NetworkError::ShapeMismatch {
            context: "input vector",
            expected: wih.cols,
            got: input.len(),
        });
    }

    let input = Matrix::column(input);

    let hidden_in = wih.dot(&input)?;
    let hidden_out = hidden_in.try_map(|x| activation.apply(x))?;

    let final_in = who.dot(&hidden_out)?;
    let final_out = final_in.try_map(|x| activation.apply(x))?;

    Ok(TrainingStep { input, hidden_in, hidden_out, final_in, final_out })
}
