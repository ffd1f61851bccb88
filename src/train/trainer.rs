use crate::{
    error::{NetworkError, Result},
    loss::mse::MseLoss,
    network::network::Network,
};

/// Trains on one sample and returns the MSE of the output it produced
/// before the update.
pub fn train_step(network: &mut Network, input: &[f64], target: &[f64]) -> Result<f64> {
    // Forward pass
    let output = network.query(input)?;

    // Backward pass; fails on a bad target before any weight moves
    network.train(input, target)?;

    Ok(MseLoss::loss(&output, target))
}

/// One in-order pass of online training over parallel input/target lists.
/// Returns the mean pre-update loss.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
) -> Result<f64> {
    if inputs.len() != expected_outputs.len() {
        return Err(NetworkError::ShapeMismatch {
            context: "input/target list",
            expected: inputs.len(),
            got: expected_outputs.len(),
        });
    }
    if inputs.is_empty() {
        return Ok(0.0);
    }

    let mut total_loss = 0.0;
    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        total_loss += train_step(network, input, expected)?;
    }

    Ok(total_loss / inputs.len() as f64)
}
