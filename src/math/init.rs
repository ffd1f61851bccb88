use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;

/// Fan-in scaled normal initialization: every entry is drawn from
/// N(0, cols^-0.5).
///
/// `cols` is the fan-in (number of input connections per row). The random
/// source is passed in so a seeded `StdRng` gives reproducible weights.
pub fn init<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Matrix> {
    if rows == 0 || cols == 0 {
        return Err(NetworkError::InvalidConfig(format!(
            "cannot initialize a {rows}x{cols} weight matrix"
        )));
    }

    let std_dev = (cols as f64).powf(-0.5);
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| NetworkError::InvalidConfig(e.to_string()))?;

    let mut res = Matrix::zeros(rows, cols);
    for row in res.data.iter_mut() {
        for x in row.iter_mut() {
            *x = normal.sample(rng);
        }
    }
    Ok(res)
}
