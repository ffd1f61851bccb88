use crate::error::{NetworkError, Result};

/// Dense row-major matrix of `f64`.
///
/// Vectors flowing through the network are column matrices (`n × 1`), so a
/// layer computes `W · x` exactly as it is written on paper.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Builds a matrix from row vectors. All rows must share one length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(NetworkError::ShapeMismatch {
                context: "matrix row length",
                expected: cols,
                got: bad.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Column vector (`n × 1`) holding `values`.
    pub fn column(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// Flattens a column vector back into a plain `Vec`.
    pub fn into_column_vec(self) -> Vec<f64> {
        self.data.into_iter().flatten().collect()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Element-wise map that stops at the first failing element.
    pub fn try_map<F>(&self, functor: F) -> Result<Matrix>
    where
        F: Fn(f64) -> Result<f64>,
    {
        let data = self.data
            .iter()
            .map(|row| row.iter().map(|&x| functor(x)).collect::<Result<Vec<f64>>>())
            .collect::<Result<Vec<Vec<f64>>>>()?;
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    /// Matrix product `self · rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(NetworkError::ShapeMismatch {
                context: "matrix product inner dimension",
                expected: self.cols,
                got: rhs.rows,
            });
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "hadamard product", |a, b| a * b)
    }

    /// Element-wise difference `self - rhs`.
    pub fn difference(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "matrix difference", |a, b| a - b)
    }

    /// `self += scale · rhs`, in place.
    pub fn add_scaled(&mut self, rhs: &Matrix, scale: f64) -> Result<()> {
        self.check_same_shape(rhs, "scaled accumulation")?;
        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (x, r) in row.iter_mut().zip(rhs_row.iter()) {
                *x += scale * r;
            }
        }
        Ok(())
    }

    fn zip_with<F>(&self, rhs: &Matrix, context: &'static str, op: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_shape(rhs, context)?;
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(&a, &b)| op(a, b)).collect()
            })
            .collect();
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    fn check_same_shape(&self, rhs: &Matrix, context: &'static str) -> Result<()> {
        if self.rows != rhs.rows {
            return Err(NetworkError::ShapeMismatch { context, expected: self.rows, got: rhs.rows });
        }
        if self.cols != rhs.cols {
            return Err(NetworkError::ShapeMismatch { context, expected: self.cols, got: rhs.cols });
        }
        Ok(())
    }
}
