use crate::error::{NetworkError, Result};

/// Rotates a square, row-major image about its centre.
///
/// Positive `degrees` turn the picture anticlockwise as displayed (row 0 at
/// the top). Samples are bilinear; source positions outside the image read
/// as `fill`. The output has the same size as the input.
pub fn rotate(image: &[f64], side: usize, degrees: f64, fill: f64) -> Result<Vec<f64>> {
    if image.len() != side * side {
        return Err(NetworkError::ShapeMismatch {
            context: "square image",
            expected: side * side,
            got: image.len(),
        });
    }

    let (sin, cos) = degrees.to_radians().sin_cos();
    let centre = (side as f64 - 1.0) / 2.0;
    let pixel = |r: isize, c: isize| -> f64 {
        if r < 0 || c < 0 || r as usize >= side || c as usize >= side {
            fill
        } else {
            image[r as usize * side + c as usize]
        }
    };

    let mut out = vec![fill; side * side];
    for r in 0..side {
        for c in 0..side {
            let dx = c as f64 - centre;
            let up = centre - r as f64;

            // Inverse rotation: where in the source does this pixel come from.
            let src_x = dx * cos + up * sin;
            let src_up = -dx * sin + up * cos;
            let src_r = centre - src_up;
            let src_c = centre + src_x;

            let r0 = src_r.floor();
            let c0 = src_c.floor();
            let fr = src_r - r0;
            let fc = src_c - c0;
            let (r0, c0) = (r0 as isize, c0 as isize);

            out[r * side + c] = pixel(r0, c0) * (1.0 - fr) * (1.0 - fc)
                + pixel(r0, c0 + 1) * (1.0 - fr) * fc
                + pixel(r0 + 1, c0) * fr * (1.0 - fc)
                + pixel(r0 + 1, c0 + 1) * fr * fc;
        }
    }
    Ok(out)
}

/// Side length of a square image with `len` pixels, if `len` is a square.
pub fn square_side(len: usize) -> Option<usize> {
    let side = (len as f64).sqrt().round() as usize;
    (side * side == len).then_some(side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> Vec<f64> {
        (0..9).map(|v| v as f64).collect()
    }

    #[test]
    fn zero_degrees_is_identity() {
        assert_eq!(rotate(&grid(), 3, 0.0, -1.0).unwrap(), grid());
    }

    #[test]
    fn quarter_turn_moves_top_right_to_top_left() {
        let out = rotate(&grid(), 3, 90.0, -1.0).unwrap();
        // 0 1 2      2 5 8
        // 3 4 5  ->  1 4 7
        // 6 7 8      0 3 6
        let expected = [2.0, 5.0, 8.0, 1.0, 4.0, 7.0, 0.0, 3.0, 6.0];
        for (got, want) in out.iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-9);
        }
    }

    #[test]
    fn corners_fall_back_to_fill() {
        let image = vec![0.5; 28 * 28];
        let out = rotate(&image, 28, 45.0, 0.01).unwrap();
        assert_relative_eq!(out[0], 0.01, epsilon = 1e-12);
        assert_relative_eq!(out[14 * 28 + 14], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn non_square_input_is_rejected() {
        assert!(matches!(
            rotate(&[0.0; 8], 3, 10.0, 0.0),
            Err(NetworkError::ShapeMismatch { expected: 9, got: 8, .. })
        ));
        assert_eq!(square_side(784), Some(28));
        assert_eq!(square_side(10), None);
    }
}
