//! Sliding-window features along the diagonal of a contact matrix.

use crate::libs::error::{Result, TadError};
use nalgebra::DMatrix;

/// Window length for a matrix of `n` bins: `n / proportion`.
///
/// ```
/// use scanchip::libs::feature::window_length;
/// assert_eq!(window_length(100, 10).unwrap(), 10);
/// assert_eq!(window_length(9, 4).unwrap(), 2);
/// assert!(window_length(3, 4).is_err());
/// assert!(window_length(3, 0).is_err());
/// ```
pub fn window_length(n: usize, proportion: usize) -> Result<usize> {
    if proportion == 0 {
        return Err(TadError::InvalidParameter {
            name: "windowproportion",
            message: "must be greater than 0".to_string(),
        });
    }

    let len = n / proportion;
    if len == 0 {
        return Err(TadError::InvalidParameter {
            name: "windowproportion",
            message: format!("{} bins / {} gives an empty window", n, proportion),
        });
    }

    Ok(len)
}

/// Collects `window_length²` values for every diagonal position `d`.
///
/// * Forward window `[d, d + window_length)`: column-major, `j` outer and `i` inner.
/// * When the forward window runs past the last bin, the window reads backward
///   instead, `matrix[d - i, d - j]` with `i` outer and `j` inner. Cells near the
///   far edge are therefore visited more than once.
///
/// A backward offset below zero wraps to the far end of the matrix.
///
/// The result always holds `n * window_length²` values.
pub fn extract_features(matrix: &DMatrix<f64>, window_length: usize) -> Result<Vec<f64>> {
    if window_length == 0 {
        return Err(TadError::InvalidParameter {
            name: "window_length",
            message: "must be at least 1".to_string(),
        });
    }

    let n = matrix.nrows();
    if n == 0 || matrix.ncols() != n {
        return Err(TadError::InvalidParameter {
            name: "matrix",
            message: format!(
                "must be square and non-empty, got {}x{}",
                n,
                matrix.ncols()
            ),
        });
    }

    if window_length > n {
        return Err(TadError::InvalidParameter {
            name: "window_length",
            message: format!("{} exceeds the matrix size {}", window_length, n),
        });
    }

    let mut features = Vec::with_capacity(n * window_length * window_length);

    for diag in 0..n {
        // end position of the window
        let window = window_length + diag;

        if window > n {
            for i in 0..window_length {
                for j in 0..window_length {
                    features.push(matrix[(wrap(diag, i, n), wrap(diag, j, n))]);
                }
            }
        } else {
            for j in diag..window {
                for i in diag..window {
                    features.push(matrix[(i, j)]);
                }
            }
        }
    }

    Ok(features)
}

// (diag - offset) mod n
fn wrap(diag: usize, offset: usize, n: usize) -> usize {
    (diag + n - offset) % n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat4() -> DMatrix<f64> {
        DMatrix::from_row_slice(
            4,
            4,
            &[
                0.0, 1.0, 2.0, 3.0, //
                10.0, 11.0, 12.0, 13.0, //
                20.0, 21.0, 22.0, 23.0, //
                30.0, 31.0, 32.0, 33.0,
            ],
        )
    }

    #[test]
    fn test_features_len() {
        let features = extract_features(&mat4(), 2).unwrap();
        assert_eq!(features.len(), 4 * 2 * 2);

        let features = extract_features(&mat4(), 1).unwrap();
        assert_eq!(features, vec![0.0, 11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_features_forward_is_column_major() {
        let features = extract_features(&mat4(), 2).unwrap();
        // d = 0: m[0,0], m[1,0], m[0,1], m[1,1]
        assert_eq!(&features[0..4], &[0.0, 10.0, 1.0, 11.0]);
        // d = 1
        assert_eq!(&features[4..8], &[11.0, 21.0, 12.0, 22.0]);
        // d = 2 still fits: window = 4 == n
        assert_eq!(&features[8..12], &[22.0, 32.0, 23.0, 33.0]);
    }

    #[test]
    fn test_features_backward_at_far_edge() {
        let m = mat4();
        let features = extract_features(&m, 2).unwrap();

        // d = 3: window = 5 > 4, reads m[3 - i, 3 - j] row-major
        let mut expected = vec![];
        for i in 0..2 {
            for j in 0..2 {
                expected.push(m[(3 - i, 3 - j)]);
            }
        }
        assert_eq!(&features[12..16], expected.as_slice());
        assert_eq!(&features[12..16], &[33.0, 32.0, 23.0, 22.0]);
    }

    #[test]
    fn test_features_backward_wraps() {
        // window_length == n: every d > 0 reads backward and d - i can drop below 0
        let features = extract_features(&mat4(), 4).unwrap();
        assert_eq!(features.len(), 64);

        // d = 1, i = 0: m[1, 1], m[1, 0], m[1, 3], m[1, 2]
        assert_eq!(&features[16..20], &[11.0, 10.0, 13.0, 12.0]);
    }

    #[test]
    fn test_features_invalid() {
        assert!(matches!(
            extract_features(&mat4(), 0),
            Err(TadError::InvalidParameter { .. })
        ));

        let m = DMatrix::<f64>::zeros(2, 3);
        assert!(extract_features(&m, 1).is_err());

        let m = DMatrix::<f64>::zeros(0, 0);
        assert!(extract_features(&m, 1).is_err());

        assert!(extract_features(&mat4(), 5).is_err());
    }
}
