//! Closed-form eigenvalues of a symmetric 3x3 matrix.
//!
//! Uses the trigonometric solution of the characteristic cubic (Smith, 1961).
//! Diagonal input short-circuits so isotropic tensors produce exact values.

use std::f64::consts::PI;

/// Eigenvalues of a symmetric matrix, sorted largest first.
///
/// Only the upper triangle is read.
pub(crate) fn symmetric_eigenvalues(m: &[[f64; 3]; 3]) -> [f64; 3] {
    let off = m[0][1] * m[0][1] + m[0][2] * m[0][2] + m[1][2] * m[1][2];

    if off == 0.0 {
        let mut eig = [m[0][0], m[1][1], m[2][2]];
        eig.sort_by(|a, b| b.total_cmp(a));
        return eig;
    }

    let q = (m[0][0] + m[1][1] + m[2][2]) / 3.0;
    let p2 = (m[0][0] - q).powi(2) + (m[1][1] - q).powi(2) + (m[2][2] - q).powi(2) + 2.0 * off;
    let p = (p2 / 6.0).sqrt();

    // B = (A - qI) / p
    let b00 = (m[0][0] - q) / p;
    let b11 = (m[1][1] - q) / p;
    let b22 = (m[2][2] - q) / p;
    let b01 = m[0][1] / p;
    let b02 = m[0][2] / p;
    let b12 = m[1][2] / p;

    let det_b = b00 * (b11 * b22 - b12 * b12) - b01 * (b01 * b22 - b12 * b02)
        + b02 * (b01 * b12 - b11 * b02);
    let r = (det_b / 2.0).clamp(-1.0, 1.0);
    let phi = r.acos() / 3.0;

    let largest = q + 2.0 * p * phi.cos();
    let smallest = q + 2.0 * p * (phi + 2.0 * PI / 3.0).cos();
    let middle = 3.0 * q - largest - smallest;

    [largest, middle, smallest]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: [f64; 3], expected: [f64; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-10, "expected {:?}, got {:?}", expected, actual);
        }
    }

    #[test]
    fn test_diagonal_sorted_descending() {
        let m = [[1.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 2.0]];
        assert_eq!(symmetric_eigenvalues(&m), [3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_identity() {
        let m = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_eq!(symmetric_eigenvalues(&m), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_two_by_two_block() {
        // [[2,1],[1,2]] has eigenvalues 3 and 1
        let m = [[2.0, 1.0, 0.0], [1.0, 2.0, 0.0], [0.0, 0.0, 5.0]];
        assert_close(symmetric_eigenvalues(&m), [5.0, 3.0, 1.0]);
    }

    #[test]
    fn test_full_matrix() {
        // Eigenvalues of [[4,1,2],[1,5,3],[2,3,6]] sum to the trace and
        // multiply to the determinant (70).
        let m = [[4.0, 1.0, 2.0], [1.0, 5.0, 3.0], [2.0, 3.0, 6.0]];
        let eig = symmetric_eigenvalues(&m);
        assert!((eig.iter().sum::<f64>() - 15.0).abs() < 1e-10);
        assert!((eig.iter().product::<f64>() - 70.0).abs() < 1e-9);
        assert!(eig[0] >= eig[1] && eig[1] >= eig[2]);
    }
}
