//! Scalar invariants of a diffusion tensor.
//!
//! Every invariant is recomputed from the 9 input components on each call;
//! nothing is cached between calls.

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{Invariant, Tensor3x3Sym};
use crate::error::Result;

/// Denominators below this magnitude make a ratio invariant undefined.
const UNDEFINED_THRESHOLD: f64 = 1e-30;

/// Deviatoric norms below this fraction of the eigenvalue norm are treated as
/// isotropic when computing the mode.
const ISOTROPIC_TOLERANCE: f64 = 1e-9;

/// Compute `invariant` for a tensor given as 9 row-major components.
///
/// # Returns
///
/// `Ok(None)` when the invariant is undefined for the tensor, for example
/// fractional anisotropy of the all-zero tensor. A valid zero is `Ok(Some(0.0))`.
///
/// # Errors
///
/// `ProbeError::InvalidTensor` unless `components` has exactly 9 values.
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip(components)))]
pub fn compute_invariant(components: &[f64], invariant: Invariant) -> Result<Option<f64>> {
    let tensor = Tensor3x3Sym::from_slice(components)?;
    Ok(tensor_invariant(&tensor, invariant))
}

/// Compute `invariant` for an already validated tensor.
pub fn tensor_invariant(tensor: &Tensor3x3Sym, invariant: Invariant) -> Option<f64> {
    let value = match invariant {
        Invariant::Trace => Some(tensor.trace()),
        Invariant::Determinant => Some(tensor.determinant()),
        Invariant::D11 => Some(tensor.get(0, 0)),
        Invariant::D22 => Some(tensor.get(1, 1)),
        Invariant::D33 => Some(tensor.get(2, 2)),
        Invariant::MeanDiffusivity => Some(tensor.trace() / 3.0),
        _ => eigen_invariant(tensor.eigenvalues(), invariant),
    };
    value.filter(|v| v.is_finite())
}

fn eigen_invariant(eig: [f64; 3], invariant: Invariant) -> Option<f64> {
    let [l1, l2, l3] = eig;
    let mean = (l1 + l2 + l3) / 3.0;
    let deviation = ((l1 - mean).powi(2) + (l2 - mean).powi(2) + (l3 - mean).powi(2)).sqrt();
    let norm = (l1 * l1 + l2 * l2 + l3 * l3).sqrt();

    match invariant {
        Invariant::MaxEigenvalue | Invariant::ParallelDiffusivity => Some(l1),
        Invariant::MidEigenvalue => Some(l2),
        Invariant::MinEigenvalue => Some(l3),
        Invariant::PerpendicularDiffusivity => Some(0.5 * (l2 + l3)),
        Invariant::FractionalAnisotropy => {
            ratio((1.5f64).sqrt() * deviation, norm).map(|fa| fa.clamp(0.0, 1.0))
        }
        Invariant::RelativeAnisotropy => {
            ratio(deviation, 3.0f64.sqrt() * mean).map(|ra| ra.max(0.0))
        }
        Invariant::LinearMeasure => ratio(l1 - l2, l1).map(|v| v.max(0.0)),
        Invariant::PlanarMeasure => ratio(l2 - l3, l1).map(|v| v.max(0.0)),
        Invariant::SphericalMeasure => ratio(l3, l1).map(|v| v.max(0.0)),
        Invariant::Mode => {
            if deviation <= ISOTROPIC_TOLERANCE * norm || deviation < UNDEFINED_THRESHOLD {
                return None;
            }
            let d = [(l1 - mean) / deviation, (l2 - mean) / deviation, (l3 - mean) / deviation];
            let mode = 3.0 * 6.0f64.sqrt() * d[0] * d[1] * d[2];
            Some(mode.clamp(-1.0, 1.0))
        }
        // Handled by `tensor_invariant` without an eigen decomposition.
        Invariant::Trace
        | Invariant::Determinant
        | Invariant::D11
        | Invariant::D22
        | Invariant::D33
        | Invariant::MeanDiffusivity => None,
    }
}

#[inline]
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.abs() < UNDEFINED_THRESHOLD {
        None
    } else {
        Some(numerator / denominator)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for positive semi-definite diffusion tensors built as
    /// diagonal eigenvalues plus a small symmetric perturbation.
    fn tensor_strategy() -> impl Strategy<Value = [f64; 9]> {
        (
            (0.0f64..3.0, 0.0f64..3.0, 0.0f64..3.0),
            (-0.1f64..0.1, -0.1f64..0.1, -0.1f64..0.1),
        )
            .prop_map(|((a, b, c), (xy, xz, yz))| {
                [a + 0.5, xy, xz, xy, b + 0.5, yz, xz, yz, c + 0.5]
            })
    }

    proptest! {
        /// Property: FA of a positive definite tensor lies in [0, 1].
        #[test]
        fn prop_fa_in_unit_range(t in tensor_strategy()) {
            let value = compute_invariant(&t, Invariant::FractionalAnisotropy)
                .unwrap()
                .unwrap();
            prop_assert!((0.0..=1.0).contains(&value), "FA out of range: {}", value);
        }

        /// Property: magnitude invariants are never negative.
        #[test]
        fn prop_magnitude_invariants_non_negative(t in tensor_strategy()) {
            for inv in Invariant::ALL.into_iter().filter(|i| i.is_magnitude()) {
                if let Some(value) = compute_invariant(&t, inv).unwrap() {
                    prop_assert!(value >= 0.0, "{} was {}", inv, value);
                }
            }
        }

        /// Property: eigenvalues sum to the trace.
        #[test]
        fn prop_eigenvalues_sum_to_trace(t in tensor_strategy()) {
            let tensor = Tensor3x3Sym::new(t);
            let sum: f64 = tensor.eigenvalues().iter().sum();
            prop_assert!((sum - tensor.trace()).abs() < 1e-9);
        }

        /// Property: any length other than 9 is rejected.
        #[test]
        fn prop_wrong_length_rejected(len in 0usize..32) {
            prop_assume!(len != 9);
            let components = vec![1.0; len];
            prop_assert!(compute_invariant(&components, Invariant::Trace).is_err());
        }
    }
}
