//! Error types shared by the probe computations.

use thiserror::Error;

/// Errors raised by transform and tensor computations.
///
/// All errors are local to a single call. A `SingularMatrix` means the
/// position cannot be resolved for that layer and the dependent readout
/// should be suppressed; the length errors indicate a malformed call site.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    /// A matrix that had to be inverted is degenerate.
    #[error("Matrix is singular (determinant {determinant:e})")]
    SingularMatrix { determinant: f64 },

    /// Tensor input did not have exactly 9 components.
    #[error("Invalid tensor: a 9-component array is required, got {len}")]
    InvalidTensor { len: usize },

    /// Matrix input did not have exactly 16 components.
    #[error("Invalid matrix: a 16-component row-major array is required, got {len}")]
    InvalidMatrix { len: usize },

    /// Pixel buffer does not match the declared image dimensions.
    #[error("Invalid image: {width}x{height} RGB needs {expected} bytes, got {actual}")]
    InvalidImage {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Result alias for probe computations.
pub type Result<T> = std::result::Result<T, ProbeError>;
