//! Diffusion tensor scalar invariants.
//!
//! A tensor sample is 9 row-major components of a symmetric 3x3 matrix. An
//! [`Invariant`] selects which scalar to derive; the default is fractional
//! anisotropy. Results are `Option<f64>` so an undefined value (such as the
//! anisotropy of an all-zero tensor) is distinct from a valid zero.

mod eigen;
mod invariant;
mod types;

pub use invariant::{compute_invariant, tensor_invariant};
pub use types::{Invariant, Tensor3x3Sym, UnknownInvariant};
