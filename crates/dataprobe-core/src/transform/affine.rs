//! 4x4 homogeneous affine matrices.
//!
//! Matrices cross the API boundary as 16 row-major doubles (the layout the
//! host scene exposes). Internally they are held as a `glam::DMat4`, which is
//! column-major; the conversion happens only in the constructors and
//! accessors below.

use glam::{DMat4, DVec3, DVec4};

use super::Point3;
use crate::error::{ProbeError, Result};

/// Determinant magnitude below which a matrix is treated as non-invertible.
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// Immutable 4x4 homogeneous transform.
///
/// Transforms built by this crate keep a last row of `[0, 0, 0, 1]`. Caller
/// supplied matrices are accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine4x4 {
    inner: DMat4,
}

impl Default for Affine4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine4x4 {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            inner: DMat4::IDENTITY,
        }
    }

    /// Build from 16 row-major values.
    pub fn from_row_major(values: [f64; 16]) -> Self {
        // Reading row-major data as columns yields the transpose.
        Self {
            inner: DMat4::from_cols_array(&values).transpose(),
        }
    }

    /// Build from a row-major slice, which must hold exactly 16 values.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; 16] = values
            .try_into()
            .map_err(|_| ProbeError::InvalidMatrix { len: values.len() })?;
        Ok(Self::from_row_major(values))
    }

    /// Axis-aligned scale.
    pub fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            inner: DMat4::from_scale(DVec3::new(sx, sy, sz)),
        }
    }

    /// Pure translation.
    pub fn from_translation(offset: Point3) -> Self {
        Self {
            inner: DMat4::from_translation(offset.into()),
        }
    }

    /// The 16 values in row-major order.
    pub fn to_row_major(&self) -> [f64; 16] {
        self.inner.transpose().to_cols_array()
    }

    /// Element at `row`, `col` (both 0..4).
    pub fn element(&self, row: usize, col: usize) -> f64 {
        self.inner.col(col)[row]
    }

    /// Matrix product `self * rhs`.
    ///
    /// Applied to a point, `rhs` acts first and `self` second.
    pub fn multiply(&self, rhs: &Affine4x4) -> Affine4x4 {
        Affine4x4 {
            inner: self.inner * rhs.inner,
        }
    }

    /// Compose so that `self` is applied first and `next` second.
    ///
    /// Equivalent to `next.multiply(self)`.
    pub fn then(&self, next: &Affine4x4) -> Affine4x4 {
        next.multiply(self)
    }

    pub fn determinant(&self) -> f64 {
        self.inner.determinant()
    }

    /// Invert, rejecting matrices with `|det| < SINGULAR_EPSILON`.
    pub fn try_inverse(&self) -> Result<Affine4x4> {
        self.try_inverse_with_epsilon(SINGULAR_EPSILON)
    }

    /// Invert, rejecting matrices with `|det| < epsilon`.
    pub fn try_inverse_with_epsilon(&self, epsilon: f64) -> Result<Affine4x4> {
        let determinant = self.determinant();
        if !determinant.is_finite() || determinant.abs() < epsilon {
            #[cfg(feature = "tracing")]
            tracing::debug!(determinant, epsilon, "rejecting singular matrix");
            return Err(ProbeError::SingularMatrix { determinant });
        }
        Ok(Affine4x4 {
            inner: self.inner.inverse(),
        })
    }

    /// Map a point: append a homogeneous 1, multiply, keep the first three
    /// components. No perspective divide is performed.
    pub fn apply(&self, point: Point3) -> Point3 {
        let p = self.inner * DVec4::new(point.x, point.y, point.z, 1.0);
        Point3::new(p.x, p.y, p.z)
    }

    /// First three entries of the last column.
    pub fn translation(&self) -> Point3 {
        let t = self.inner.w_axis;
        Point3::new(t.x, t.y, t.z)
    }

    /// Copy of this matrix with the first three entries of the last column
    /// replaced.
    pub fn with_translation(&self, offset: Point3) -> Affine4x4 {
        let mut inner = self.inner;
        inner.w_axis = DVec4::new(offset.x, offset.y, offset.z, inner.w_axis.w);
        Affine4x4 { inner }
    }

    /// Element-wise comparison within `max_abs_diff`.
    pub fn abs_diff_eq(&self, other: &Affine4x4, max_abs_diff: f64) -> bool {
        self.inner.abs_diff_eq(other.inner, max_abs_diff)
    }
}

impl From<[f64; 16]> for Affine4x4 {
    fn from(values: [f64; 16]) -> Self {
        Self::from_row_major(values)
    }
}
