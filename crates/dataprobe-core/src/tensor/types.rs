//! Tensor sample and invariant selector types.

use std::fmt;
use std::str::FromStr;

use glam::DMat3;
use serde::{Deserialize, Serialize};

use super::eigen::symmetric_eigenvalues;
use crate::error::{ProbeError, Result};

/// A diffusion tensor sample: 9 values of a 3x3 tensor in row-major order
/// (xx, xy, xz, yx, yy, yz, zx, zy, zz).
///
/// The tensor is expected to be symmetric but this is not checked. Off-diagonal
/// pairs are averaged wherever a symmetric matrix is required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tensor3x3Sym([f64; 9]);

impl Tensor3x3Sym {
    pub fn new(components: [f64; 9]) -> Self {
        Self(components)
    }

    /// Build from a slice holding exactly 9 components.
    pub fn from_slice(components: &[f64]) -> Result<Self> {
        let components: [f64; 9] = components
            .try_into()
            .map_err(|_| ProbeError::InvalidTensor {
                len: components.len(),
            })?;
        Ok(Self(components))
    }

    /// Diagonal tensor `diag(xx, yy, zz)`.
    pub fn diagonal(xx: f64, yy: f64, zz: f64) -> Self {
        Self([xx, 0.0, 0.0, 0.0, yy, 0.0, 0.0, 0.0, zz])
    }

    pub fn components(&self) -> &[f64; 9] {
        &self.0
    }

    /// Component at `row`, `col` (both 0..3) as stored.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[row * 3 + col]
    }

    /// The symmetric part `(T + T^t) / 2` as rows.
    pub fn symmetric(&self) -> [[f64; 3]; 3] {
        let mut m = [[0.0; 3]; 3];
        for (row, m_row) in m.iter_mut().enumerate() {
            for (col, value) in m_row.iter_mut().enumerate() {
                *value = 0.5 * (self.get(row, col) + self.get(col, row));
            }
        }
        m
    }

    pub fn trace(&self) -> f64 {
        self.get(0, 0) + self.get(1, 1) + self.get(2, 2)
    }

    /// Determinant of the symmetric part.
    pub fn determinant(&self) -> f64 {
        DMat3::from_cols_array_2d(&self.symmetric()).determinant()
    }

    /// Eigenvalues of the symmetric part, largest first.
    pub fn eigenvalues(&self) -> [f64; 3] {
        symmetric_eigenvalues(&self.symmetric())
    }
}

impl TryFrom<&[f64]> for Tensor3x3Sym {
    type Error = ProbeError;

    fn try_from(components: &[f64]) -> Result<Self> {
        Self::from_slice(components)
    }
}

/// Scalar derived from a diffusion tensor.
///
/// Serialized (and parsed) by the same names the probe shows in its readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Invariant {
    Trace,
    Determinant,
    RelativeAnisotropy,
    /// Fractional anisotropy in [0, 1].
    #[default]
    FractionalAnisotropy,
    MaxEigenvalue,
    MidEigenvalue,
    MinEigenvalue,
    /// Westin linear measure `(l1 - l2) / l1`.
    LinearMeasure,
    /// Westin planar measure `(l2 - l3) / l1`.
    PlanarMeasure,
    /// Westin spherical measure `l3 / l1`.
    SphericalMeasure,
    D11,
    D22,
    D33,
    /// Tensor mode in [-1, 1].
    Mode,
    /// Largest eigenvalue (axial diffusivity).
    ParallelDiffusivity,
    /// Mean of the two smaller eigenvalues (radial diffusivity).
    PerpendicularDiffusivity,
    /// Trace / 3.
    MeanDiffusivity,
}

impl Invariant {
    pub const ALL: [Invariant; 17] = [
        Invariant::Trace,
        Invariant::Determinant,
        Invariant::RelativeAnisotropy,
        Invariant::FractionalAnisotropy,
        Invariant::MaxEigenvalue,
        Invariant::MidEigenvalue,
        Invariant::MinEigenvalue,
        Invariant::LinearMeasure,
        Invariant::PlanarMeasure,
        Invariant::SphericalMeasure,
        Invariant::D11,
        Invariant::D22,
        Invariant::D33,
        Invariant::Mode,
        Invariant::ParallelDiffusivity,
        Invariant::PerpendicularDiffusivity,
        Invariant::MeanDiffusivity,
    ];

    /// Readout name of the invariant.
    pub fn as_str(self) -> &'static str {
        match self {
            Invariant::Trace => "Trace",
            Invariant::Determinant => "Determinant",
            Invariant::RelativeAnisotropy => "RelativeAnisotropy",
            Invariant::FractionalAnisotropy => "FractionalAnisotropy",
            Invariant::MaxEigenvalue => "MaxEigenvalue",
            Invariant::MidEigenvalue => "MidEigenvalue",
            Invariant::MinEigenvalue => "MinEigenvalue",
            Invariant::LinearMeasure => "LinearMeasure",
            Invariant::PlanarMeasure => "PlanarMeasure",
            Invariant::SphericalMeasure => "SphericalMeasure",
            Invariant::D11 => "D11",
            Invariant::D22 => "D22",
            Invariant::D33 => "D33",
            Invariant::Mode => "Mode",
            Invariant::ParallelDiffusivity => "ParallelDiffusivity",
            Invariant::PerpendicularDiffusivity => "PerpendicularDiffusivity",
            Invariant::MeanDiffusivity => "MeanDiffusivity",
        }
    }

    /// Map the host's numeric tensor operation code.
    ///
    /// Codes without a scalar counterpart (color encodings, projections)
    /// return `None`.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Invariant::Trace),
            1 => Some(Invariant::Determinant),
            2 => Some(Invariant::RelativeAnisotropy),
            3 => Some(Invariant::FractionalAnisotropy),
            4 => Some(Invariant::MaxEigenvalue),
            5 => Some(Invariant::MidEigenvalue),
            6 => Some(Invariant::MinEigenvalue),
            7 => Some(Invariant::LinearMeasure),
            8 => Some(Invariant::PlanarMeasure),
            9 => Some(Invariant::SphericalMeasure),
            11 => Some(Invariant::D11),
            12 => Some(Invariant::D22),
            13 => Some(Invariant::D33),
            14 => Some(Invariant::Mode),
            _ => None,
        }
    }

    /// True for invariants that are never negative for a valid result.
    pub fn is_magnitude(self) -> bool {
        matches!(
            self,
            Invariant::FractionalAnisotropy
                | Invariant::RelativeAnisotropy
                | Invariant::LinearMeasure
                | Invariant::PlanarMeasure
                | Invariant::SphericalMeasure
        )
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown invariant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tensor invariant: {0}")]
pub struct UnknownInvariant(pub String);

impl FromStr for Invariant {
    type Err = UnknownInvariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Invariant::ALL
            .into_iter()
            .find(|inv| inv.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownInvariant(s.to_string()))
    }
}
