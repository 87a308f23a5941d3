//! Points and voxel indices.

use std::ops::Sub;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Three real coordinates in one frame (XY, RAS or IJK).
///
/// The frame is not carried by the type; every function that produces or
/// consumes a `Point3` names the frame in its signature and docs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Round an IJK point to the nearest voxel index.
    ///
    /// See [`round_to_index`] for the per-component policy.
    pub fn to_voxel_index(self) -> VoxelIndex {
        VoxelIndex([
            round_to_index(self.x),
            round_to_index(self.y),
            round_to_index(self.z),
        ])
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Point3> for DVec3 {
    fn from(p: Point3) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Integer voxel index `[i, j, k]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelIndex(pub [i64; 3]);

impl VoxelIndex {
    /// True when every component lies in `0..dim` for the matching dimension.
    pub fn in_frame(&self, dims: [usize; 3]) -> bool {
        self.0
            .iter()
            .zip(dims.iter())
            .all(|(&index, &dim)| index >= 0 && (index as u64) < dim as u64)
    }
}

/// Convert a continuous IJK coordinate to an integer index.
///
/// Rounds half away from zero. Non-finite input (NaN or infinity, which a
/// degenerate transform can produce) maps to index 0 instead of failing.
#[inline]
pub fn round_to_index(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_index(0.5), 1);
        assert_eq!(round_to_index(1.5), 2);
        assert_eq!(round_to_index(2.5), 3);
        assert_eq!(round_to_index(-0.5), -1);
        assert_eq!(round_to_index(-2.5), -3);
        assert_eq!(round_to_index(2.49), 2);
    }

    #[test]
    fn test_round_non_finite_is_zero() {
        assert_eq!(round_to_index(f64::NAN), 0);
        assert_eq!(round_to_index(f64::INFINITY), 0);
        assert_eq!(round_to_index(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_to_voxel_index() {
        let p = Point3::new(1.4, f64::NAN, -3.6);
        assert_eq!(p.to_voxel_index(), VoxelIndex([1, 0, -4]));
    }

    #[test]
    fn test_in_frame() {
        let dims = [10, 20, 1];
        assert!(VoxelIndex([0, 0, 0]).in_frame(dims));
        assert!(VoxelIndex([9, 19, 0]).in_frame(dims));
        assert!(!VoxelIndex([10, 0, 0]).in_frame(dims));
        assert!(!VoxelIndex([0, -1, 0]).in_frame(dims));
        assert!(!VoxelIndex([0, 0, 1]).in_frame(dims));
    }
}
