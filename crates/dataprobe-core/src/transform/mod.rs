//! Coordinate transforms between the three frames of a slice view.
//!
//! # Frames
//!
//! - **XY**: pixel coordinates of an on-screen slice view, origin bottom-left
//! - **RAS**: patient/world space (Right, Anterior, Superior)
//! - **IJK**: voxel index space of a volume
//!
//! Matrices are 4x4 homogeneous, row-major at every public boundary. All
//! functions are pure and may be called concurrently.

mod affine;
mod point;
mod xy_to_ijk;

pub use affine::{Affine4x4, SINGULAR_EPSILON};
pub use point::{round_to_index, Point3, VoxelIndex};
pub use xy_to_ijk::{
    apply_affine, compute_xy_to_ijk, compute_xy_to_ijk_with_epsilon, corners_in_frame,
    locate_voxel, xy_corners,
};
