//! Screen-to-voxel mapping for a slice view.
//!
//! A slice view knows its XY->RAS matrix; a volume knows RAS->IJK (and its
//! inverse IJK->RAS). When the volume sits under a parent spatial transform,
//! the naive RAS->IJK no longer describes where the voxel grid is, so the
//! effective RAS->IJK is rebuilt as `inverse(parent * ijk_to_ras)`.

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{Affine4x4, Point3, VoxelIndex, SINGULAR_EPSILON};
use crate::error::Result;

/// Compose the XY->IJK transform for one layer of a slice view.
///
/// # Arguments
///
/// * `xy_to_ras` - Slice view pixel (XY) to patient (RAS)
/// * `ras_to_ijk` - Volume RAS to voxel index (IJK), ignoring any parent
///   transform
/// * `ijk_to_ras` - Volume IJK to RAS; only consulted with a parent transform.
///   When absent it is derived by inverting `ras_to_ijk`.
/// * `parent_to_world` - The parent transform node's matrix-to-parent, if the
///   volume has one
///
/// # Errors
///
/// `ProbeError::SingularMatrix` when a matrix that must be inverted has a
/// determinant below [`SINGULAR_EPSILON`]. Callers should treat this as "no
/// mapping available" for the layer.
pub fn compute_xy_to_ijk(
    xy_to_ras: &Affine4x4,
    ras_to_ijk: &Affine4x4,
    ijk_to_ras: Option<&Affine4x4>,
    parent_to_world: Option<&Affine4x4>,
) -> Result<Affine4x4> {
    compute_xy_to_ijk_with_epsilon(
        xy_to_ras,
        ras_to_ijk,
        ijk_to_ras,
        parent_to_world,
        SINGULAR_EPSILON,
    )
}

/// [`compute_xy_to_ijk`] with an explicit singularity threshold.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(xy_to_ras, ras_to_ijk, ijk_to_ras, parent_to_world))
)]
pub fn compute_xy_to_ijk_with_epsilon(
    xy_to_ras: &Affine4x4,
    ras_to_ijk: &Affine4x4,
    ijk_to_ras: Option<&Affine4x4>,
    parent_to_world: Option<&Affine4x4>,
    epsilon: f64,
) -> Result<Affine4x4> {
    let effective_ras_to_ijk = match parent_to_world {
        None => *ras_to_ijk,
        Some(parent) => {
            let ijk_to_ras = match ijk_to_ras {
                Some(m) => *m,
                None => ras_to_ijk.try_inverse_with_epsilon(epsilon)?,
            };
            parent
                .multiply(&ijk_to_ras)
                .try_inverse_with_epsilon(epsilon)?
        }
    };
    Ok(effective_ras_to_ijk.multiply(xy_to_ras))
}

/// Map `point` through `transform`.
///
/// Appends a homogeneous 1, left-multiplies, and returns the first three
/// components. The source and destination frames are those of `transform`.
#[inline]
pub fn apply_affine(transform: &Affine4x4, point: Point3) -> Point3 {
    transform.apply(point)
}

/// Voxel under an XY position: map through `xy_to_ijk` and round each
/// component with [`round_to_index`](super::round_to_index).
pub fn locate_voxel(xy_to_ijk: &Affine4x4, xy: Point3) -> VoxelIndex {
    xy_to_ijk.apply(xy).to_voxel_index()
}

/// The four XY corners of a `(dx, dy)` view at z = 0, in winding order:
/// bottom-left, top-left, top-right, bottom-right.
pub fn xy_corners(dimensions: (u32, u32)) -> [Point3; 4] {
    let right = dimensions.0 as f64 - 1.0;
    let top = dimensions.1 as f64 - 1.0;
    [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, top, 0.0),
        Point3::new(right, top, 0.0),
        Point3::new(right, 0.0, 0.0),
    ]
}

/// Project the corners of a `(dx, dy)` XY extent through `transform`.
///
/// The order is fixed (bottom-left, top-left, top-right, bottom-right) so the
/// result can be drawn directly as a non-self-intersecting quadrilateral.
pub fn corners_in_frame(dimensions: (u32, u32), transform: &Affine4x4) -> [Point3; 4] {
    xy_corners(dimensions).map(|corner| transform.apply(corner))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
