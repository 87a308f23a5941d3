//! Overview preview: the whole volume slice scaled into a small thumbnail,
//! with the visible slice-view region outlined.

use crate::transform::{Affine4x4, Point3};

/// Outline of the slice view inside the preview thumbnail.
///
/// `ijk_corners` are the view corners in IJK (as returned by
/// [`corners_in_frame`](crate::transform::corners_in_frame) with the XY->IJK
/// transform). I and J are scaled by `preview_height / volume_height_j`,
/// rounded half to even, clipped to the preview, and J is flipped so row 0 is
/// the top of the thumbnail. The corner order is preserved.
///
/// Returns `None` for an empty preview or a volume with no rows.
pub fn preview_polygon(
    ijk_corners: &[Point3; 4],
    volume_height_j: u32,
    preview: (u32, u32),
) -> Option<[(u32, u32); 4]> {
    let (width, height) = preview;
    if width == 0 || height == 0 || volume_height_j == 0 {
        return None;
    }
    let rescale = height as f64 / volume_height_j as f64;

    let scale_clip = |value: f64, max: u32| -> u32 {
        let scaled = (value * rescale).round_ties_even();
        if scaled.is_finite() {
            scaled.clamp(0.0, max as f64) as u32
        } else {
            0
        }
    };

    Some(ijk_corners.map(|corner| {
        let i = scale_clip(corner.x, width - 1);
        let j = scale_clip(corner.y, height - 1);
        (i, height - j - 1)
    }))
}

/// New XYZ origin for a slice view after a click on the preview.
///
/// The clicked preview pixel is scaled back to voxel units
/// (`volume_height_j / preview_height`), mapped to RAS through `ijk_to_ras`
/// (preceded by `parent_to_world` when the volume has a parent transform), and
/// the origin is the slice-to-RAS translation minus that point with the second
/// component negated.
///
/// Returns `None` when `preview_height` is zero.
pub fn recenter_origin_from_preview(
    click: (f64, f64),
    preview_height: u32,
    volume_height_j: u32,
    ijk_to_ras: &Affine4x4,
    parent_to_world: Option<&Affine4x4>,
    slice_to_ras: &Affine4x4,
) -> Option<Point3> {
    if preview_height == 0 {
        return None;
    }
    let small_to_large = volume_height_j as f64 / preview_height as f64;

    let ijk_to_ras = match parent_to_world {
        Some(parent) => parent.multiply(ijk_to_ras),
        None => *ijk_to_ras,
    };

    let voxel = Point3::new(click.0 * small_to_large, click.1 * small_to_large, 0.0);
    let ras_centre = ijk_to_ras.apply(voxel);

    let mut origin = slice_to_ras.translation() - ras_centre;
    origin.y = -origin.y;
    Some(origin)
}
