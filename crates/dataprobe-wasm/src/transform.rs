//! WASM bindings for coordinate transforms.
//!
//! All matrices are 16-element row-major `Float64Array`s.

use dataprobe_core::transform::{corners_in_frame, locate_voxel};
use dataprobe_core::{Point3, ProbeError, ProbeOptions};
use wasm_bindgen::prelude::*;

use crate::console;
use crate::types::{matrix, optional_matrix, options_from_js, to_js_error};

/// Compose the XY->IJK matrix for one layer of a slice view.
///
/// # Arguments
///
/// * `xy_to_ras` - Slice view XY to RAS
/// * `ras_to_ijk` - Volume RAS to IJK
/// * `ijk_to_ras` - Volume IJK to RAS (optional; derived when omitted)
/// * `parent_to_world` - Parent transform matrix (optional)
/// * `options` - Probe options object, or `undefined` for defaults
///
/// # Returns
///
/// The row-major XY->IJK matrix. Throws when a required inversion is singular;
/// callers should hide the layer's readout in that case.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const xyToIjk = xy_to_ijk(xyToRas, rasToIjk, undefined, undefined, undefined);
/// const ijk = apply_affine(xyToIjk, x, y, 0);
/// ```
#[wasm_bindgen]
pub fn xy_to_ijk(
    xy_to_ras: &[f64],
    ras_to_ijk: &[f64],
    ijk_to_ras: Option<Vec<f64>>,
    parent_to_world: Option<Vec<f64>>,
    options: JsValue,
) -> Result<Vec<f64>, JsValue> {
    let options = options_from_js(options)?;
    compose_xy_to_ijk(
        xy_to_ras,
        ras_to_ijk,
        ijk_to_ras.as_deref(),
        parent_to_world.as_deref(),
        &options,
    )
    .map(|m| m.to_vec())
    .map_err(to_js_error)
}

pub(crate) fn compose_xy_to_ijk(
    xy_to_ras: &[f64],
    ras_to_ijk: &[f64],
    ijk_to_ras: Option<&[f64]>,
    parent_to_world: Option<&[f64]>,
    options: &ProbeOptions,
) -> Result<[f64; 16], ProbeError> {
    let xy_to_ras = matrix(xy_to_ras)?;
    let ras_to_ijk = matrix(ras_to_ijk)?;
    let ijk_to_ras = optional_matrix(ijk_to_ras)?;
    let parent_to_world = optional_matrix(parent_to_world)?;

    options
        .xy_to_ijk(
            &xy_to_ras,
            &ras_to_ijk,
            ijk_to_ras.as_ref(),
            parent_to_world.as_ref(),
        )
        .map(|m| m.to_row_major())
        .inspect_err(|e| console::debug("xy_to_ijk", e))
}

/// Map a point through a row-major matrix; returns `[x, y, z]`.
#[wasm_bindgen]
pub fn apply_affine(transform: &[f64], x: f64, y: f64, z: f64) -> Result<Vec<f64>, JsValue> {
    let transform = matrix(transform).map_err(to_js_error)?;
    Ok(transform.apply(Point3::new(x, y, z)).to_array().to_vec())
}

/// Rounded voxel index under an XY position; returns `[i, j, k]`.
///
/// Non-finite results (from a degenerate matrix) become 0.
#[wasm_bindgen]
pub fn voxel_index(xy_to_ijk: &[f64], x: f64, y: f64, z: f64) -> Result<Vec<i32>, JsValue> {
    let xy_to_ijk = matrix(xy_to_ijk).map_err(to_js_error)?;
    Ok(voxel_index_i32(&locate_voxel(&xy_to_ijk, Point3::new(x, y, z)).0))
}

fn voxel_index_i32(index: &[i64; 3]) -> Vec<i32> {
    index
        .iter()
        .map(|&v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
        .collect()
}

/// Corners of a `width` x `height` view projected through `transform`.
///
/// Returns 12 values: bottom-left, top-left, top-right, bottom-right, each as
/// `x, y, z`.
#[wasm_bindgen]
pub fn view_corners(width: u32, height: u32, transform: &[f64]) -> Result<Vec<f64>, JsValue> {
    let transform = matrix(transform).map_err(to_js_error)?;
    Ok(flatten_corners((width, height), &transform))
}

pub(crate) fn flatten_corners(
    dimensions: (u32, u32),
    transform: &dataprobe_core::Affine4x4,
) -> Vec<f64> {
    corners_in_frame(dimensions, transform)
        .iter()
        .flat_map(|p| p.to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataprobe_core::Affine4x4;

    const IDENTITY: [f64; 16] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ];

    #[test]
    fn test_compose_scaled() {
        let mut xy_to_ras = IDENTITY;
        xy_to_ras[0] = 2.0;
        xy_to_ras[10] = 0.0;
        let m = compose_xy_to_ijk(&xy_to_ras, &IDENTITY, None, None, &ProbeOptions::default())
            .unwrap();
        let p = Affine4x4::from_row_major(m).apply(Point3::new(10.0, 20.0, 0.0));
        assert_eq!(p, Point3::new(20.0, 20.0, 0.0));
    }

    #[test]
    fn test_compose_rejects_bad_length() {
        let result = compose_xy_to_ijk(&IDENTITY, &[0.0; 9], None, None, &ProbeOptions::default());
        assert_eq!(result, Err(ProbeError::InvalidMatrix { len: 9 }));
    }

    #[test]
    fn test_compose_singular_parent() {
        let zero = [0.0; 16];
        let result = compose_xy_to_ijk(
            &IDENTITY,
            &IDENTITY,
            Some(&zero),
            Some(&IDENTITY),
            &ProbeOptions::default(),
        );
        assert!(matches!(result, Err(ProbeError::SingularMatrix { .. })));
    }

    #[test]
    fn test_flatten_corners_order() {
        let corners = flatten_corners((3, 2), &Affine4x4::identity());
        assert_eq!(
            corners,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 2.0, 1.0, 0.0, 2.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_voxel_index_clamps_to_i32() {
        assert_eq!(voxel_index_i32(&[1, -2, i64::MAX]), vec![1, -2, i32::MAX]);
    }
}

/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_xy_to_ijk_default_options() {
        let identity: Vec<f64> = dataprobe_core::Affine4x4::identity().to_row_major().to_vec();
        let result = xy_to_ijk(&identity, &identity, None, None, JsValue::UNDEFINED).unwrap();
        assert_eq!(result, identity);
    }

    #[wasm_bindgen_test]
    fn test_xy_to_ijk_singular_throws() {
        let identity: Vec<f64> = dataprobe_core::Affine4x4::identity().to_row_major().to_vec();
        let result = xy_to_ijk(
            &identity,
            &identity,
            Some(vec![0.0; 16]),
            Some(identity.clone()),
            JsValue::UNDEFINED,
        );
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_apply_affine_wrong_length() {
        assert!(apply_affine(&[1.0; 4], 0.0, 0.0, 0.0).is_err());
    }
}
