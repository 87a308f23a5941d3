//! WASM bindings for the magnifier and overview preview.

use dataprobe_core::render::{self, Rgb};
use dataprobe_core::{Point3, ProbeError};
use wasm_bindgen::prelude::*;

use crate::types::{matrix, optional_matrix, options_from_js, to_js_error, JsRgbImage};

/// Render the magnified cursor thumbnail.
///
/// # Arguments
///
/// * `slice` - Blended slice view image, row 0 at the top
/// * `x`, `y` - Cursor in slice XY pixels (y up)
/// * `out_width`, `out_height` - Size of the thumbnail area
/// * `crosshair` - `[r, g, b]` of the crosshair lines
/// * `options` - Probe options (`magnifier_zoom`), or `undefined`
///
/// # Returns
///
/// The thumbnail, or `undefined` when the cursor is off the slice.
#[wasm_bindgen]
pub fn magnify(
    slice: &JsRgbImage,
    x: f64,
    y: f64,
    out_width: u32,
    out_height: u32,
    crosshair: &[u8],
    options: JsValue,
) -> Result<Option<JsRgbImage>, JsValue> {
    let options = options_from_js(options)?;
    magnify_with_zoom(
        slice,
        Point3::new(x, y, 0.0),
        (out_width, out_height),
        crosshair,
        options.magnifier_zoom,
    )
    .map_err(to_js_error)
}

pub(crate) fn magnify_with_zoom(
    slice: &JsRgbImage,
    cursor_xy: Point3,
    output: (u32, u32),
    crosshair: &[u8],
    zoom: f64,
) -> Result<Option<JsRgbImage>, ProbeError> {
    let image = slice.to_rgb()?;
    let color = match crosshair {
        [r, g, b, ..] => Rgb([*r, *g, *b]),
        _ => Rgb([255, 255, 255]),
    };
    Ok(render::render_magnified(&image, cursor_xy, output, zoom, color).map(JsRgbImage::from_rgb))
}

/// Outline of the slice view in the overview thumbnail.
///
/// `ijk_corners` is the 12-value output of `view_corners` with the XY->IJK
/// matrix. Returns 8 values (`i, j` per corner, row 0 at the top) or
/// `undefined` for an empty preview.
#[wasm_bindgen]
pub fn preview_polygon(
    ijk_corners: &[f64],
    volume_height_j: u32,
    preview_width: u32,
    preview_height: u32,
) -> Result<Option<Vec<u32>>, JsValue> {
    polygon(ijk_corners, volume_height_j, (preview_width, preview_height))
        .ok_or_else(|| JsValue::from_str("ijk_corners needs 12 values"))
}

fn polygon(
    ijk_corners: &[f64],
    volume_height_j: u32,
    preview: (u32, u32),
) -> Option<Option<Vec<u32>>> {
    if ijk_corners.len() != 12 {
        return None;
    }
    let corners: [Point3; 4] = std::array::from_fn(|c| {
        Point3::new(
            ijk_corners[c * 3],
            ijk_corners[c * 3 + 1],
            ijk_corners[c * 3 + 2],
        )
    });
    Some(
        render::preview_polygon(&corners, volume_height_j, preview)
            .map(|points| points.iter().flat_map(|&(i, j)| [i, j]).collect()),
    )
}

/// New slice XYZ origin after a click at (`x`, `y`) on the preview.
///
/// Returns `[x, y, z]`, or `undefined` for a zero-height preview.
#[wasm_bindgen]
pub fn recenter_from_preview(
    x: f64,
    y: f64,
    preview_height: u32,
    volume_height_j: u32,
    ijk_to_ras: &[f64],
    parent_to_world: Option<Vec<f64>>,
    slice_to_ras: &[f64],
) -> Result<Option<Vec<f64>>, JsValue> {
    let ijk_to_ras = matrix(ijk_to_ras).map_err(to_js_error)?;
    let parent = optional_matrix(parent_to_world.as_deref()).map_err(to_js_error)?;
    let slice_to_ras = matrix(slice_to_ras).map_err(to_js_error)?;

    Ok(render::recenter_origin_from_preview(
        (x, y),
        preview_height,
        volume_height_j,
        &ijk_to_ras,
        parent.as_ref(),
        &slice_to_ras,
    )
    .map(|origin| origin.to_array().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_slice(width: u32, height: u32) -> JsRgbImage {
        JsRgbImage::new(width, height, vec![40u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_magnify_dimensions() {
        let slice = gray_slice(100, 100);
        let cursor = Point3::new(50.0, 50.0, 0.0);
        let out = magnify_with_zoom(&slice, cursor, (44, 44), &[0, 255, 0], 10.0)
            .unwrap()
            .unwrap();
        assert_eq!(out.width(), 44);
        assert_eq!(out.height(), 44);
        // crosshair pixel at the centre row
        let px = &out.pixels()[((22 * 44) * 3) as usize..((22 * 44) * 3 + 3) as usize];
        assert_eq!(px, &[0, 255, 0]);
    }

    #[test]
    fn test_magnify_off_slice() {
        let slice = gray_slice(10, 10);
        let cursor = Point3::new(-40.0, 0.0, 0.0);
        let out = magnify_with_zoom(&slice, cursor, (20, 20), &[], 10.0).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_magnify_extreme_cursor() {
        let slice = gray_slice(10, 10);
        let cursor = Point3::new(1e30, -1e30, 0.0);
        let out = magnify_with_zoom(&slice, cursor, (20, 20), &[], 10.0).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_magnify_bad_buffer() {
        let slice = JsRgbImage::new(10, 10, vec![0; 5]);
        let result = magnify_with_zoom(&slice, Point3::default(), (20, 20), &[], 10.0);
        assert!(matches!(result, Err(ProbeError::InvalidImage { .. })));
    }

    #[test]
    fn test_polygon_flattened() {
        let corners = [
            0.0, 0.0, 0.0, //
            0.0, 9.0, 0.0, //
            9.0, 9.0, 0.0, //
            9.0, 0.0, 0.0,
        ];
        let flat = polygon(&corners, 10, (10, 10)).unwrap().unwrap();
        assert_eq!(flat, vec![0, 9, 0, 0, 9, 0, 9, 9]);
    }

    #[test]
    fn test_polygon_wrong_length() {
        assert!(polygon(&[0.0; 11], 10, (10, 10)).is_none());
        assert_eq!(polygon(&[0.0; 12], 0, (10, 10)), Some(None));
    }
}
