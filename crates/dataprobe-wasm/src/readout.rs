//! WASM bindings for readout text.

use dataprobe_core::readout::{self, SliceViewInfo, VoxelSample};
use dataprobe_core::tensor::UnknownInvariant;
use dataprobe_core::{Point3, ProbeOptions, VoxelIndex};
use wasm_bindgen::prelude::*;

use crate::tensor::parse_operation;
use crate::types::{options_from_js, to_js_error};

/// Shorten a layer or scene name to the options' `name_size` characters.
#[wasm_bindgen]
pub fn fit_name(name: &str, options: JsValue) -> Result<String, JsValue> {
    Ok(options_from_js(options)?.fit_name(name))
}

/// `"(  i,   j,   k)"` text for a voxel index.
#[wasm_bindgen]
pub fn format_ijk(i: i32, j: i32, k: i32) -> String {
    readout::format_ijk(VoxelIndex([i as i64, j as i64, k as i64]))
}

/// One-line view description.
///
/// `view` is an object with `layout_name`, `orientation`, `axis_labels`
/// (six strings), `spacing` and `prescribed_spacing`; missing fields take
/// defaults.
#[wasm_bindgen]
pub fn describe_view(view: JsValue, r: f64, a: f64, s: f64) -> Result<String, JsValue> {
    let view: SliceViewInfo = serde_wasm_bindgen::from_value(view)
        .map_err(|e| JsValue::from_str(&format!("Invalid view info: {}", e)))?;
    Ok(readout::describe_view(&view, Point3::new(r, a, s)))
}

/// Readout text for scalar voxel components.
///
/// `dims` are the volume dimensions `[i, j, k]`.
#[wasm_bindgen]
pub fn describe_scalar_voxel(
    ijk: &[i32],
    dims: &[u32],
    components: Vec<f64>,
) -> Result<String, JsValue> {
    describe(ijk, dims, &VoxelSample::Scalar(components))
}

/// Readout text for a label voxel.
#[wasm_bindgen]
pub fn describe_label_voxel(
    ijk: &[i32],
    dims: &[u32],
    label: i32,
    name: Option<String>,
) -> Result<String, JsValue> {
    describe(
        ijk,
        dims,
        &VoxelSample::Label {
            name,
            index: label as i64,
        },
    )
}

/// Readout text for a tensor voxel.
///
/// `operation` defaults to the options' `default_invariant`.
#[wasm_bindgen]
pub fn describe_tensor_voxel(
    ijk: &[i32],
    dims: &[u32],
    tensor: Vec<f64>,
    operation: Option<String>,
    options: JsValue,
) -> Result<String, JsValue> {
    let options = options_from_js(options)?;
    let sample = tensor_sample(tensor, operation.as_deref(), &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    describe(ijk, dims, &sample)
}

fn tensor_sample(
    components: Vec<f64>,
    operation: Option<&str>,
    options: &ProbeOptions,
) -> Result<VoxelSample, UnknownInvariant> {
    Ok(VoxelSample::Tensor {
        components,
        invariant: parse_operation(operation, options)?,
    })
}

fn describe(ijk: &[i32], dims: &[u32], sample: &VoxelSample) -> Result<String, JsValue> {
    let (index, dims) =
        index_and_dims(ijk, dims).ok_or_else(|| JsValue::from_str("ijk and dims need 3 values"))?;
    readout::describe_voxel(index, dims, sample).map_err(to_js_error)
}

fn index_and_dims(ijk: &[i32], dims: &[u32]) -> Option<(VoxelIndex, [usize; 3])> {
    match (ijk, dims) {
        ([i, j, k], [di, dj, dk]) => Some((
            VoxelIndex([*i as i64, *j as i64, *k as i64]),
            [*di as usize, *dj as usize, *dk as usize],
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataprobe_core::tensor::Invariant;

    const ISOTROPIC: [f64; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

    fn describe_native(sample: &VoxelSample) -> String {
        readout::describe_voxel(VoxelIndex([0, 0, 0]), [2, 2, 2], sample).unwrap()
    }

    #[test]
    fn test_tensor_sample_default_invariant() {
        let sample = tensor_sample(ISOTROPIC.to_vec(), None, &ProbeOptions::default()).unwrap();
        assert_eq!(describe_native(&sample), "FractionalAnisotropy 0");
    }

    #[test]
    fn test_tensor_sample_configured_invariant_changes_readout() {
        let mut options = ProbeOptions::default();
        options.default_invariant = Invariant::Trace;
        let sample = tensor_sample(ISOTROPIC.to_vec(), None, &options).unwrap();
        assert_eq!(describe_native(&sample), "Trace 3");

        let named = tensor_sample(ISOTROPIC.to_vec(), Some("MaxEigenvalue"), &options).unwrap();
        assert_eq!(describe_native(&named), "MaxEigenvalue 1");
    }

    #[test]
    fn test_tensor_sample_unknown_operation() {
        let options = ProbeOptions::default();
        assert!(tensor_sample(ISOTROPIC.to_vec(), Some("Bogus"), &options).is_err());
    }

    #[test]
    fn test_format_ijk() {
        assert_eq!(format_ijk(1, 2, 3), "(  1,   2,   3)");
    }

    #[test]
    fn test_index_and_dims() {
        let (index, dims) = index_and_dims(&[1, 2, 3], &[4, 5, 6]).unwrap();
        assert_eq!(index, VoxelIndex([1, 2, 3]));
        assert_eq!(dims, [4, 5, 6]);
        assert!(index_and_dims(&[1, 2], &[4, 5, 6]).is_none());
    }
}
