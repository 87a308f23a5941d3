//! Dataprobe WASM - WebAssembly bindings for the data probe core
//!
//! This crate exposes the dataprobe-core computations to a JavaScript host
//! that owns the scene, the volumes and the widgets. Everything crosses the
//! boundary as flat arrays: matrices as 16 row-major doubles, points as
//! `[x, y, z]`, tensors as 9 components.
//!
//! # Module Structure
//!
//! - `transform` - XY/RAS/IJK matrix composition and point mapping
//! - `tensor` - Diffusion tensor invariants
//! - `readout` - Readout panel text
//! - `render` - Magnifier thumbnail and overview preview geometry
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { xy_to_ijk, voxel_index, tensor_invariant } from '@dataprobe/wasm';
//!
//! await init();
//!
//! const xyToIjk = xy_to_ijk(xyToRas, rasToIjk, ijkToRas, parentToWorld, undefined);
//! const [i, j, k] = voxel_index(xyToIjk, x, y, 0);
//! ```

use wasm_bindgen::prelude::*;

mod console;
mod readout;
mod render;
mod tensor;
mod transform;
mod types;

// Re-export public types
pub use readout::{
    describe_label_voxel, describe_scalar_voxel, describe_tensor_voxel, describe_view, fit_name,
    format_ijk,
};
pub use render::{magnify, preview_polygon, recenter_from_preview};
pub use tensor::{invariant_name_for_code, invariant_names, tensor_invariant};
pub use transform::{apply_affine, view_corners, voxel_index, xy_to_ijk};
pub use types::JsRgbImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console::debug("init", format!("dataprobe-wasm {}", version()));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default probe options as a plain JS object.
#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&dataprobe_core::ProbeOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_init_is_safe_natively() {
        init();
    }
}
