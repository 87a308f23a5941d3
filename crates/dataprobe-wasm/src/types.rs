//! WASM-compatible wrapper types.
//!
//! Matrices cross the boundary as flat row-major `Float64Array`s and images
//! as RGB byte buffers; this module converts them to core types.

use dataprobe_core::render::{rgb_image_from_raw, RgbImage};
use dataprobe_core::{Affine4x4, ProbeError, ProbeOptions};
use wasm_bindgen::prelude::*;

/// An RGB image for JavaScript.
///
/// Used for the blended slice passed in to `magnify` and for the thumbnail
/// it returns. Pixel data is row-major, 3 bytes per pixel, row 0 at the top.
#[wasm_bindgen]
pub struct JsRgbImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRgbImage {
    /// Create a new JsRgbImage from dimensions and pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRgbImage {
        JsRgbImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsRgbImage {
    pub(crate) fn from_rgb(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to a core image, validating the buffer length.
    pub(crate) fn to_rgb(&self) -> Result<RgbImage, ProbeError> {
        rgb_image_from_raw(self.width, self.height, self.pixels.clone())
    }
}

/// Parse a row-major matrix argument.
pub(crate) fn matrix(values: &[f64]) -> Result<Affine4x4, ProbeError> {
    Affine4x4::from_slice(values)
}

/// Parse an optional row-major matrix argument.
pub(crate) fn optional_matrix(values: Option<&[f64]>) -> Result<Option<Affine4x4>, ProbeError> {
    values.map(Affine4x4::from_slice).transpose()
}

/// Read `ProbeOptions` from a JS object; `undefined` or `null` gives defaults.
pub(crate) fn options_from_js(options: JsValue) -> Result<ProbeOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ProbeOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid probe options: {}", e)))
}

/// Convert a core error for JavaScript.
pub(crate) fn to_js_error(err: ProbeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
