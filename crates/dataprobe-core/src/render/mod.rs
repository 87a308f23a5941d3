//! Thumbnails shown next to the readout.
//!
//! - **Magnifier**: a zoomed crop of the slice under the cursor with a
//!   crosshair, rendered with the `image` crate
//! - **Preview**: geometry for the overview thumbnail (visible-region outline
//!   and click-to-recenter)

mod magnifier;
mod preview;

pub use magnifier::{rgb_image_from_raw, render_magnified, MagnifierWindow, DEFAULT_ZOOM};
pub use preview::{preview_polygon, recenter_origin_from_preview};

// Image types used in the rendering signatures.
pub use image::{Rgb, RgbImage};
