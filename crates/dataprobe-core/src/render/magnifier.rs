//! Magnified view of the slice around the cursor.
//!
//! The slice image is the blended RGB output of a slice view in display
//! orientation (row 0 at the top). The cursor is in the XY frame, whose y
//! axis points up, so window rows are flipped before cropping.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{ProbeError, Result};
use crate::transform::{round_to_index, Point3};

/// Default magnification of the thumbnail.
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Inclusive pixel window of the slice in XY coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagnifierWindow {
    pub i_min: u32,
    pub i_max: u32,
    pub j_min: u32,
    pub j_max: u32,
}

impl MagnifierWindow {
    /// Window centred on `cursor_xy` for a `(width, height)` slice.
    ///
    /// The half size is `round(min(width, height) / zoom / 2)` and the window
    /// is clamped to the slice. Returns `None` when nothing of the window
    /// overlaps the slice.
    pub fn around(cursor_xy: Point3, dimensions: (u32, u32), zoom: f64) -> Option<Self> {
        let (width, height) = dimensions;
        if width == 0 || height == 0 {
            return None;
        }

        let x = round_to_index(cursor_xy.x);
        let y = round_to_index(cursor_xy.y);
        let half = round_to_index(width.min(height) as f64 / zoom / 2.0);

        // Saturate so an extreme but finite cursor lands off the slice.
        let i_min = x.saturating_sub(half).max(0);
        let i_max = x.saturating_add(half).min(width as i64 - 1);
        let j_min = y.saturating_sub(half).max(0);
        let j_max = y.saturating_add(half).min(height as i64 - 1);

        if i_min > i_max || j_min > j_max {
            return None;
        }
        Some(Self {
            i_min: i_min as u32,
            i_max: i_max as u32,
            j_min: j_min as u32,
            j_max: j_max as u32,
        })
    }

    pub fn width(&self) -> u32 {
        self.i_max - self.i_min + 1
    }

    pub fn height(&self) -> u32 {
        self.j_max - self.j_min + 1
    }
}

/// Wrap a raw RGB buffer, checking its length against the dimensions.
pub fn rgb_image_from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<RgbImage> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .unwrap_or(usize::MAX);
    let actual = pixels.len();
    RgbImage::from_raw(width, height, pixels).ok_or(ProbeError::InvalidImage {
        width,
        height,
        expected,
        actual,
    })
}

/// Largest size with the aspect ratio of `source` that fits in `bounds`.
fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (source.0 as u64, source.1 as u64);
    let (bw, bh) = (bounds.0 as u64, bounds.1 as u64);
    let (w, h) = if bw * sh <= bh * sw {
        (bw, bw * sh / sw)
    } else {
        (bh * sw / sh, bh)
    };
    (w.max(1) as u32, h.max(1) as u32)
}

/// Render the magnified thumbnail.
///
/// Crops the [`MagnifierWindow`] around `cursor_xy`, scales it to fit
/// `output` with nearest-neighbour sampling (keeping the aspect ratio), and
/// draws a one pixel crosshair through the centre in `crosshair`.
///
/// Returns `None` when the cursor window misses the slice or `output` is
/// empty.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(slice)))]
pub fn render_magnified(
    slice: &RgbImage,
    cursor_xy: Point3,
    output: (u32, u32),
    zoom: f64,
    crosshair: Rgb<u8>,
) -> Option<RgbImage> {
    if output.0 == 0 || output.1 == 0 {
        return None;
    }
    let (width, height) = slice.dimensions();
    let window = MagnifierWindow::around(cursor_xy, (width, height), zoom)?;

    // XY rows count up from the bottom; image rows count down from the top.
    let top = height - 1 - window.j_max;
    let cropped = imageops::crop_imm(slice, window.i_min, top, window.width(), window.height())
        .to_image();

    let (out_w, out_h) = fit_within((window.width(), window.height()), output);
    let mut magnified = imageops::resize(&cropped, out_w, out_h, FilterType::Nearest);

    let (cx, cy) = (out_w / 2, out_h / 2);
    for x in 0..out_w {
        magnified.put_pixel(x, cy, crosshair);
    }
    for y in 0..out_h {
        magnified.put_pixel(cx, y, crosshair);
    }

    Some(magnified)
}
