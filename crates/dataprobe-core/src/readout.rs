//! Text for the probe readout panel.
//!
//! These helpers turn already-computed values into the strings the panel
//! shows. They take plain values extracted from the host (names, dimensions,
//! voxel samples) and never touch host objects.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tensor::{compute_invariant, Invariant};
use crate::transform::{Point3, VoxelIndex};

/// Shorten `name` to at most `size` characters by keeping its head and tail
/// around an ellipsis.
///
/// The head keeps `size / 2` characters and the tail `size / 2 - 3`.
pub fn fit_name(name: &str, size: usize) -> String {
    let len = name.chars().count();
    if len <= size {
        return name.to_string();
    }
    let head = size / 2;
    let tail = head.saturating_sub(3);
    let prefix: String = name.chars().take(head).collect();
    let suffix: String = name.chars().skip(len - tail).collect();
    format!("{prefix}...{suffix}")
}

/// `"(  i,   j,   k)"` with each index right-aligned in 3 columns.
pub fn format_ijk(index: VoxelIndex) -> String {
    let [i, j, k] = index.0;
    format!("({i:3}, {j:3}, {k:3})")
}

/// Six decimals with trailing zeros and a dangling decimal point removed.
///
/// `5.0` becomes `"5"`, `0.25` becomes `"0.25"`.
pub fn format_component(value: f64) -> String {
    // Negative zero prints as "0".
    let value = if value == 0.0 { 0.0 } else { value };
    let text = format!("{value:4.6}");
    if !value.is_finite() {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// What a layer holds at the probed voxel.
#[derive(Debug, Clone, PartialEq)]
pub enum VoxelSample {
    /// Label map value with its color-table name, if any.
    Label { name: Option<String>, index: i64 },
    /// Diffusion tensor components and the invariant selected for display.
    Tensor {
        components: Vec<f64>,
        invariant: Invariant,
    },
    /// Scalar components of an ordinary volume.
    Scalar(Vec<f64>),
}

/// Readout text for a layer's voxel value.
///
/// # Errors
///
/// Propagates `ProbeError::InvalidTensor` for a malformed tensor sample.
pub fn describe_voxel(
    index: VoxelIndex,
    dims: [usize; 3],
    sample: &VoxelSample,
) -> Result<String> {
    if !index.in_frame(dims) {
        return Ok("Out of Frame".to_string());
    }

    let text = match sample {
        VoxelSample::Label { name, index } => {
            format!("{} ({})", name.as_deref().unwrap_or("Unknown"), index)
        }
        VoxelSample::Tensor {
            components,
            invariant,
        } => match compute_invariant(components, *invariant)? {
            Some(value) => format!("{} {}", invariant, format_component(value)),
            None => invariant.to_string(),
        },
        VoxelSample::Scalar(components) if components.len() > 3 => {
            format!("{} components", components.len())
        }
        VoxelSample::Scalar(components) => components
            .iter()
            .map(|&c| format_component(c))
            .collect::<Vec<_>>()
            .join(", "),
    };
    Ok(text)
}

/// Axis labels of a slice view, negative then positive direction for each of
/// the R, A and S axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels(pub [String; 6]);

impl Default for AxisLabels {
    fn default() -> Self {
        Self(["L", "R", "P", "A", "I", "S"].map(String::from))
    }
}

impl AxisLabels {
    /// Label for `axis` (0 = R, 1 = A, 2 = S) given the coordinate's sign.
    /// Zero counts as positive.
    pub fn for_value(&self, axis: usize, value: f64) -> &str {
        let offset = if value >= 0.0 { 1 } else { 0 };
        &self.0[axis * 2 + offset]
    }
}

/// Slice view properties shown in the view line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceViewInfo {
    /// Layout name, e.g. "Red".
    pub layout_name: String,
    /// Orientation, e.g. "Axial".
    pub orientation: String,
    pub axis_labels: AxisLabels,
    /// Slice spacing along the view normal, in mm.
    pub spacing: f64,
    /// True when the spacing is prescribed rather than derived from volumes.
    pub prescribed_spacing: bool,
}

impl Default for SliceViewInfo {
    fn default() -> Self {
        Self {
            layout_name: String::new(),
            orientation: String::new(),
            axis_labels: AxisLabels::default(),
            spacing: 1.0,
            prescribed_spacing: false,
        }
    }
}

/// One-line description of the cursor position in a slice view.
///
/// RAS components are printed as absolute values with the axis label for
/// their sign, e.g. `"  Red       (R 12.3, P 4.0, S 7.5)     Axial Sp: 1.0"`.
pub fn describe_view(view: &SliceViewInfo, ras: Point3) -> String {
    let mut spacing = format!("{:.1}", view.spacing);
    if view.prescribed_spacing {
        spacing = format!("({spacing})");
    }
    let labels = &view.axis_labels;
    format!(
        "  {:<8}  ({} {:3.1}, {} {:3.1}, {} {:3.1})  {:>8} Sp: {}",
        view.layout_name,
        labels.for_value(0, ras.x),
        ras.x.abs(),
        labels.for_value(1, ras.y),
        ras.y.abs(),
        labels.for_value(2, ras.z),
        ras.z.abs(),
        view.orientation,
        spacing
    )
}
