//! Dataprobe Core - computations behind the data probe readout
//!
//! This crate provides the host-independent pieces of a medical image data
//! probe: mapping a cursor between screen (XY), patient (RAS) and voxel (IJK)
//! frames, deriving scalar invariants from diffusion tensors, formatting the
//! readout text, and rendering the magnified and overview thumbnails.
//!
//! All functions are pure and take plain values (row-major matrices, points,
//! tensor components) rather than host scene objects, so they can be called
//! from any thread.

pub mod error;
pub mod readout;
pub mod render;
pub mod tensor;
pub mod transform;

pub use error::{ProbeError, Result};
pub use tensor::{compute_invariant, Invariant, Tensor3x3Sym};
pub use transform::{
    apply_affine, compute_xy_to_ijk, corners_in_frame, round_to_index, Affine4x4, Point3,
    VoxelIndex,
};

/// Tunables for the probe computations.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProbeOptions {
    /// Determinant magnitude below which a matrix is not inverted.
    pub singular_epsilon: f64,
    /// Invariant shown for tensor volumes that do not select one.
    pub default_invariant: Invariant,
    /// Magnification of the cursor thumbnail.
    pub magnifier_zoom: f64,
    /// Maximum characters of a layer name in the readout.
    pub name_size: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            singular_epsilon: transform::SINGULAR_EPSILON,
            default_invariant: Invariant::default(),
            magnifier_zoom: render::DEFAULT_ZOOM,
            name_size: 24,
        }
    }
}

impl ProbeOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected invariant, or the configured default when none is selected.
    pub fn invariant_or_default(&self, selected: Option<Invariant>) -> Invariant {
        selected.unwrap_or(self.default_invariant)
    }

    /// XY->IJK using the configured singularity threshold.
    pub fn xy_to_ijk(
        &self,
        xy_to_ras: &Affine4x4,
        ras_to_ijk: &Affine4x4,
        ijk_to_ras: Option<&Affine4x4>,
        parent_to_world: Option<&Affine4x4>,
    ) -> Result<Affine4x4> {
        transform::compute_xy_to_ijk_with_epsilon(
            xy_to_ras,
            ras_to_ijk,
            ijk_to_ras,
            parent_to_world,
            self.singular_epsilon,
        )
    }

    /// Layer name shortened to `name_size`.
    pub fn fit_name(&self, name: &str) -> String {
        readout::fit_name(name, self.name_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = ProbeOptions::new();
        assert_eq!(options.singular_epsilon, 1e-10);
        assert_eq!(options.default_invariant, Invariant::FractionalAnisotropy);
        assert_eq!(options.magnifier_zoom, 10.0);
        assert_eq!(options.name_size, 24);
    }

    #[test]
    fn test_invariant_or_default() {
        let mut options = ProbeOptions::new();
        assert_eq!(options.invariant_or_default(None), Invariant::FractionalAnisotropy);
        assert_eq!(options.invariant_or_default(Some(Invariant::Trace)), Invariant::Trace);

        options.default_invariant = Invariant::MeanDiffusivity;
        assert_eq!(options.invariant_or_default(None), Invariant::MeanDiffusivity);
    }

    #[test]
    fn test_xy_to_ijk_respects_epsilon() {
        let tiny = Affine4x4::from_scale(1e-4, 1e-4, 1e-4);
        let identity = Affine4x4::identity();

        let strict = ProbeOptions::new();
        assert!(strict
            .xy_to_ijk(&identity, &identity, Some(&tiny), Some(&identity))
            .is_err());

        let mut loose = ProbeOptions::new();
        loose.singular_epsilon = 1e-14;
        assert!(loose
            .xy_to_ijk(&identity, &identity, Some(&tiny), Some(&identity))
            .is_ok());
    }

    #[test]
    fn test_fit_name_uses_configured_size() {
        let mut options = ProbeOptions::new();
        options.name_size = 10;
        assert_eq!(options.fit_name("abcdefghijklmnop"), "abcde...op");
    }

    #[test]
    fn test_end_to_end_xy_to_ijk() {
        let xy_to_ras = Affine4x4::from_scale(2.0, 1.0, 0.0);
        let xy_to_ijk = compute_xy_to_ijk(&xy_to_ras, &Affine4x4::identity(), None, None).unwrap();
        let ijk = apply_affine(&xy_to_ijk, Point3::new(10.0, 20.0, 0.0));
        assert_eq!(ijk, Point3::new(20.0, 20.0, 0.0));
        assert_eq!(ijk.to_voxel_index(), VoxelIndex([20, 20, 0]));
    }
}
