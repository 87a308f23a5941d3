//! WASM bindings for diffusion tensor invariants.

use dataprobe_core::tensor::{compute_invariant, Invariant, UnknownInvariant};
use dataprobe_core::ProbeOptions;
use wasm_bindgen::prelude::*;

use crate::types::{options_from_js, to_js_error};

/// Compute a scalar invariant of a diffusion tensor.
///
/// # Arguments
///
/// * `tensor` - 9 row-major components (xx, xy, xz, yx, yy, yz, zx, zy, zz)
/// * `operation` - Invariant name such as `"Trace"`; `undefined` selects the
///   options' `default_invariant` (fractional anisotropy by default)
/// * `options` - Probe options object, or `undefined` for defaults
///
/// # Returns
///
/// The value, or `undefined` when the invariant is not defined for this
/// tensor. Throws for a tensor without exactly 9 components or an unknown
/// operation name.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const tensor = new Float64Array([1, 0, 0, 0, 0, 0, 0, 0, 0]);
/// const fa = tensor_invariant(tensor, undefined, undefined);
/// ```
#[wasm_bindgen]
pub fn tensor_invariant(
    tensor: &[f64],
    operation: Option<String>,
    options: JsValue,
) -> Result<Option<f64>, JsValue> {
    let options = options_from_js(options)?;
    let invariant = parse_operation(operation.as_deref(), &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    compute_invariant(tensor, invariant).map_err(to_js_error)
}

/// Resolve an operation name, falling back to the configured default.
pub(crate) fn parse_operation(
    operation: Option<&str>,
    options: &ProbeOptions,
) -> Result<Invariant, UnknownInvariant> {
    let selected = operation.map(str::parse).transpose()?;
    Ok(options.invariant_or_default(selected))
}

/// Names accepted by `tensor_invariant`.
#[wasm_bindgen]
pub fn invariant_names() -> Vec<String> {
    Invariant::ALL.iter().map(|i| i.to_string()).collect()
}

/// Name of the host's numeric tensor operation code, if it has a scalar
/// counterpart.
#[wasm_bindgen]
pub fn invariant_name_for_code(code: u32) -> Option<String> {
    Invariant::from_code(code).map(|i| i.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operation_default() {
        let options = ProbeOptions::default();
        assert_eq!(
            parse_operation(None, &options).unwrap(),
            Invariant::FractionalAnisotropy
        );
    }

    #[test]
    fn test_parse_operation_configured_default() {
        let mut options = ProbeOptions::default();
        options.default_invariant = Invariant::MeanDiffusivity;
        assert_eq!(
            parse_operation(None, &options).unwrap(),
            Invariant::MeanDiffusivity
        );
        // An explicit name still wins over the configured default
        assert_eq!(
            parse_operation(Some("Trace"), &options).unwrap(),
            Invariant::Trace
        );
    }

    #[test]
    fn test_parse_operation_by_name() {
        let options = ProbeOptions::default();
        assert_eq!(parse_operation(Some("Trace"), &options).unwrap(), Invariant::Trace);
        assert!(parse_operation(Some("NotAnInvariant"), &options).is_err());
    }

    #[test]
    fn test_invariant_names() {
        let names = invariant_names();
        assert!(names.contains(&"FractionalAnisotropy".to_string()));
        assert_eq!(names.len(), Invariant::ALL.len());
    }

    #[test]
    fn test_invariant_name_for_code() {
        assert_eq!(
            invariant_name_for_code(3),
            Some("FractionalAnisotropy".to_string())
        );
        assert_eq!(invariant_name_for_code(10), None);
    }
}
