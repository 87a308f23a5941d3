//! Browser console diagnostics.
//!
//! Imported JS functions cannot be called on native targets, so outside
//! wasm32 these are no-ops and the bindings stay testable with `cargo test`.

use std::fmt::Display;

/// Log at debug level, prefixed with the binding name.
pub(crate) fn debug(context: &str, message: impl Display) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&wasm_bindgen::JsValue::from_str(&format!(
        "[dataprobe] {context}: {message}"
    )));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (context, message);
}
