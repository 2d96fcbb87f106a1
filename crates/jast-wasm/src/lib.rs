//! WASM bindings for jast-core.
//!
//! Exposes `compact` and `check` as `#[wasm_bindgen]` functions that can be
//! called from JavaScript/TypeScript. The value tree itself stays on the Rust
//! side; JavaScript sees JSON text in and out.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p jast-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/jast-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/jast_wasm.wasm
//! ```

use jast_core::{Decoder, Mode};
use wasm_bindgen::prelude::*;

/// Decode `json` and re-encode it compactly.
///
/// In lenient mode a malformed document returns `undefined` instead of
/// throwing. In strict mode malformed input throws a JS error carrying the
/// line/column diagnostic.
#[wasm_bindgen]
pub fn compact(json: &str, lenient: bool) -> std::result::Result<Option<String>, JsValue> {
    let mode = if lenient { Mode::Lenient } else { Mode::Strict };
    let value = Decoder::new()
        .with_mode(mode)
        .decode(json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    if value.is_nothing() {
        return Ok(None);
    }
    jast_core::encode(&value)
        .map(Some)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Strictly validate `json`. Returns the error message, or `undefined` when
/// the document is well formed.
#[wasm_bindgen]
pub fn check(json: &str) -> Option<String> {
    jast_core::decode(json).err().map(|e| e.to_string())
}
