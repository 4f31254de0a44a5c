//! WASM bindings for the tracker bridge.
//!
//! A canvas-rendering host calls into a `TrackerBridge` (usually through
//! `window.flutterBridge`, see `installBridge`) and the bridge turns each
//! call into the DOM events an analytics tracker listens for.

mod bridge;
mod logging;
mod types;

pub use bridge::*;
pub use logging::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
