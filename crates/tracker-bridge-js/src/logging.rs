//! Console logging for the bridge.

use std::sync::Once;

use tracing::Level;
use tracing::subscriber::set_global_default;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use wasm_bindgen::prelude::*;

static INIT: Once = Once::new();

fn parse_level(level: &str) -> Option<Level> {
    match level.to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Route bridge logs to the browser console.
///
/// `level` is one of `error`, `warn`, `info` (default), `debug`, `trace`.
/// Only the first call installs a subscriber; later calls are ignored.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    let requested = level.as_deref().unwrap_or("info");
    let level = parse_level(requested)
        .ok_or_else(|| JsError::new(&format!("unknown log level: {requested}")))?;

    INIT.call_once(|| {
        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(level)
                .build(),
        );
        let filter = EnvFilter::default().add_directive(LevelFilter::from_level(level).into());

        let reg = Registry::default().with(filter).with(wasm_layer);
        let _ = set_global_default(reg);
        tracing::debug!(%level, "logging initialized");
    });
    Ok(())
}
