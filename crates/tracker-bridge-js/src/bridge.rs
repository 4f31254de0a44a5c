//! JsTrackerBridge - the bridge wrapper for JavaScript.

use wasm_bindgen::prelude::*;

use tracker_bridge_browser::{Bridge, BrowserPage, SelectionRange, browser_bridge};
use tracker_bridge_core::{BridgeConfig, BridgeError};

use crate::types::JsBridgeConfig;

/// Global the host looks the bridge up under when no name is given.
pub const DEFAULT_GLOBAL_NAME: &str = "flutterBridge";

/// Log a failed command. The host gets no error back.
fn report(command: &'static str, result: Result<(), BridgeError>) {
    if let Err(e) = result {
        tracing::warn!(command, error = %e, "bridge command failed");
    }
}

/// Bridge instance exposed to JavaScript.
///
/// Commands never throw: failures are logged and the call returns normally.
#[wasm_bindgen(js_name = TrackerBridge)]
pub struct JsTrackerBridge {
    inner: Bridge<BrowserPage>,
}

#[wasm_bindgen(js_class = TrackerBridge)]
impl JsTrackerBridge {
    /// Create a bridge over the current page.
    ///
    /// Throws when there is no window or the config is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsBridgeConfig>) -> Result<JsTrackerBridge, JsError> {
        let config: BridgeConfig = config.map(Into::into).unwrap_or_default();
        let inner = browser_bridge(config).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner })
    }

    // === Commands ===

    /// Intercept scroll reads, add the client-id input, load the tracker.
    #[wasm_bindgen(js_name = initTracker)]
    pub fn init_tracker(&mut self) {
        report("initTracker", self.inner.init_tracker());
    }

    #[wasm_bindgen(js_name = triggerScroll)]
    pub fn trigger_scroll(&mut self, pixels: f64) {
        report("triggerScroll", self.inner.trigger_scroll(pixels));
    }

    #[wasm_bindgen(js_name = triggerUrlChange)]
    pub fn trigger_url_change(&mut self, url: &str) {
        report("triggerUrlChange", self.inner.trigger_url_change(url));
    }

    #[wasm_bindgen(js_name = triggerClick)]
    pub fn trigger_click(&mut self, id: &str, x: f64, y: f64) {
        report("triggerClick", self.inner.trigger_click(id, x, y));
    }

    #[wasm_bindgen(js_name = setFocus)]
    pub fn set_focus(&mut self, id: &str, has_focus: bool) {
        report("setFocus", self.inner.set_focus(id, has_focus));
    }

    /// `text` is the field value after the keystroke; `start`/`end` the
    /// selection to apply, if any.
    #[wasm_bindgen(js_name = typeChar)]
    pub fn type_char(
        &mut self,
        id: &str,
        text: &str,
        ch: &str,
        start: Option<u32>,
        end: Option<u32>,
    ) {
        let selection = SelectionRange::from_parts(start, end);
        report("typeChar", self.inner.type_char(id, text, ch, selection));
    }

    #[wasm_bindgen(js_name = pressBackspace)]
    pub fn press_backspace(&mut self, id: &str, text: &str, start: Option<u32>, end: Option<u32>) {
        let selection = SelectionRange::from_parts(start, end);
        report("pressBackspace", self.inner.press_backspace(id, text, selection));
    }

    #[wasm_bindgen(js_name = updateInput)]
    pub fn update_input(&mut self, id: &str, text: &str, is_backspace: bool) {
        report("updateInput", self.inner.update_input(id, text, is_backspace));
    }

    #[wasm_bindgen(js_name = registerElement)]
    pub fn register_element(&mut self, id: &str) {
        report("registerElement", self.inner.register_element(id));
    }

    // === State ===

    #[wasm_bindgen(getter = virtualScrollY)]
    pub fn virtual_scroll_y(&self) -> f64 {
        self.inner.virtual_scroll_y()
    }

    #[wasm_bindgen(getter = isTrackerLoaded)]
    pub fn is_tracker_loaded(&self) -> bool {
        self.inner.is_tracker_loaded()
    }

    #[wasm_bindgen(getter = isScrollIntercepted)]
    pub fn is_scroll_intercepted(&self) -> bool {
        self.inner.is_scroll_intercepted()
    }

    #[wasm_bindgen(getter = elementCount)]
    pub fn element_count(&self) -> usize {
        self.inner.element_count()
    }
}

/// Create a `TrackerBridge` and publish it as `window[globalName]`.
///
/// If something is already installed under that name it is returned as is
/// and `config` is ignored.
#[wasm_bindgen(js_name = installBridge)]
pub fn install_bridge(
    global_name: Option<String>,
    config: Option<JsBridgeConfig>,
) -> Result<JsValue, JsError> {
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let global = global_name.as_deref().unwrap_or(DEFAULT_GLOBAL_NAME);
    let name = JsValue::from_str(global);

    let existing = js_sys::Reflect::get(&window, &name).unwrap_or(JsValue::UNDEFINED);
    if !existing.is_undefined() && !existing.is_null() {
        tracing::debug!(global, "bridge already installed");
        return Ok(existing);
    }

    let bridge = JsValue::from(JsTrackerBridge::new(config)?);
    js_sys::Reflect::set(&window, &name, &bridge)
        .map_err(|_| JsError::new("could not publish the bridge on window"))?;
    tracing::info!(global, "bridge installed");
    Ok(bridge)
}
