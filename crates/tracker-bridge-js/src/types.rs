//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use tracker_bridge_core::{BridgeConfig, FocusPolicy, PlaceholderStyle, ScrollDispatch};

/// Partial bridge configuration. Omitted fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsBridgeConfig {
    /// Id of the hidden client-id input (default `"ts1-client-id"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id_input_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Script path resolved against the page base (default `"tracker.js"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_path: Option<String>,
    /// Attribute carrying the placeholder id; must start with `data-`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_attribute: Option<String>,
    /// Extra px added when the body is grown to fit a scroll offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_padding: Option<f64>,
    #[tsify(type = "\"windowOnly\" | \"windowAndDocument\"")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_dispatch: Option<ScrollDispatch>,
    #[tsify(type = "\"emulatePointer\" | \"native\"")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_policy: Option<FocusPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<JsPlaceholderStyle>,
}

/// Placeholder inline style overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsPlaceholderStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl From<JsPlaceholderStyle> for PlaceholderStyle {
    fn from(js: JsPlaceholderStyle) -> Self {
        let defaults = PlaceholderStyle::default();
        Self {
            z_index: js.z_index.unwrap_or(defaults.z_index),
            opacity: js.opacity.unwrap_or(defaults.opacity),
            size: js.size.unwrap_or(defaults.size),
        }
    }
}

impl From<JsBridgeConfig> for BridgeConfig {
    fn from(js: JsBridgeConfig) -> Self {
        let defaults = BridgeConfig::default();
        Self {
            client_id_input_id: js.client_id_input_id.unwrap_or(defaults.client_id_input_id),
            client_id: js.client_id.unwrap_or(defaults.client_id),
            tracker_path: js.tracker_path.unwrap_or(defaults.tracker_path),
            trace_attribute: js.trace_attribute.unwrap_or(defaults.trace_attribute),
            body_padding: js.body_padding.unwrap_or(defaults.body_padding),
            scroll_dispatch: js.scroll_dispatch.unwrap_or(defaults.scroll_dispatch),
            focus_policy: js.focus_policy.unwrap_or(defaults.focus_policy),
            placeholder: js
                .placeholder
                .map(PlaceholderStyle::from)
                .unwrap_or(defaults.placeholder),
        }
    }
}
