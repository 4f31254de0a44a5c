//! Bridge configuration.

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Where `scroll` events are dispatched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollDispatch {
    /// Window only.
    WindowOnly,
    /// Window, then document, for trackers that listen on either.
    #[default]
    WindowAndDocument,
}

/// How `set_focus` realizes a focus change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FocusPolicy {
    /// Synthetic mousedown/mouseup/click, then synthetic focus events.
    /// Many trackers only arm focus tracking after a pointer interaction.
    #[default]
    EmulatePointer,
    /// Native `focus()` / `blur()` on the placeholder.
    Native,
}

/// Inline style applied to placeholder elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaceholderStyle {
    pub z_index: i32,
    pub opacity: f64,
    /// Width and height in px.
    pub size: f64,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            z_index: 99999,
            opacity: 0.01,
            size: 10.0,
        }
    }
}

impl PlaceholderStyle {
    /// CSS declarations, in the order they are applied.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "fixed".to_string()),
            ("z-index", self.z_index.to_string()),
            ("opacity", self.opacity.to_string()),
            ("pointer-events", "none".to_string()),
            ("width", format!("{}px", self.size)),
            ("height", format!("{}px", self.size)),
        ]
    }
}

/// Fixed identifiers and policies for a bridge instance.
///
/// Every field has a default, so hosts can supply a partial object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Id of the hidden input carrying the client id.
    pub client_id_input_id: String,
    /// Value of the hidden client-id input.
    pub client_id: String,
    /// Tracker script path, resolved against `<base>` or the page origin.
    pub tracker_path: String,
    /// Attribute carrying the logical id on each placeholder.
    pub trace_attribute: String,
    /// Extra px added when growing the body's `min-height`.
    pub body_padding: f64,
    pub scroll_dispatch: ScrollDispatch,
    pub focus_policy: FocusPolicy,
    pub placeholder: PlaceholderStyle,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            client_id_input_id: "ts1-client-id".to_owned(),
            client_id: "123".to_owned(),
            tracker_path: "tracker.js".to_owned(),
            trace_attribute: "data-ts1-id".to_owned(),
            body_padding: 200.0,
            scroll_dispatch: ScrollDispatch::default(),
            focus_policy: FocusPolicy::default(),
            placeholder: PlaceholderStyle::default(),
        }
    }
}

impl BridgeConfig {
    /// Check the config for values the DOM would reject or misinterpret.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.tracker_path.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "trackerPath must not be empty".into(),
            ));
        }
        if self.client_id_input_id.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "clientIdInputId must not be empty".into(),
            ));
        }
        if !self.trace_attribute.starts_with("data-") {
            return Err(BridgeError::InvalidConfig(format!(
                "traceAttribute must be a data- attribute, got {:?}",
                self.trace_attribute
            )));
        }
        if !(0.0..=1.0).contains(&self.placeholder.opacity) {
            return Err(BridgeError::InvalidConfig(format!(
                "placeholder opacity must be within [0, 1], got {}",
                self.placeholder.opacity
            )));
        }
        if !self.body_padding.is_finite() || self.body_padding < 0.0 {
            return Err(BridgeError::InvalidConfig(format!(
                "bodyPadding must be a non-negative number, got {}",
                self.body_padding
            )));
        }
        Ok(())
    }
}
