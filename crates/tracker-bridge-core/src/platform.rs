//! Platform abstraction traits for the bridge.
//!
//! These traits define the interface between the bridge logic and a
//! platform-specific document. The browser implementation uses `web_sys`;
//! tests use an in-memory page that records every call.

use crate::config::PlaceholderStyle;
use crate::error::PlatformError;
use crate::events::{
    EventDetail, EventInit, EventName, InputDetail, KeyDetail, MouseDetail, SyntheticEvent,
};

/// Where a synthetic event is dispatched.
#[derive(Debug)]
pub enum DispatchTarget<'a, E> {
    Window,
    Document,
    Element(&'a E),
}

impl<E> Clone for DispatchTarget<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for DispatchTarget<'_, E> {}

impl<E> DispatchTarget<'_, E> {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Document => "document",
            Self::Element(_) => "element",
        }
    }
}

/// Document operations the bridge performs.
///
/// Element handles are cheap to clone (`web_sys` handles are reference
/// counted on the JS side).
pub trait PageDom {
    /// Element handle type.
    type Element: Clone;

    /// Look up an element by its `id` attribute anywhere in the document.
    fn find_element(&self, id: &str) -> Option<Self::Element>;

    /// Tag name as reported by the platform. Case is not significant.
    fn tag_name(&self, element: &Self::Element) -> String;

    /// Detach the element from the document.
    fn remove_element(&self, element: &Self::Element);

    /// Create an element with the given tag and `id`, apply `style`, set
    /// `trace_attribute` to the id, and append it to the body.
    fn create_placeholder(
        &self,
        id: &str,
        tag: &str,
        style: &PlaceholderStyle,
        trace_attribute: &str,
    ) -> Result<Self::Element, PlatformError>;

    /// Move the element to viewport coordinates via `left`/`top`.
    fn set_position(&self, element: &Self::Element, x: f64, y: f64) -> Result<(), PlatformError>;

    /// Set an input element's value.
    fn set_value(&self, element: &Self::Element, value: &str) -> Result<(), PlatformError>;

    /// Apply a selection range to an input element.
    fn set_selection_range(
        &self,
        element: &Self::Element,
        start: u32,
        end: u32,
    ) -> Result<(), PlatformError>;

    /// Append `<input type="hidden" id=.. value=..>` to the body.
    fn create_hidden_input(&self, id: &str, value: &str) -> Result<(), PlatformError>;

    /// `document.body.scrollHeight` in px.
    fn body_scroll_height(&self) -> Result<f64, PlatformError>;

    /// `window.innerHeight` in px.
    fn viewport_height(&self) -> Result<f64, PlatformError>;

    /// Set the body's `min-height` style in px.
    fn set_body_min_height(&self, px: f64) -> Result<(), PlatformError>;

    /// Resolved `href` of the first `<base>` element, if any.
    fn base_href(&self) -> Option<String>;

    /// `window.location.origin`.
    fn origin(&self) -> Result<String, PlatformError>;

    /// Append an async `<script src=..>` to the document head.
    fn inject_script(&self, src: &str) -> Result<(), PlatformError>;

    /// Native focus.
    fn focus(&self, element: &Self::Element) -> Result<(), PlatformError>;

    /// Native blur.
    fn blur(&self, element: &Self::Element) -> Result<(), PlatformError>;
}

/// Constructs and dispatches synthetic events.
pub trait SyntheticEventSink: PageDom {
    /// Dispatch a plain `Event`.
    fn dispatch_plain(
        &self,
        target: DispatchTarget<'_, Self::Element>,
        name: EventName,
        init: EventInit,
    ) -> Result<(), PlatformError>;

    /// Dispatch a `MouseEvent`.
    fn dispatch_mouse(
        &self,
        target: DispatchTarget<'_, Self::Element>,
        name: EventName,
        init: EventInit,
        detail: &MouseDetail,
    ) -> Result<(), PlatformError>;

    /// Dispatch a `FocusEvent`.
    fn dispatch_focus(
        &self,
        target: DispatchTarget<'_, Self::Element>,
        name: EventName,
        init: EventInit,
    ) -> Result<(), PlatformError>;

    /// Dispatch a `KeyboardEvent`.
    fn dispatch_keyboard(
        &self,
        target: DispatchTarget<'_, Self::Element>,
        name: EventName,
        init: EventInit,
        detail: &KeyDetail,
    ) -> Result<(), PlatformError>;

    /// Dispatch an `InputEvent`.
    fn dispatch_input(
        &self,
        target: DispatchTarget<'_, Self::Element>,
        init: EventInit,
        detail: &InputDetail,
    ) -> Result<(), PlatformError>;

    /// Route an event description to the matching dispatch method.
    fn dispatch(
        &self,
        target: DispatchTarget<'_, Self::Element>,
        event: &SyntheticEvent,
    ) -> Result<(), PlatformError> {
        tracing::trace!(event = %event.name, on = target.label(), "dispatch");
        match &event.detail {
            EventDetail::Plain => self.dispatch_plain(target, event.name, event.init),
            EventDetail::Mouse(detail) => {
                self.dispatch_mouse(target, event.name, event.init, detail)
            }
            EventDetail::Focus => self.dispatch_focus(target, event.name, event.init),
            EventDetail::Keyboard(detail) => {
                self.dispatch_keyboard(target, event.name, event.init, detail)
            }
            EventDetail::Input(detail) => self.dispatch_input(target, event.init, detail),
        }
    }
}
