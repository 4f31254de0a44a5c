//! Document access for the bridge.
//!
//! Placeholders are plain `HtmlElement`s appended to the body. Lookups go
//! through `getElementById`, so an element the page already had under the
//! same id is found (and possibly replaced) as well. Handles are `Element`
//! so that non-HTML hits such as `<svg>` are seen, and replaced, too.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlBaseElement, HtmlElement, HtmlInputElement, HtmlScriptElement, Node,
    Window,
};

use tracker_bridge_core::{PageDom, PlaceholderStyle, PlatformError};

/// Convert a thrown JS value into a `PlatformError`, keeping the exception
/// name and message when it is an `Error`.
pub(crate) fn js_error(context: &str, err: JsValue) -> PlatformError {
    match gloo_utils::errors::JsError::try_from(err) {
        Ok(e) => PlatformError(format!("{context}: {e}")),
        Err(other) => PlatformError(format!("{context}: {other}")),
    }
}

/// The current page's window and document.
#[derive(Clone, Debug)]
pub struct BrowserPage {
    pub(crate) window: Window,
    pub(crate) document: Document,
}

impl BrowserPage {
    /// Page for the global `window`.
    pub fn new() -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("window has no document")?;
        Ok(Self { window, document })
    }

    pub fn from_parts(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn body(&self) -> Result<HtmlElement, PlatformError> {
        self.document
            .body()
            .ok_or_else(|| "document has no body".into())
    }

    fn create<T: JsCast>(&self, tag: &str) -> Result<T, PlatformError> {
        self.document
            .create_element(tag)
            .map_err(|e| js_error("createElement", e))?
            .dyn_into::<T>()
            .map_err(|_| PlatformError(format!("<{tag}> has an unexpected element type")))
    }

    fn append_to_body(&self, node: &Node) -> Result<(), PlatformError> {
        self.body()?
            .append_child(node)
            .map(|_| ())
            .map_err(|e| js_error("appendChild", e))
    }
}

fn as_html(element: &Element) -> Result<&HtmlElement, PlatformError> {
    element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| PlatformError(format!("<{}> is not an HTML element", element.tag_name())))
}

fn as_input(element: &Element) -> Result<&HtmlInputElement, PlatformError> {
    element.dyn_ref::<HtmlInputElement>().ok_or_else(|| {
        PlatformError(format!(
            "<{}> is not an input",
            element.tag_name().to_ascii_lowercase()
        ))
    })
}

fn set_style(element: &HtmlElement, name: &str, value: &str) -> Result<(), PlatformError> {
    element
        .style()
        .set_property(name, value)
        .map_err(|e| js_error(name, e))
}

impl PageDom for BrowserPage {
    type Element = Element;

    fn find_element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Non-HTML elements report `{namespace}tag`, which never matches a
    /// placeholder tag even when the local name is `div` or `input`.
    fn tag_name(&self, element: &Element) -> String {
        if element.is_instance_of::<HtmlElement>() {
            element.tag_name()
        } else {
            format!(
                "{{{}}}{}",
                element.namespace_uri().unwrap_or_default(),
                element.tag_name()
            )
        }
    }

    fn remove_element(&self, element: &Element) {
        element.remove();
    }

    fn create_placeholder(
        &self,
        id: &str,
        tag: &str,
        style: &PlaceholderStyle,
        trace_attribute: &str,
    ) -> Result<Element, PlatformError> {
        let element: HtmlElement = self.create(tag)?;
        element.set_id(id);
        for (name, value) in style.declarations() {
            set_style(&element, name, &value)?;
        }
        element
            .set_attribute(trace_attribute, id)
            .map_err(|e| js_error(trace_attribute, e))?;
        self.append_to_body(&element)?;
        Ok(element.into())
    }

    fn set_position(&self, element: &Element, x: f64, y: f64) -> Result<(), PlatformError> {
        let element = as_html(element)?;
        set_style(element, "left", &format!("{x}px"))?;
        set_style(element, "top", &format!("{y}px"))
    }

    fn set_value(&self, element: &Element, value: &str) -> Result<(), PlatformError> {
        as_input(element)?.set_value(value);
        Ok(())
    }

    fn set_selection_range(
        &self,
        element: &Element,
        start: u32,
        end: u32,
    ) -> Result<(), PlatformError> {
        as_input(element)?
            .set_selection_range(start, end)
            .map_err(|e| js_error("setSelectionRange", e))
    }

    fn create_hidden_input(&self, id: &str, value: &str) -> Result<(), PlatformError> {
        let input: HtmlInputElement = self.create("input")?;
        input.set_id(id);
        input.set_type("hidden");
        input.set_value(value);
        self.append_to_body(&input)
    }

    fn body_scroll_height(&self) -> Result<f64, PlatformError> {
        Ok(f64::from(self.body()?.scroll_height()))
    }

    fn viewport_height(&self) -> Result<f64, PlatformError> {
        self.window
            .inner_height()
            .map_err(|e| js_error("innerHeight", e))?
            .as_f64()
            .ok_or_else(|| "innerHeight is not a number".into())
    }

    fn set_body_min_height(&self, px: f64) -> Result<(), PlatformError> {
        set_style(&self.body()?, "min-height", &format!("{px}px"))
    }

    fn base_href(&self) -> Option<String> {
        let base = self.document.query_selector("base").ok().flatten()?;
        let href = base.dyn_into::<HtmlBaseElement>().ok()?.href();
        (!href.is_empty()).then_some(href)
    }

    fn origin(&self) -> Result<String, PlatformError> {
        self.window
            .location()
            .origin()
            .map_err(|e| js_error("location.origin", e))
    }

    fn inject_script(&self, src: &str) -> Result<(), PlatformError> {
        let script: HtmlScriptElement = self.create("script")?;
        script.set_src(src);
        script.set_async(true);

        let parent: Node = match self.document.head() {
            Some(head) => head.into(),
            None => self.body()?.into(),
        };
        parent
            .append_child(&script)
            .map(|_| ())
            .map_err(|e| js_error("appendChild", e))
    }

    fn focus(&self, element: &Element) -> Result<(), PlatformError> {
        as_html(element)?
            .focus()
            .map_err(|e| js_error("focus", e))
    }

    fn blur(&self, element: &Element) -> Result<(), PlatformError> {
        as_html(element)?.blur().map_err(|e| js_error("blur", e))
    }
}
