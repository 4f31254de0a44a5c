//! Scroll-read interception.
//!
//! Redefines `window.scrollY` and `window.pageYOffset` as accessors that
//! return the virtual offset. Both are installed or neither is: a partial
//! failure puts the first one back. `scrollTop` on the root and body elements is
//! redefined too, for trackers that still read it there; those two are
//! optional and skipped with a warning when the browser refuses them.

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use tracker_bridge_core::{PlatformError, ScrollPositionProvider, VirtualScroll};

use crate::dom::{BrowserPage, js_error};

/// Browser `ScrollPositionProvider`.
///
/// The installed property descriptors call back into closures owned here,
/// so the interceptor must outlive any tracker reads. The bridge keeps it
/// for the life of the page.
pub struct ScrollInterceptor {
    window: Window,
    document: Document,
    getters: Vec<Closure<dyn Fn() -> f64>>,
    setters: Vec<Closure<dyn Fn(JsValue)>>,
    intercepting: bool,
}

impl ScrollInterceptor {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            getters: Vec::new(),
            setters: Vec::new(),
            intercepting: false,
        }
    }

    pub fn for_page(page: &BrowserPage) -> Self {
        Self::new(page.window().clone(), page.document().clone())
    }
}

/// `Object.defineProperty(target, property, { get, set, configurable: true })`
/// without throwing.
fn define_accessor(
    target: &Object,
    property: &str,
    getter: &JsValue,
    setter: Option<&JsValue>,
) -> Result<(), PlatformError> {
    let descriptor = Object::new();
    let set_field = |key: &str, value: &JsValue| {
        Reflect::set(&descriptor, &JsValue::from_str(key), value)
            .map(|_| ())
            .map_err(|e| js_error("property descriptor", e))
    };
    set_field("get", getter)?;
    if let Some(setter) = setter {
        set_field("set", setter)?;
    }
    set_field("configurable", &JsValue::TRUE)?;

    match Reflect::define_property(target, &JsValue::from_str(property), &descriptor) {
        Ok(true) => Ok(()),
        Ok(false) => Err(PlatformError(format!("{property} cannot be redefined"))),
        Err(e) => Err(js_error(property, e)),
    }
}

/// Put back what `property` was before it was redefined: the captured own
/// descriptor, or nothing when the value came from the prototype chain.
fn restore(target: &Object, property: &str, original: &JsValue) {
    let key = JsValue::from_str(property);
    let restored = if original.is_undefined() {
        Reflect::delete_property(target, &key)
    } else {
        Reflect::define_property(target, &key, original.unchecked_ref())
    };
    if !matches!(restored, Ok(true)) {
        tracing::warn!(property, "could not restore original property");
    }
}

/// Redefine every property in `properties` with `getter`, or none of them.
fn define_all(target: &Object, properties: &[&str], getter: &JsValue) -> Result<(), PlatformError> {
    let mut defined: Vec<(&str, JsValue)> = Vec::with_capacity(properties.len());
    for &property in properties {
        let original = Object::get_own_property_descriptor(target, &JsValue::from_str(property));
        if let Err(e) = define_accessor(target, property, getter, None) {
            for (property, original) in defined.iter().rev() {
                restore(target, property, original);
            }
            return Err(e);
        }
        defined.push((property, original));
    }
    Ok(())
}

impl ScrollPositionProvider for ScrollInterceptor {
    fn install(&mut self, position: &VirtualScroll) -> Result<(), PlatformError> {
        let getter = {
            let position = position.clone();
            Closure::<dyn Fn() -> f64>::new(move || position.get())
        };
        let ignore_writes = Closure::<dyn Fn(JsValue)>::new(|_: JsValue| {});
        let get: JsValue = getter.as_ref().clone();
        let set: JsValue = ignore_writes.as_ref().clone();
        // Owned before any property can point at them.
        self.getters.push(getter);
        self.setters.push(ignore_writes);

        let window: &Object = self.window.unchecked_ref();
        define_all(window, &["scrollY", "pageYOffset"], &get)?;

        let roots: [Option<Element>; 2] = [
            self.document.document_element(),
            self.document.body().map(Into::into),
        ];
        for root in roots.into_iter().flatten() {
            if let Err(e) = define_accessor(root.unchecked_ref(), "scrollTop", &get, Some(&set)) {
                tracing::warn!(error = %e, tag = %root.tag_name(), "scrollTop override skipped");
            }
        }

        self.intercepting = true;
        tracing::debug!("scroll reads intercepted");
        Ok(())
    }

    fn is_intercepting(&self) -> bool {
        self.intercepting
    }
}
