//! Synthetic event construction and dispatch.
//!
//! Every UI event gets `view = window`, which some trackers check before
//! trusting an event. Mouse coordinates are truncated to whole pixels, the
//! same conversion the browser applies to a fractional `clientX`.

use web_sys::{
    Element, Event, EventTarget, FocusEvent, FocusEventInit, InputEvent, InputEventInit,
    KeyboardEvent, KeyboardEventInit, MouseEvent, MouseEventInit,
};

use tracker_bridge_core::{
    DispatchTarget, EventInit, EventName, InputDetail, KeyDetail, MouseDetail, PlatformError,
    SyntheticEventSink,
};

use crate::dom::{BrowserPage, js_error};

impl BrowserPage {
    fn event_target<'a>(&'a self, target: DispatchTarget<'a, Element>) -> &'a EventTarget {
        match target {
            DispatchTarget::Window => self.window.as_ref(),
            DispatchTarget::Document => self.document.as_ref(),
            DispatchTarget::Element(element) => element.as_ref(),
        }
    }

    fn fire(
        &self,
        target: DispatchTarget<'_, Element>,
        name: EventName,
        event: &Event,
    ) -> Result<(), PlatformError> {
        self.event_target(target)
            .dispatch_event(event)
            .map(|_| ())
            .map_err(|e| js_error(name.as_str(), e))
    }
}

impl SyntheticEventSink for BrowserPage {
    fn dispatch_plain(
        &self,
        target: DispatchTarget<'_, Element>,
        name: EventName,
        init: EventInit,
    ) -> Result<(), PlatformError> {
        let dict = web_sys::EventInit::new();
        dict.set_bubbles(init.bubbles);
        dict.set_cancelable(init.cancelable);

        let event = Event::new_with_event_init_dict(name.as_str(), &dict)
            .map_err(|e| js_error(name.as_str(), e))?;
        self.fire(target, name, &event)
    }

    fn dispatch_mouse(
        &self,
        target: DispatchTarget<'_, Element>,
        name: EventName,
        init: EventInit,
        detail: &MouseDetail,
    ) -> Result<(), PlatformError> {
        let dict = MouseEventInit::new();
        dict.set_bubbles(init.bubbles);
        dict.set_cancelable(init.cancelable);
        dict.set_view(Some(&self.window));
        if let Some(client) = detail.client {
            dict.set_client_x(client.x.trunc() as i32);
            dict.set_client_y(client.y.trunc() as i32);
        }
        if let Some(screen) = detail.screen {
            dict.set_screen_x(screen.x.trunc() as i32);
            dict.set_screen_y(screen.y.trunc() as i32);
        }

        let event = MouseEvent::new_with_mouse_event_init_dict(name.as_str(), &dict)
            .map_err(|e| js_error(name.as_str(), e))?;
        self.fire(target, name, &event)
    }

    fn dispatch_focus(
        &self,
        target: DispatchTarget<'_, Element>,
        name: EventName,
        init: EventInit,
    ) -> Result<(), PlatformError> {
        let dict = FocusEventInit::new();
        dict.set_bubbles(init.bubbles);
        dict.set_cancelable(init.cancelable);
        dict.set_view(Some(&self.window));

        let event = FocusEvent::new_with_focus_event_init_dict(name.as_str(), &dict)
            .map_err(|e| js_error(name.as_str(), e))?;
        self.fire(target, name, &event)
    }

    fn dispatch_keyboard(
        &self,
        target: DispatchTarget<'_, Element>,
        name: EventName,
        init: EventInit,
        detail: &KeyDetail,
    ) -> Result<(), PlatformError> {
        let dict = KeyboardEventInit::new();
        dict.set_bubbles(init.bubbles);
        dict.set_cancelable(init.cancelable);
        dict.set_view(Some(&self.window));
        dict.set_key(&detail.key);
        dict.set_code(&detail.code);
        if let Some(key_code) = detail.key_code {
            dict.set_key_code(key_code);
            dict.set_which(key_code);
        }

        let event = KeyboardEvent::new_with_keyboard_event_init_dict(name.as_str(), &dict)
            .map_err(|e| js_error(name.as_str(), e))?;
        self.fire(target, name, &event)
    }

    fn dispatch_input(
        &self,
        target: DispatchTarget<'_, Element>,
        init: EventInit,
        detail: &InputDetail,
    ) -> Result<(), PlatformError> {
        let dict = InputEventInit::new();
        dict.set_bubbles(init.bubbles);
        dict.set_cancelable(init.cancelable);
        dict.set_view(Some(&self.window));
        dict.set_input_type(detail.input_type.as_str());
        dict.set_data(detail.data.as_deref());

        let name = EventName::Input;
        let event = InputEvent::new_with_event_init_dict(name.as_str(), &dict)
            .map_err(|e| js_error(name.as_str(), e))?;
        self.fire(target, name, &event)
    }
}
