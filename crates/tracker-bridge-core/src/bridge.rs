//! The bridge: host command surface and its state.
//!
//! Each command is realized as a fixed sequence of synthetic events against
//! a placeholder element (or the window/document). The sequences mirror what
//! a browser emits for the equivalent physical interaction, closely enough
//! for trackers that listen to standard DOM events.

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::config::{BridgeConfig, FocusPolicy, ScrollDispatch};
use crate::error::{BridgeError, Result};
use crate::events::{EventInit, EventName, InputType, MouseDetail, SyntheticEvent};
use crate::keys::{backspace_key, key_for_char};
use crate::platform::{DispatchTarget, SyntheticEventSink};
use crate::scroll::{NoopScrollProvider, ScrollPositionProvider, VirtualScroll};
use crate::script::resolve_tracker_src;

/// Tag a placeholder element is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaceholderTag {
    /// Click targets.
    Div,
    /// Focus and text input targets.
    Input,
}

impl PlaceholderTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Input => "input",
        }
    }

    /// Compare against a platform tag name, ignoring case.
    pub fn matches(&self, tag_name: &str) -> bool {
        tag_name.eq_ignore_ascii_case(self.as_str())
    }
}

/// A placeholder element owned by the bridge.
#[derive(Clone, Debug)]
pub struct Placeholder<E> {
    pub element: E,
    pub tag: PlaceholderTag,
}

/// Text selection to apply to a placeholder input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: u32,
    pub end: u32,
}

impl SelectionRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Collapsed selection.
    pub fn caret(offset: u32) -> Self {
        Self::new(offset, offset)
    }

    /// Build from optional host arguments. No start means no range; a
    /// missing end collapses onto the start.
    pub fn from_parts(start: Option<u32>, end: Option<u32>) -> Option<Self> {
        start.map(|start| Self::new(start, end.unwrap_or(start)))
    }
}

/// Translates host commands into synthetic DOM events.
///
/// One instance per page. The bridge owns every placeholder it creates and
/// never removes one except to replace it with a different tag.
pub struct Bridge<P: SyntheticEventSink> {
    page: P,
    scroll: Box<dyn ScrollPositionProvider>,
    config: BridgeConfig,
    elements: HashMap<SmolStr, Placeholder<P::Element>>,
    tracker_loaded: bool,
    virtual_scroll: VirtualScroll,
}

impl<P: SyntheticEventSink> Bridge<P> {
    /// Create a bridge over `page`. Nothing touches the page until a command
    /// runs.
    pub fn new(
        page: P,
        scroll: impl ScrollPositionProvider + 'static,
        config: BridgeConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            page,
            scroll: Box::new(scroll),
            config,
            elements: HashMap::new(),
            tracker_loaded: false,
            virtual_scroll: VirtualScroll::new(),
        })
    }

    // === Accessors ===

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Current virtual scroll offset.
    pub fn virtual_scroll_y(&self) -> f64 {
        self.virtual_scroll.get()
    }

    pub fn virtual_scroll(&self) -> &VirtualScroll {
        &self.virtual_scroll
    }

    pub fn is_tracker_loaded(&self) -> bool {
        self.tracker_loaded
    }

    /// Whether scroll-position reads are redirected to the virtual offset.
    ///
    /// False before `init_tracker`, and after it when the environment
    /// refused the override.
    pub fn is_scroll_intercepted(&self) -> bool {
        self.scroll.is_intercepting()
    }

    pub fn placeholder(&self, id: &str) -> Option<&Placeholder<P::Element>> {
        self.elements.get(id)
    }

    pub fn element(&self, id: &str) -> Option<&P::Element> {
        self.placeholder(id).map(|p| &p.element)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    // === Commands ===

    /// Override scroll reads, add the client-id input, and inject the
    /// tracker script. Runs once; later calls are no-ops.
    pub fn init_tracker(&mut self) -> Result<()> {
        if self.tracker_loaded {
            tracing::trace!("tracker already loaded");
            return Ok(());
        }

        tracing::debug!("initializing tracker");
        self.install_scroll_interception();
        self.ensure_hidden_input(&self.config.client_id_input_id, &self.config.client_id)?;

        let src = self.tracker_src();
        self.page.inject_script(&src)?;

        self.tracker_loaded = true;
        Ok(())
    }

    /// Record a host scroll offset and announce it.
    ///
    /// Grows the body when it is too short to contain `pixels` plus a
    /// viewport, so percentage-of-page computations don't saturate early.
    pub fn trigger_scroll(&mut self, pixels: f64) -> Result<()> {
        tracing::debug!(pixels, "scroll");
        self.virtual_scroll.set(pixels);

        let viewport = self.page.viewport_height()?;
        if self.page.body_scroll_height()? < pixels + viewport {
            self.page
                .set_body_min_height(pixels + viewport + self.config.body_padding)?;
        }

        let scroll = SyntheticEvent::plain(EventName::Scroll, EventInit::bubbling());
        self.page.dispatch(DispatchTarget::Window, &scroll)?;
        if self.config.scroll_dispatch == ScrollDispatch::WindowAndDocument {
            self.page.dispatch(DispatchTarget::Document, &scroll)?;
        }
        Ok(())
    }

    /// Announce a virtual navigation. The address bar is left alone.
    pub fn trigger_url_change(&mut self, url: &str) -> Result<()> {
        tracing::debug!(url, "virtual navigation");
        self.virtual_scroll.reset();

        self.dispatch_all(
            DispatchTarget::Window,
            &[
                SyntheticEvent::plain(EventName::PopState, EventInit::default()),
                SyntheticEvent::plain(EventName::HashChange, EventInit::default()),
            ],
        )
    }

    /// Move the `id` placeholder under `(x, y)` and click it.
    pub fn trigger_click(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        tracing::debug!(id, x, y, "click");
        let element = self.get_or_create_element(id, PlaceholderTag::Div)?;
        self.page.set_position(&element, x, y)?;

        let at = MouseDetail::at(x, y);
        self.dispatch_all(
            DispatchTarget::Element(&element),
            &[
                SyntheticEvent::mouse(EventName::MouseDown, at),
                SyntheticEvent::mouse(EventName::MouseUp, at),
                SyntheticEvent::mouse(EventName::Click, at),
            ],
        )
    }

    /// Focus or blur the `id` input placeholder.
    pub fn set_focus(&mut self, id: &str, has_focus: bool) -> Result<()> {
        tracing::debug!(id, has_focus, "focus change");
        let element = self.get_or_create_element(id, PlaceholderTag::Input)?;
        let target = DispatchTarget::Element(&element);

        match (self.config.focus_policy, has_focus) {
            (FocusPolicy::Native, true) => self.page.focus(&element)?,
            (FocusPolicy::Native, false) => self.page.blur(&element)?,
            (FocusPolicy::EmulatePointer, true) => {
                let press = MouseDetail::default();
                self.dispatch_all(
                    target,
                    &[
                        SyntheticEvent::mouse(EventName::MouseDown, press),
                        SyntheticEvent::mouse(EventName::MouseUp, press),
                        SyntheticEvent::mouse(EventName::Click, press),
                        SyntheticEvent::focus(EventName::Focus, false),
                        SyntheticEvent::focus(EventName::FocusIn, true),
                    ],
                )?;
            }
            (FocusPolicy::EmulatePointer, false) => {
                self.dispatch_all(
                    target,
                    &[
                        SyntheticEvent::plain(EventName::Change, EventInit::bubbling()),
                        SyntheticEvent::focus(EventName::Blur, false),
                        SyntheticEvent::focus(EventName::FocusOut, true),
                    ],
                )?;
            }
        }
        Ok(())
    }

    /// Emulate one printable keystroke: `text` is the field value after the
    /// key lands, `ch` the typed character.
    pub fn type_char(
        &mut self,
        id: &str,
        text: &str,
        ch: &str,
        selection: Option<SelectionRange>,
    ) -> Result<()> {
        tracing::debug!(id, ch, "type char");
        let element = self.prepare_input(id, text, selection)?;

        let key = key_for_char(ch);
        self.dispatch_all(
            DispatchTarget::Element(&element),
            &[
                SyntheticEvent::keyboard(EventName::KeyDown, key.clone()),
                SyntheticEvent::keyboard(EventName::KeyPress, key.clone()),
                SyntheticEvent::input(InputType::InsertText, Some(ch.to_string())),
                SyntheticEvent::keyboard(EventName::KeyUp, key),
            ],
        )
    }

    /// Emulate a Backspace. No `keypress`: browsers don't fire it for
    /// non-printing keys.
    pub fn press_backspace(
        &mut self,
        id: &str,
        text: &str,
        selection: Option<SelectionRange>,
    ) -> Result<()> {
        tracing::debug!(id, "backspace");
        let element = self.prepare_input(id, text, selection)?;

        let key = backspace_key();
        self.dispatch_all(
            DispatchTarget::Element(&element),
            &[
                SyntheticEvent::keyboard(EventName::KeyDown, key.clone()),
                SyntheticEvent::input(InputType::DeleteContentBackward, None),
                SyntheticEvent::keyboard(EventName::KeyUp, key),
            ],
        )
    }

    /// Set the value and fire a single `input` event, without key events.
    pub fn update_input(&mut self, id: &str, text: &str, is_backspace: bool) -> Result<()> {
        tracing::debug!(id, is_backspace, "update input");
        let element = self.get_or_create_element(id, PlaceholderTag::Input)?;
        self.page.set_value(&element, text)?;

        let input_type = if is_backspace {
            InputType::DeleteContentBackward
        } else {
            InputType::InsertText
        };
        self.page.dispatch(
            DispatchTarget::Element(&element),
            &SyntheticEvent::input(input_type, Some(text.to_string())),
        )?;
        Ok(())
    }

    /// Materialize a `div` placeholder for `id` without dispatching anything.
    pub fn register_element(&mut self, id: &str) -> Result<()> {
        self.get_or_create_element(id, PlaceholderTag::Div)?;
        Ok(())
    }

    // === Placeholders ===

    /// Return the element with `id` if it has the requested tag, otherwise
    /// replace it with a fresh placeholder of that tag.
    pub fn get_or_create_element(&mut self, id: &str, tag: PlaceholderTag) -> Result<P::Element> {
        if let Some(existing) = self.page.find_element(id) {
            if tag.matches(&self.page.tag_name(&existing)) {
                self.elements.insert(
                    SmolStr::new(id),
                    Placeholder {
                        element: existing.clone(),
                        tag,
                    },
                );
                return Ok(existing);
            }
            tracing::debug!(id, tag = tag.as_str(), "replacing placeholder with mismatched tag");
            self.page.remove_element(&existing);
            self.elements.remove(id);
        }

        let element = self.page.create_placeholder(
            id,
            tag.as_str(),
            &self.config.placeholder,
            &self.config.trace_attribute,
        )?;
        tracing::trace!(id, tag = tag.as_str(), "created placeholder");
        self.elements.insert(
            SmolStr::new(id),
            Placeholder {
                element: element.clone(),
                tag,
            },
        );
        Ok(element)
    }

    /// Create a hidden input with a fixed value unless the id is taken.
    fn ensure_hidden_input(&self, id: &str, value: &str) -> Result<()> {
        if self.page.find_element(id).is_none() {
            self.page.create_hidden_input(id, value)?;
        }
        Ok(())
    }

    /// Absolute tracker URL, or the bare configured path when the page has
    /// no usable base or origin (the browser then resolves it against the
    /// document).
    fn tracker_src(&self) -> String {
        let resolved = self.page.origin().map_err(BridgeError::from).and_then(|origin| {
            resolve_tracker_src(
                self.page.base_href().as_deref(),
                &origin,
                &self.config.tracker_path,
            )
        });
        match resolved {
            Ok(src) => src,
            Err(e) => {
                tracing::warn!(error = %e, "injecting tracker with a relative src");
                self.config.tracker_path.clone()
            }
        }
    }

    fn install_scroll_interception(&mut self) {
        if self.scroll.is_intercepting() {
            return;
        }
        if let Err(e) = self.scroll.install(&self.virtual_scroll) {
            tracing::warn!(error = %e, "scroll interception unavailable, real scroll values stay in effect");
            self.scroll = Box::new(NoopScrollProvider);
        }
    }

    /// Input placeholder with its value set and the selection applied when
    /// the platform accepts it.
    fn prepare_input(
        &mut self,
        id: &str,
        text: &str,
        selection: Option<SelectionRange>,
    ) -> Result<P::Element> {
        let element = self.get_or_create_element(id, PlaceholderTag::Input)?;
        self.page.set_value(&element, text)?;

        if let Some(range) = selection {
            if let Err(e) = self
                .page
                .set_selection_range(&element, range.start, range.end)
            {
                tracing::debug!(id, error = %e, "selection range not applied");
            }
        }
        Ok(element)
    }

    fn dispatch_all(
        &self,
        target: DispatchTarget<'_, P::Element>,
        events: &[SyntheticEvent],
    ) -> Result<()> {
        for event in events {
            self.page.dispatch(target, event)?;
        }
        Ok(())
    }
}
