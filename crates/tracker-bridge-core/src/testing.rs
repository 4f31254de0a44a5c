//! In-memory page for bridge tests.
//!
//! `RecordingPage` keeps a flat list of body children and logs every
//! dispatched event as one line, so tests can compare whole sequences.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::config::PlaceholderStyle;
use crate::error::PlatformError;
use crate::events::{
    EventDetail, EventInit, EventName, InputDetail, KeyDetail, MouseDetail, SyntheticEvent,
};
use crate::platform::{DispatchTarget, PageDom, SyntheticEventSink};
use crate::scroll::{ScrollPositionProvider, VirtualScroll};

pub(crate) type NodeId = usize;

#[derive(Clone, Debug, Default)]
pub(crate) struct Node {
    pub id: String,
    pub tag: String,
    pub value: String,
    pub input_type: Option<String>,
    pub selection: Option<(u32, u32)>,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub attributes: BTreeMap<String, String>,
    pub style: Vec<(String, String)>,
}

#[derive(Clone, Debug)]
pub(crate) struct Dispatched {
    pub target: String,
    pub event: SyntheticEvent,
}

impl fmt::Display for Dispatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.event.name)?;
        if self.event.init.bubbles {
            f.write_str(" bubbles")?;
        }
        if self.event.init.cancelable {
            f.write_str(" cancelable")?;
        }
        match &self.event.detail {
            EventDetail::Plain | EventDetail::Focus => {}
            EventDetail::Mouse(mouse) => {
                if let Some(p) = mouse.client {
                    write!(f, " client=({},{})", p.x, p.y)?;
                }
                if let Some(p) = mouse.screen {
                    write!(f, " screen=({},{})", p.x, p.y)?;
                }
            }
            EventDetail::Keyboard(key) => {
                write!(f, " key={} code={}", key.key, key.code)?;
                if let Some(code) = key.key_code {
                    write!(f, " keyCode={code}")?;
                }
            }
            EventDetail::Input(input) => {
                write!(f, " inputType={}", input.input_type)?;
                match &input.data {
                    Some(data) => write!(f, " data={data:?}")?,
                    None => f.write_str(" data=null")?,
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct PageState {
    next_node: NodeId,
    live: BTreeMap<NodeId, Node>,
    removed: BTreeMap<NodeId, Node>,
    scripts: Vec<String>,
    body_scroll_height: f64,
    viewport_height: f64,
    body_min_height: Option<f64>,
    base_href: Option<String>,
    origin: String,
    dispatched: Vec<Dispatched>,
    native_calls: Vec<String>,
    reject_selection: bool,
}

pub(crate) struct RecordingPage {
    state: RefCell<PageState>,
}

impl RecordingPage {
    /// Body 800px tall in a 600px viewport.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(PageState {
                next_node: 1,
                live: BTreeMap::new(),
                removed: BTreeMap::new(),
                scripts: Vec::new(),
                body_scroll_height: 800.0,
                viewport_height: 600.0,
                body_min_height: None,
                base_href: None,
                origin: "https://app.example".to_string(),
                dispatched: Vec::new(),
                native_calls: Vec::new(),
                reject_selection: false,
            }),
        }
    }

    pub fn with_base(href: &str) -> Self {
        let page = Self::new();
        page.set_base_href(href);
        page
    }

    pub fn set_base_href(&self, href: &str) {
        self.state.borrow_mut().base_href = Some(href.to_string());
    }

    pub fn with_origin(origin: &str) -> Self {
        let page = Self::new();
        page.state.borrow_mut().origin = origin.to_string();
        page
    }

    pub fn set_body_scroll_height(&self, px: f64) {
        self.state.borrow_mut().body_scroll_height = px;
    }

    /// Make every `set_selection_range` call fail.
    pub fn reject_selection_ranges(&self) {
        self.state.borrow_mut().reject_selection = true;
    }

    /// Add a node the bridge did not create.
    pub fn insert_foreign(&self, id: &str, tag: &str) -> NodeId {
        self.insert(Node {
            id: id.to_string(),
            tag: tag.to_string(),
            ..Default::default()
        })
    }

    pub fn node(&self, handle: NodeId) -> Option<Node> {
        self.state.borrow().live.get(&handle).cloned()
    }

    pub fn node_by_dom_id(&self, id: &str) -> Option<Node> {
        self.state
            .borrow()
            .live
            .values()
            .find(|node| node.id == id)
            .cloned()
    }

    pub fn is_live(&self, handle: NodeId) -> bool {
        self.state.borrow().live.contains_key(&handle)
    }

    pub fn was_removed(&self, handle: NodeId) -> bool {
        self.state.borrow().removed.contains_key(&handle)
    }

    pub fn count_with_id(&self, id: &str) -> usize {
        self.state
            .borrow()
            .live
            .values()
            .filter(|node| node.id == id)
            .count()
    }

    pub fn node_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.state.borrow().scripts.clone()
    }

    pub fn body_min_height(&self) -> Option<f64> {
        self.state.borrow().body_min_height
    }

    pub fn native_calls(&self) -> Vec<String> {
        self.state.borrow().native_calls.clone()
    }

    pub fn event_names(&self) -> Vec<EventName> {
        self.state
            .borrow()
            .dispatched
            .iter()
            .map(|d| d.event.name)
            .collect()
    }

    pub fn dispatched(&self) -> Vec<Dispatched> {
        self.state.borrow().dispatched.clone()
    }

    /// One line per dispatched event.
    pub fn event_log(&self) -> String {
        self.state
            .borrow()
            .dispatched
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().dispatched.clear();
    }

    fn insert(&self, node: Node) -> NodeId {
        let mut state = self.state.borrow_mut();
        let handle = state.next_node;
        state.next_node += 1;
        state.live.insert(handle, node);
        handle
    }

    fn with_live<T>(
        &self,
        handle: NodeId,
        f: impl FnOnce(&mut Node) -> Result<T, PlatformError>,
    ) -> Result<T, PlatformError> {
        let mut state = self.state.borrow_mut();
        let node = state
            .live
            .get_mut(&handle)
            .ok_or_else(|| PlatformError::from("node is not attached"))?;
        f(node)
    }

    fn label(&self, target: DispatchTarget<'_, NodeId>) -> String {
        match target {
            DispatchTarget::Window => "window".to_string(),
            DispatchTarget::Document => "document".to_string(),
            DispatchTarget::Element(handle) => match self.node(*handle) {
                Some(node) => format!("{}#{}", node.tag, node.id),
                None => format!("detached#{handle}"),
            },
        }
    }

    fn record(&self, target: DispatchTarget<'_, NodeId>, event: SyntheticEvent) {
        let target = self.label(target);
        self.state
            .borrow_mut()
            .dispatched
            .push(Dispatched { target, event });
    }
}

impl PageDom for RecordingPage {
    type Element = NodeId;

    fn find_element(&self, id: &str) -> Option<NodeId> {
        self.state
            .borrow()
            .live
            .iter()
            .find(|(_, node)| node.id == id)
            .map(|(handle, _)| *handle)
    }

    fn tag_name(&self, element: &NodeId) -> String {
        // Browsers report HTML tag names in upper case.
        self.node(*element)
            .map(|node| node.tag.to_ascii_uppercase())
            .unwrap_or_default()
    }

    fn remove_element(&self, element: &NodeId) {
        let mut state = self.state.borrow_mut();
        if let Some(node) = state.live.remove(element) {
            state.removed.insert(*element, node);
        }
    }

    fn create_placeholder(
        &self,
        id: &str,
        tag: &str,
        style: &PlaceholderStyle,
        trace_attribute: &str,
    ) -> Result<NodeId, PlatformError> {
        let mut node = Node {
            id: id.to_string(),
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        };
        node.attributes
            .insert(trace_attribute.to_string(), id.to_string());
        node.style = style
            .declarations()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Ok(self.insert(node))
    }

    fn set_position(&self, element: &NodeId, x: f64, y: f64) -> Result<(), PlatformError> {
        self.with_live(*element, |node| {
            node.left = Some(x);
            node.top = Some(y);
            Ok(())
        })
    }

    fn set_value(&self, element: &NodeId, value: &str) -> Result<(), PlatformError> {
        self.with_live(*element, |node| {
            if node.tag != "input" {
                return Err(format!("<{}> has no value", node.tag).into());
            }
            node.value = value.to_string();
            Ok(())
        })
    }

    fn set_selection_range(
        &self,
        element: &NodeId,
        start: u32,
        end: u32,
    ) -> Result<(), PlatformError> {
        if self.state.borrow().reject_selection {
            return Err("InvalidStateError: selection not supported".into());
        }
        self.with_live(*element, |node| {
            node.selection = Some((start, end));
            Ok(())
        })
    }

    fn create_hidden_input(&self, id: &str, value: &str) -> Result<(), PlatformError> {
        self.insert(Node {
            id: id.to_string(),
            tag: "input".to_string(),
            value: value.to_string(),
            input_type: Some("hidden".to_string()),
            ..Default::default()
        });
        Ok(())
    }

    fn body_scroll_height(&self) -> Result<f64, PlatformError> {
        let state = self.state.borrow();
        Ok(state
            .body_min_height
            .map_or(state.body_scroll_height, |min| {
                min.max(state.body_scroll_height)
            }))
    }

    fn viewport_height(&self) -> Result<f64, PlatformError> {
        Ok(self.state.borrow().viewport_height)
    }

    fn set_body_min_height(&self, px: f64) -> Result<(), PlatformError> {
        self.state.borrow_mut().body_min_height = Some(px);
        Ok(())
    }

    fn base_href(&self) -> Option<String> {
        self.state.borrow().base_href.clone()
    }

    fn origin(&self) -> Result<String, PlatformError> {
        Ok(self.state.borrow().origin.clone())
    }

    fn inject_script(&self, src: &str) -> Result<(), PlatformError> {
        self.state.borrow_mut().scripts.push(src.to_string());
        Ok(())
    }

    fn focus(&self, element: &NodeId) -> Result<(), PlatformError> {
        let label = self.label(DispatchTarget::Element(element));
        self.state
            .borrow_mut()
            .native_calls
            .push(format!("focus {label}"));
        Ok(())
    }

    fn blur(&self, element: &NodeId) -> Result<(), PlatformError> {
        let label = self.label(DispatchTarget::Element(element));
        self.state
            .borrow_mut()
            .native_calls
            .push(format!("blur {label}"));
        Ok(())
    }
}

impl SyntheticEventSink for RecordingPage {
    fn dispatch_plain(
        &self,
        target: DispatchTarget<'_, NodeId>,
        name: EventName,
        init: EventInit,
    ) -> Result<(), PlatformError> {
        self.record(target, SyntheticEvent::plain(name, init));
        Ok(())
    }

    fn dispatch_mouse(
        &self,
        target: DispatchTarget<'_, NodeId>,
        name: EventName,
        init: EventInit,
        detail: &MouseDetail,
    ) -> Result<(), PlatformError> {
        self.record(
            target,
            SyntheticEvent {
                name,
                init,
                detail: EventDetail::Mouse(*detail),
            },
        );
        Ok(())
    }

    fn dispatch_focus(
        &self,
        target: DispatchTarget<'_, NodeId>,
        name: EventName,
        init: EventInit,
    ) -> Result<(), PlatformError> {
        self.record(
            target,
            SyntheticEvent {
                name,
                init,
                detail: EventDetail::Focus,
            },
        );
        Ok(())
    }

    fn dispatch_keyboard(
        &self,
        target: DispatchTarget<'_, NodeId>,
        name: EventName,
        init: EventInit,
        detail: &KeyDetail,
    ) -> Result<(), PlatformError> {
        self.record(
            target,
            SyntheticEvent {
                name,
                init,
                detail: EventDetail::Keyboard(detail.clone()),
            },
        );
        Ok(())
    }

    fn dispatch_input(
        &self,
        target: DispatchTarget<'_, NodeId>,
        init: EventInit,
        detail: &InputDetail,
    ) -> Result<(), PlatformError> {
        self.record(
            target,
            SyntheticEvent {
                name: EventName::Input,
                init,
                detail: EventDetail::Input(detail.clone()),
            },
        );
        Ok(())
    }
}

/// Scroll provider standing in for a successful property override.
///
/// Clones share state, so a test can keep one and hand the other to the
/// bridge.
#[derive(Clone, Default)]
pub(crate) struct RecordingScroll {
    position: Rc<RefCell<Option<VirtualScroll>>>,
    installs: Rc<Cell<u32>>,
}

impl RecordingScroll {
    /// What an overridden `window.scrollY` read would return.
    pub fn scroll_y(&self) -> Option<f64> {
        self.position.borrow().as_ref().map(VirtualScroll::get)
    }

    pub fn installs(&self) -> u32 {
        self.installs.get()
    }
}

impl ScrollPositionProvider for RecordingScroll {
    fn install(&mut self, position: &VirtualScroll) -> Result<(), PlatformError> {
        self.installs.set(self.installs.get() + 1);
        *self.position.borrow_mut() = Some(position.clone());
        Ok(())
    }

    fn is_intercepting(&self) -> bool {
        self.position.borrow().is_some()
    }
}

/// Scroll provider for an environment that forbids redefining scroll reads.
pub(crate) struct LockedScroll;

impl ScrollPositionProvider for LockedScroll {
    fn install(&mut self, _position: &VirtualScroll) -> Result<(), PlatformError> {
        Err("TypeError: Cannot redefine property: scrollY".into())
    }

    fn is_intercepting(&self) -> bool {
        false
    }
}
