//! Synthetic event descriptions.
//!
//! These types describe an event independently of how a platform constructs
//! it. The browser sink maps each one onto the matching `web_sys` event
//! constructor and init dictionary.

use std::fmt;

use smol_str::SmolStr;

/// DOM event type names the bridge dispatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    Scroll,
    PopState,
    HashChange,
    MouseDown,
    MouseUp,
    Click,
    Focus,
    FocusIn,
    Blur,
    FocusOut,
    Change,
    KeyDown,
    KeyPress,
    KeyUp,
    Input,
}

impl EventName {
    /// The DOM event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::PopState => "popstate",
            Self::HashChange => "hashchange",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::Click => "click",
            Self::Focus => "focus",
            Self::FocusIn => "focusin",
            Self::Blur => "blur",
            Self::FocusOut => "focusout",
            Self::Change => "change",
            Self::KeyDown => "keydown",
            Self::KeyPress => "keypress",
            Self::KeyUp => "keyup",
            Self::Input => "input",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base `EventInit` flags shared by every event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
}

impl EventInit {
    pub fn new(bubbles: bool, cancelable: bool) -> Self {
        Self {
            bubbles,
            cancelable,
        }
    }

    /// Bubbling, not cancelable.
    pub fn bubbling() -> Self {
        Self::new(true, false)
    }
}

/// A point in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mouse event coordinates. `None` leaves the browser default (zero).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseDetail {
    pub client: Option<Point>,
    pub screen: Option<Point>,
}

impl MouseDetail {
    /// Same position for client and screen coordinates.
    pub fn at(x: f64, y: f64) -> Self {
        let point = Point::new(x, y);
        Self {
            client: Some(point),
            screen: Some(point),
        }
    }
}

/// Keyboard event fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDetail {
    /// `KeyboardEvent.key`
    pub key: SmolStr,
    /// `KeyboardEvent.code`
    pub code: SmolStr,
    /// Legacy `keyCode` / `which`, only set where trackers still read them.
    pub key_code: Option<u32>,
}

/// W3C Input Events `inputType` values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputType {
    InsertText,
    DeleteContentBackward,
    Other(String),
}

impl InputType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::InsertText => "insertText",
            Self::DeleteContentBackward => "deleteContentBackward",
            Self::Other(s) => s,
        }
    }

    /// Parse an `inputType` string as reported by `InputEvent.inputType`.
    pub fn parse(s: &str) -> Self {
        match s {
            "insertText" => Self::InsertText,
            "deleteContentBackward" => Self::DeleteContentBackward,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `InputEvent` fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputDetail {
    pub input_type: InputType,
    pub data: Option<String>,
}

/// Which event interface to construct, with its interface-specific fields.
#[derive(Clone, Debug, PartialEq)]
pub enum EventDetail {
    /// Plain `Event`.
    Plain,
    Mouse(MouseDetail),
    Focus,
    Keyboard(KeyDetail),
    Input(InputDetail),
}

/// A fully described synthetic event.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticEvent {
    pub name: EventName,
    pub init: EventInit,
    pub detail: EventDetail,
}

impl SyntheticEvent {
    pub fn plain(name: EventName, init: EventInit) -> Self {
        Self {
            name,
            init,
            detail: EventDetail::Plain,
        }
    }

    /// Bubbling, cancelable mouse event.
    pub fn mouse(name: EventName, detail: MouseDetail) -> Self {
        Self {
            name,
            init: EventInit::new(true, true),
            detail: EventDetail::Mouse(detail),
        }
    }

    /// Cancelable focus event. `focus`/`blur` don't bubble, `focusin`/`focusout` do.
    pub fn focus(name: EventName, bubbles: bool) -> Self {
        Self {
            name,
            init: EventInit::new(bubbles, true),
            detail: EventDetail::Focus,
        }
    }

    /// Bubbling, cancelable keyboard event.
    pub fn keyboard(name: EventName, detail: KeyDetail) -> Self {
        Self {
            name,
            init: EventInit::new(true, true),
            detail: EventDetail::Keyboard(detail),
        }
    }

    /// Bubbling `input` event.
    pub fn input(input_type: InputType, data: Option<String>) -> Self {
        Self {
            name: EventName::Input,
            init: EventInit::bubbling(),
            detail: EventDetail::Input(InputDetail { input_type, data }),
        }
    }
}
