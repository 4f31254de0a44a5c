//! tracker-bridge-core: synthetic DOM event bridge without browser dependencies.
//!
//! A host UI runtime that renders into a single canvas produces no DOM events
//! of its own, so page-level analytics scripts see nothing. The `Bridge` in
//! this crate turns discrete host commands (scroll, click, focus, keystrokes,
//! navigation) into the event sequences a tracker expects, dispatched against
//! invisible placeholder elements.
//!
//! This crate provides:
//! - `Bridge<P>` - the command surface and its state
//! - `PageDom` / `SyntheticEventSink` - the document and dispatch capabilities
//! - `ScrollPositionProvider` - scroll-read interception, with a no-op fallback
//! - `BridgeConfig` - fixed ids, paths, and variant policies
//!
//! The browser implementation of the capability traits lives in
//! `tracker-bridge-browser`.

pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod platform;
pub mod scroll;
pub mod script;

#[cfg(test)]
mod testing;

pub use bridge::{Bridge, Placeholder, PlaceholderTag, SelectionRange};
pub use config::{BridgeConfig, FocusPolicy, PlaceholderStyle, ScrollDispatch};
pub use error::{BridgeError, PlatformError, Result};
pub use events::{
    EventDetail, EventInit, EventName, InputDetail, InputType, KeyDetail, MouseDetail, Point,
    SyntheticEvent,
};
pub use keys::{backspace_key, code_for_char, key_for_char};
pub use platform::{DispatchTarget, PageDom, SyntheticEventSink};
pub use scroll::{NoopScrollProvider, ScrollPositionProvider, VirtualScroll};
pub use script::resolve_tracker_src;
pub use smol_str::SmolStr;
