//! Browser DOM layer for the tracker bridge.
//!
//! This crate implements the `tracker-bridge-core` capability traits on top
//! of `web_sys`. It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: placeholder elements, hidden input, script injection
//! - `events`: `Event` / `MouseEvent` / `FocusEvent` / `KeyboardEvent` /
//!   `InputEvent` construction and dispatch
//! - `scroll`: `scrollY` / `pageYOffset` / `scrollTop` interception
//!
//! # Re-exports
//!
//! This crate re-exports `tracker-bridge-core` for convenience, so consumers
//! only need to depend on `tracker-bridge-browser`.

// Re-export core crate
pub use tracker_bridge_core;
pub use tracker_bridge_core::*;

pub mod dom;
pub mod events;
pub mod scroll;

pub use dom::BrowserPage;
pub use scroll::ScrollInterceptor;

/// Bridge over the current page, intercepting scroll reads on its window.
pub fn browser_bridge(config: BridgeConfig) -> Result<Bridge<BrowserPage>> {
    let page = BrowserPage::new()?;
    let interceptor = ScrollInterceptor::for_page(&page);
    Bridge::new(page, interceptor, config)
}
