//! Virtual scroll position and scroll-read interception.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::PlatformError;

/// Host-supplied vertical scroll offset.
///
/// Clones share the same cell, so an interceptor holding a clone always
/// reads the latest value written by the bridge.
#[derive(Clone, Debug, Default)]
pub struct VirtualScroll(Rc<Cell<f64>>);

impl VirtualScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, pixels: f64) {
        self.0.set(pixels);
    }

    /// Back to the top of the page.
    pub fn reset(&self) {
        self.0.set(0.0);
    }
}

/// Redirects the platform's scroll-position reads to a `VirtualScroll`.
///
/// An environment that forbids redefining those reads returns an error from
/// `install`; the bridge then falls back to `NoopScrollProvider`.
pub trait ScrollPositionProvider {
    /// Start serving reads from `position`.
    fn install(&mut self, position: &VirtualScroll) -> Result<(), PlatformError>;

    /// Whether reads are currently redirected.
    fn is_intercepting(&self) -> bool;
}

/// Leaves the platform's real scroll values in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScrollProvider;

impl ScrollPositionProvider for NoopScrollProvider {
    fn install(&mut self, _position: &VirtualScroll) -> Result<(), PlatformError> {
        Ok(())
    }

    fn is_intercepting(&self) -> bool {
        false
    }
}
