//! Error types for bridge operations.

use thiserror::Error;

/// Error reported by a platform capability (DOM access, event dispatch,
/// property interception).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Errors that can occur while running a bridge command.
///
/// Best-effort steps (scroll interception, selection ranges) never produce
/// one of these; they are logged and skipped instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    /// A DOM or dispatch operation failed.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Rejected configuration.
    #[error("invalid bridge config: {0}")]
    InvalidConfig(String),

    /// The tracker script URL could not be built from the page base or origin.
    #[error("could not resolve tracker url: {0}")]
    TrackerUrl(String),
}

pub type Result<T, E = BridgeError> = std::result::Result<T, E>;
