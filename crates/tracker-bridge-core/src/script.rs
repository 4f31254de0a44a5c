//! Tracker script URL resolution.

use url::Url;

use crate::error::BridgeError;

/// Resolve the tracker script `path` against the page's `<base>` href, or
/// against the origin when there is no usable base.
///
/// Resolution follows URL join semantics, the same rules the browser applies
/// to a relative `src`.
pub fn resolve_tracker_src(
    base_href: Option<&str>,
    origin: &str,
    path: &str,
) -> Result<String, BridgeError> {
    if let Some(base) = base_href.filter(|b| !b.is_empty()) {
        match Url::parse(base).and_then(|base| base.join(path)) {
            Ok(url) => return Ok(url.into()),
            Err(e) => {
                tracing::warn!(base, error = %e, "unusable <base> href, falling back to origin");
            }
        }
    }

    let origin = Url::parse(origin)
        .map_err(|e| BridgeError::TrackerUrl(format!("origin {origin:?}: {e}")))?;
    let url = origin
        .join(path)
        .map_err(|e| BridgeError::TrackerUrl(format!("path {path:?}: {e}")))?;
    Ok(url.into())
}
