//! Cache-defeating response filter.
//!
//! The whole point of this server: every response is passed through
//! [`apply`] before it is written, so clients and intermediaries never
//! reuse a cached copy of a built asset.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use hyper::Response;

/// Value sent as `Cache-Control` on every response.
pub const CACHE_CONTROL_VALUE: &str = "no-cache, no-store, must-revalidate";

/// Value sent as `Pragma` on every response (HTTP/1.0 clients).
pub const PRAGMA_VALUE: &str = "no-cache";

/// Value sent as `Expires` on every response.
pub const EXPIRES_VALUE: &str = "0";

/// Stamp the cache-defeating header triplet onto a response.
///
/// Applied at the handler's single exit point, after the rest of the
/// headers are in place, so it covers every status code and resource type.
/// `insert` replaces any value already present, keeping each header at
/// exactly one occurrence.
pub fn apply(mut response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
    response
}
