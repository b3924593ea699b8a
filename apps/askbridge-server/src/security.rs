//! Shared-secret gate for the tool-proxy routes plus baseline response
//! headers applied to everything.

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::config::Config;

pub(crate) const API_KEY_HEADER: &str = "x-api-key";

/// Constant-time byte comparison; length differences still return early,
/// which is acceptable for a static shared secret.
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for i in 0..a.len() {
        diff |= a[i] ^ b[i];
    }
    diff == 0
}

/// True when the request's `X-API-Key` header matches the configured shared
/// secret. An unconfigured secret denies everything.
pub(crate) fn api_key_ok(headers: &HeaderMap, config: &Config) -> bool {
    let Some(expected) = config.app_api_key.as_deref() else {
        return false;
    };
    let Some(presented) = headers.get(API_KEY_HEADER).and_then(|h| h.to_str().ok()) else {
        return false;
    };
    ct_eq(expected.as_bytes(), presented.as_bytes())
}

pub(crate) async fn headers_mw(req: Request<axum::body::Body>, next: Next) -> Response {
    let mut res = next.run(req).await;
    let h = res.headers_mut();
    let add_hdr = |h: &mut axum::http::HeaderMap, name: &'static str, val: &'static str| {
        let name = HeaderName::from_static(name);
        if !h.contains_key(&name) {
            h.insert(name, HeaderValue::from_static(val));
        }
    };
    add_hdr(h, "x-content-type-options", "nosniff");
    add_hdr(h, "x-frame-options", "DENY");
    add_hdr(h, "referrer-policy", "no-referrer");
    res
}
