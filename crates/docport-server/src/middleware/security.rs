//! Security headers middleware.
//!
//! Every response (200 and 404 alike) carries the headers in
//! [`SECURITY_HEADERS`].

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Header name/value pairs added to all responses.
///
/// The API only returns JSON, so the CSP forbids loading or framing anything.
pub(crate) const SECURITY_HEADERS: [(&str, &str); 3] = [
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
];

/// Create a layer that sets one response header, overriding any handler value.
fn header_layer(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

/// Wrap `router` with a layer per entry of [`SECURITY_HEADERS`].
pub(crate) fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SECURITY_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(header_layer(name, value))
        })
}
