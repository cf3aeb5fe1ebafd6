use axum::http::header::{HeaderName, HeaderValue};
use axum::Router;
use std::env;
use tower_http::set_header::SetResponseHeaderLayer;

/// Header values for a JSON API that should never be framed or sniffed.
const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

/// Stamp baseline security headers on every response. HSTS is only added
/// in production, where requests are guaranteed to arrive over TLS.
pub fn apply_security_headers(router: Router) -> Router {
    let mut router = router
        .layer(overriding("x-content-type-options", NOSNIFF))
        .layer(overriding("x-frame-options", DENY))
        .layer(overriding("content-security-policy", CSP_API_VALUE))
        .layer(overriding("referrer-policy", REFERRER_POLICY_VALUE))
        .layer(overriding("permissions-policy", PERMISSIONS_POLICY_VALUE));

    if hsts_enabled(env::var("RUST_ENV").ok().as_deref()) {
        tracing::info!("Security: HSTS header enabled (production mode)");
        router = router.layer(overriding("strict-transport-security", HSTS_VALUE));
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
    }

    router
}

fn overriding(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

fn hsts_enabled(rust_env: Option<&str>) -> bool {
    rust_env
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}
