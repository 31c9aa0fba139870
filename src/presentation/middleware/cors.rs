//! CORS Middleware Configuration

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::AppConfig;

const WILDCARD: &str = "*";

/// Create CORS layer from settings
///
/// Credentials are always allowed. Browsers reject a literal `*` alongside
/// credentials, so a `*` entry makes the layer echo the request's own origin,
/// method or headers instead.
pub fn create_cors_layer(settings: &AppConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&settings.allowed_origins))
        .allow_methods(allow_methods(&settings.allowed_methods))
        .allow_headers(allow_headers(&settings.allowed_headers))
        .allow_credentials(true)
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value.trim() == WILDCARD)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if is_wildcard(origins) {
        return AllowOrigin::mirror_request();
    }
    AllowOrigin::list(parse_each(origins, "origin", |o| HeaderValue::from_str(o).ok()))
}

fn allow_methods(methods: &[String]) -> AllowMethods {
    if is_wildcard(methods) {
        return AllowMethods::mirror_request();
    }
    AllowMethods::list(parse_each(methods, "method", |m| {
        Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok()
    }))
}

fn allow_headers(headers: &[String]) -> AllowHeaders {
    if is_wildcard(headers) {
        return AllowHeaders::mirror_request();
    }
    AllowHeaders::list(parse_each(headers, "header", |h| HeaderName::from_bytes(h.as_bytes()).ok()))
}

/// Parse every entry, skipping (and logging) the ones that are not valid.
fn parse_each<T>(values: &[String], kind: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| {
            let parsed = parse(value.trim());
            if parsed.is_none() {
                tracing::warn!(kind, value = %value, "Ignoring invalid CORS entry");
            }
            parsed
        })
        .collect()
}
