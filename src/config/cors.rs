use axum::http::{header, HeaderValue, Method};
use std::env;
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// Cross-origin access for the JSON API. The delegate and admin pages are
/// served same-origin, so by default any origin may read the API; set
/// CORS_ALLOWED_ORIGINS (comma-separated) to restrict it.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn allowed_origins() -> AllowOrigin {
    let Ok(configured) = env::var("CORS_ALLOWED_ORIGINS") else {
        return AllowOrigin::any();
    };

    let origins = parse_origins(&configured);
    if origins.is_empty() {
        tracing::warn!("CORS: no valid origin in CORS_ALLOWED_ORIGINS, allowing any");
        AllowOrigin::any()
    } else {
        tracing::info!("CORS: restricting to {} configured origin(s)", origins.len());
        AllowOrigin::list(origins)
    }
}

/// Entries that do not parse are skipped with a warning rather than failing
/// startup.
fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("CORS: invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}
