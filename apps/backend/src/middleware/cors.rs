use actix_cors::Cors;
use actix_web::http::header;

use crate::auth::gate::AUTH_TOKEN_HEADER;

/// Build CORS middleware for the configured origins.
///
/// Origins that are empty, `"null"` or not http(s) are ignored. With nothing
/// usable configured, only the local dev frontend is allowed.
pub fn cors_middleware(configured_origins: &[String]) -> Cors {
    let mut origins: Vec<&str> = configured_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    if origins.is_empty() {
        origins = vec!["http://localhost:3000", "http://127.0.0.1:3000"];
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(AUTH_TOKEN_HEADER),
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
