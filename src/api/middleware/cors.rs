//! CORS policy built from the configured origin list.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Builds the CORS layer.
///
/// An empty list or a `*` entry allows any origin. Entries that are not valid
/// header values are skipped with a warning.
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn ok() -> &'static str {
        "ok"
    }

    async fn allow_origin_for(allowed: &[String], origin: &str) -> Option<String> {
        let app = Router::new().route("/", get(ok)).layer(layer(allowed));

        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let allowed = vec!["*".to_string()];
        assert_eq!(
            allow_origin_for(&allowed, "https://app.example.com").await,
            Some("*".to_string())
        );
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed() {
        let allowed = vec!["https://app.example.com".to_string()];
        assert_eq!(
            allow_origin_for(&allowed, "https://app.example.com").await,
            Some("https://app.example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_header() {
        let allowed = vec!["https://app.example.com".to_string()];
        assert_eq!(allow_origin_for(&allowed, "https://evil.example.org").await, None);
    }
}
