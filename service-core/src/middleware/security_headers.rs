use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// CSP for the landing page: its script and styles are inlined in the HTML.
const PAGE_CSP: &str = "default-src 'self'; \
                        script-src 'self' 'unsafe-inline'; \
                        style-src 'self' 'unsafe-inline'; \
                        img-src 'self' data:; \
                        connect-src 'self'; \
                        frame-ancestors 'none'";

/// CSP for JSON endpoints.
const API_CSP: &str = "default-src 'none'; frame-ancestors 'none'";

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let is_page = req.uri().path() == "/";

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        header::HeaderValue::from_static("no-referrer"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        header::HeaderValue::from_static(if is_page { PAGE_CSP } else { API_CSP }),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "page" }))
            .route("/health", get(|| async { "ok" }))
            .layer(from_fn(security_headers_middleware))
    }

    #[tokio::test]
    async fn landing_page_allows_inline_script() {
        let response = app()
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let csp = response.headers()[header::CONTENT_SECURITY_POLICY]
            .to_str()
            .unwrap();
        assert!(csp.contains("script-src 'self' 'unsafe-inline'"));
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn api_routes_get_strict_policy() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[header::CONTENT_SECURITY_POLICY], API_CSP);
    }
}
