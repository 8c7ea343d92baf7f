//! HTTP middleware stack: request ids, tracing, timeout, CORS, body limit.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Request};
use axum::{body::Body, middleware::from_fn, middleware::Next, response::Response, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tracing::field::Empty;

/// Default request body limit (16 MiB).
pub const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

pub fn header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = nanoid::nanoid!();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Stores the request id in request extensions and records it on the current span
pub async fn push_req_id_to_extensions(mut req: Request<Body>, next: Next) -> Response {
    let rid = req
        .headers()
        .get(header())
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| "n/a".to_string());

    req.extensions_mut().insert(XRequestId(rid.clone()));
    tracing::Span::current().record("request_id", tracing::field::display(&rid));

    next.run(req).await
}

#[allow(clippy::type_complexity)]
pub fn create_trace_layer() -> tower_http::trace::TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> tracing::Span + Clone,
> {
    use tower_http::trace::TraceLayer;

    TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        let rid = req
            .headers()
            .get(header())
            .and_then(|v| v.to_str().ok())
            .unwrap_or("n/a");
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            uri = %req.uri().path(),
            version = ?req.version(),
            module = "garden",
            request_id = %rid,
            status = Empty,
            latency_ms = Empty
        )
    })
}

/// CORS for the configured origins; `*` allows any origin. `None` when the list is empty.
pub fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }
    if origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Wrap the router with the full middleware stack.
///
/// Layers are added innermost first, so the request passes body limit, CORS,
/// timeout, set request id, trace, request-id extension, then propagate.
/// The id is generated before the trace span and the extension read it.
pub fn apply_layers(
    mut router: Router,
    timeout: Option<Duration>,
    cors_origins: &[String],
) -> Router {
    let x_request_id = header();

    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(from_fn(push_req_id_to_extensions));
    router = router.layer(create_trace_layer());
    router = router.layer(SetRequestIdLayer::new(x_request_id, MakeReqId));
    if let Some(timeout) = timeout {
        router = router.layer(TimeoutLayer::new(timeout));
    }
    if let Some(cors) = cors_layer(cors_origins) {
        router = router.layer(cors);
    }
    router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_disabled_without_origins() {
        assert!(cors_layer(&[]).is_none());
    }

    #[test]
    fn cors_enabled_for_listed_origins() {
        let origins = vec!["http://localhost:5173".to_string(), "*".to_string()];
        assert!(cors_layer(&origins).is_some());
        assert!(cors_layer(&origins[..1]).is_some());
    }

    #[test]
    fn generated_request_ids_are_unique() {
        let req = Request::builder().body(()).unwrap();
        let mut maker = MakeReqId;
        let a = maker.make_request_id(&req).unwrap();
        let b = maker.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }

    #[tokio::test]
    async fn generated_request_id_reaches_handler_extension() {
        use axum::{routing::get, Extension};
        use tower::ServiceExt;

        let router = Router::new().route(
            "/rid",
            get(|Extension(rid): Extension<XRequestId>| async move { rid.0 }),
        );
        let app = apply_layers(router, None, &[]);

        let resp = app
            .oneshot(Request::builder().uri("/rid").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header_id = resp
            .headers()
            .get(header())
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let seen = String::from_utf8(body.to_vec()).unwrap();

        assert_ne!(seen, "n/a");
        assert_eq!(seen, header_id);
    }
}
