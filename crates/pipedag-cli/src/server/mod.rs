//! HTTP transport for pipeline analysis.
//!
//! A thin `axum` layer over [`pipedag_core::analyze`]:
//!
//! - `GET /` answers `{"Ping": "Pong"}`;
//! - `POST /pipelines/parse` accepts a submission and answers
//!   `{num_nodes, num_edges, is_dag}`.
//!
//! Requests share no state. CORS admits the configured editor origins with
//! credentials, mirroring the requested method and headers.
mod error;
mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::CliError;

/// Settings for [`serve`], taken from the `serve` subcommand.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on; `0` picks a free port.
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub allow_origins: Vec<String>,
    /// Maximum accepted request body, in bytes.
    pub max_body_size: usize,
}

impl ServerConfig {
    /// The `host:port` string passed to the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builds the application router.
///
/// # Errors
///
/// Returns [`CliError::InvalidOrigin`] if an origin is not a valid header
/// value or is the `*` wildcard, which cannot be combined with credentials.
pub fn router(config: &ServerConfig) -> Result<Router, CliError> {
    let cors = cors_layer(&config.allow_origins)?;

    Ok(Router::new()
        .route("/", get(routes::ping))
        .route("/pipelines/parse", post(routes::parse_pipeline))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, CliError> {
    let mut values: Vec<HeaderValue> = Vec::with_capacity(origins.len());
    for origin in origins {
        let invalid = || CliError::InvalidOrigin {
            origin: origin.clone(),
        };
        if origin.trim() == "*" {
            return Err(invalid());
        }
        values.push(HeaderValue::from_str(origin).map_err(|_| invalid())?);
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(values))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Binds the listener and serves until Ctrl-C.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) if the configuration is invalid, the
/// address cannot be bound, or the server loop fails.
pub async fn serve(config: ServerConfig) -> Result<(), CliError> {
    let app = router(&config)?;
    let addr = config.addr();

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CliError::BindFailed {
            addr: addr.clone(),
            detail: e.to_string(),
        })?;

    let local = listener
        .local_addr()
        .map_or_else(|_| addr.clone(), |a| a.to_string());
    tracing::info!(
        addr = %local,
        origins = ?config.allow_origins,
        "pipedag listening on http://{local}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CliError::ServerFailed {
            detail: e.to_string(),
        })?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for Ctrl-C; shutting down");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt as _;

    use super::*;

    const EDITOR: &str = "http://localhost:3000";

    fn config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 0,
            allow_origins: vec![EDITOR.to_owned()],
            max_body_size: 64 * 1024,
        }
    }

    fn app() -> Router {
        router(&config()).expect("valid config")
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    async fn post_parse(app: Router, body: String) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/pipelines/parse")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request");
        let resp = app.oneshot(req).await.expect("infallible");
        let status = resp.status();
        (status, body_json(resp).await)
    }

    async fn parse(body: Value) -> (StatusCode, Value) {
        post_parse(app(), body.to_string()).await
    }

    // ── routes ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn ping_answers_pong() {
        let req = Request::builder().uri("/").body(Body::empty()).expect("request");
        let resp = app().oneshot(req).await.expect("infallible");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"Ping": "Pong"}));
    }

    #[tokio::test]
    async fn single_edge_is_a_dag() {
        let (status, body) = parse(json!({
            "nodes": [{"id": "A"}, {"id": "B"}],
            "edges": [{"source": "A", "target": "B"}]
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"num_nodes": 2, "num_edges": 1, "is_dag": true}));
    }

    #[tokio::test]
    async fn two_node_cycle_is_not_a_dag() {
        let (_, body) = parse(json!({
            "nodes": [{"id": "A"}, {"id": "B"}],
            "edges": [{"source": "A", "target": "B"}, {"source": "B", "target": "A"}]
        }))
        .await;
        assert_eq!(body, json!({"num_nodes": 2, "num_edges": 2, "is_dag": false}));
    }

    #[tokio::test]
    async fn self_loop_is_not_a_dag() {
        let (_, body) = parse(json!({
            "nodes": [{"id": "A"}],
            "edges": [{"source": "A", "target": "A"}]
        }))
        .await;
        assert_eq!(body, json!({"num_nodes": 1, "num_edges": 1, "is_dag": false}));
    }

    #[tokio::test]
    async fn empty_pipeline_is_a_dag() {
        let (_, body) = parse(json!({"nodes": [], "edges": []})).await;
        assert_eq!(body, json!({"num_nodes": 0, "num_edges": 0, "is_dag": true}));
    }

    #[tokio::test]
    async fn dangling_edge_is_counted_not_followed() {
        let (_, body) = parse(json!({
            "nodes": [{"id": "A"}],
            "edges": [{"source": "A", "target": "X"}]
        }))
        .await;
        assert_eq!(body, json!({"num_nodes": 1, "num_edges": 1, "is_dag": true}));
    }

    #[tokio::test]
    async fn editor_metadata_is_accepted() {
        let (status, body) = parse(json!({
            "nodes": [
                {"id": "customInput-1", "type": "customInput",
                 "position": {"x": 10, "y": 20}, "data": {"inputName": "q"}, "width": 200},
                {"id": "llm-1", "type": "llm", "position": {"x": 300, "y": 20}, "data": {}}
            ],
            "edges": [{
                "id": "reactflow__edge-customInput-1-llm-1", "source": "customInput-1",
                "sourceHandle": "customInput-1-value", "target": "llm-1",
                "targetHandle": "llm-1-prompt", "type": "smoothstep", "animated": true,
                "markerEnd": {"type": "arrow", "height": "20px", "width": "20px"}
            }]
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_dag"], json!(true));
    }

    #[tokio::test]
    async fn non_string_identifiers_are_dropped() {
        let (status, body) = parse(json!({
            "nodes": [{"id": "A"}],
            "edges": [{"source": "A", "target": 5}]
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"num_nodes": 1, "num_edges": 1, "is_dag": true}));

        let (status, body) = parse(json!({
            "nodes": [{"id": "A"}, {"id": 7}],
            "edges": []
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"num_nodes": 1, "num_edges": 0, "is_dag": true}));
    }

    // ── rejections ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, body) = post_parse(app(), "{\"nodes\": [".to_owned()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn wrong_shape_is_422() {
        let (status, body) = parse(json!({"nodes": {"id": "A"}, "edges": []})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn record_that_is_not_an_object_is_422() {
        let (status, _) = parse(json!({"nodes": ["A"], "edges": []})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_edges_key_is_422() {
        let (status, _) = parse(json!({"nodes": []})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_content_type_is_415() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/pipelines/parse")
            .body(Body::from(r#"{"nodes":[],"edges":[]}"#))
            .expect("request");
        let resp = app().oneshot(req).await.expect("infallible");
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn oversized_body_is_413() {
        let small = router(&ServerConfig {
            max_body_size: 16,
            ..config()
        })
        .expect("valid config");
        let body = json!({"nodes": [], "edges": []}).to_string() + "      ";
        let (status, _) = post_parse(small, body).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn get_on_parse_is_405() {
        let req = Request::builder()
            .uri("/pipelines/parse")
            .body(Body::empty())
            .expect("request");
        let resp = app().oneshot(req).await.expect("infallible");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    // ── CORS ─────────────────────────────────────────────────────────────────

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/pipelines/parse")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn preflight_from_editor_is_allowed() {
        let resp = app().oneshot(preflight(EDITOR)).await.expect("infallible");
        let headers = resp.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static(EDITOR))
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&HeaderValue::from_static("true"))
        );
    }

    #[tokio::test]
    async fn preflight_from_unknown_origin_gets_no_allow_header() {
        let resp = app()
            .oneshot(preflight("http://evil.test"))
            .await
            .expect("infallible");
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn wildcard_origin_is_rejected() {
        let err = router(&ServerConfig {
            allow_origins: vec!["*".to_owned()],
            ..config()
        })
        .expect_err("wildcard with credentials");
        assert!(matches!(err, CliError::InvalidOrigin { .. }));
    }

    #[test]
    fn unprintable_origin_is_rejected() {
        let err = router(&ServerConfig {
            allow_origins: vec!["http://a.test\n".to_owned()],
            ..config()
        })
        .expect_err("newline is not a header value");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn addr_joins_host_and_port() {
        let cfg = ServerConfig {
            port: 8000,
            ..config()
        };
        assert_eq!(cfg.addr(), "127.0.0.1:8000");
    }
}
