//! HTTP surface: JSON and SSE endpoints with permissive CORS

pub mod cors;
pub mod handlers;
pub mod sse;
pub mod state;
pub mod types;

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
pub use state::AppState;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the API router with all routes
pub fn router(state: AppState) -> Router {
    let body_limit = state.limits.max_request_body_bytes();

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/generate-readme", post(handlers::generate_readme_handler))
        .route(
            "/generate-readme-from-files",
            post(handlers::generate_from_files_handler),
        )
        .fallback(handlers::not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(cors::cors_middleware))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

/// Serve the router on `addr` until `shutdown` resolves
pub async fn serve(
    state: AppState,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("GitMe API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("GitMe API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use gitme_domain::{ATTRIBUTION_LINE, PipelineLimits};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;

    const GEMINI_PATH: &str = "/v1beta/models/gemini-2.0-flash-exp:generateContent";

    struct Upstreams {
        github: mockito::ServerGuard,
        gemini: mockito::ServerGuard,
    }

    impl Upstreams {
        async fn start() -> Self {
            Self {
                github: mockito::Server::new_async().await,
                gemini: mockito::Server::new_async().await,
            }
        }

        fn state(&self) -> AppState {
            let mut config = AppConfig::default();
            config.github.api_url = self.github.url();
            config.providers.gemini.base_url = self.gemini.url();
            config.providers.gemini.api_key = Some("g".to_string());
            config.providers.groq.base_url = self.gemini.url();
            config.retry.base_delay_ms = 1;
            config.limits.summary_delay_ms = 0;
            AppState::from_config(&config).unwrap()
        }

        async fn gemini_replies(&mut self, text: &str) {
            let body = json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] });
            self.gemini
                .mock("POST", GEMINI_PATH)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .create_async()
                .await;
        }
    }

    fn readme() -> String {
        format!("# demo\n\n{ATTRIBUTION_LINE}")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn sse_messages(response: Response) -> Vec<Value> {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .lines()
            .filter_map(|line| line.strip_prefix("data: "))
            .map(|data| serde_json::from_str(data).unwrap())
            .collect()
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "authorization, x-client-info, apikey, content-type"
        );
    }

    #[tokio::test]
    async fn test_health() {
        let upstreams = Upstreams::start().await;
        let fixture = router(upstreams.state());

        let response = fixture
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let actual = body_json(response).await;
        let expected = json!({ "status": "healthy", "version": env!("CARGO_PKG_VERSION") });
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_preflight_returns_empty_ok() {
        let upstreams = Upstreams::start().await;
        let fixture = router(upstreams.state());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/generate-readme")
            .body(Body::empty())
            .unwrap();

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_from_files_requires_repo_name() {
        let upstreams = Upstreams::start().await;
        let fixture = router(upstreams.state());
        let request = post_json(
            "/generate-readme-from-files",
            json!({ "files": [], "repoInfo": { "name": "" } }),
        );

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response);
        let actual = body_json(response).await;
        assert_eq!(actual["code"], "VALIDATION_ERROR");
        assert_eq!(actual["error"], "repoInfo.name is required");
        assert!(actual["request_id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let upstreams = Upstreams::start().await;
        let fixture = router(upstreams.state());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/generate-readme-from-files")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let actual = body_json(response).await;
        assert_eq!(actual["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_from_files_returns_readme() {
        let mut upstreams = Upstreams::start().await;
        upstreams.gemini_replies(&readme()).await;
        let fixture = router(upstreams.state());
        let request = post_json(
            "/generate-readme-from-files",
            json!({
                "files": [
                    { "path": "src/main.rs", "content": "fn main() {}" },
                    { "path": "Cargo.toml", "content": "[package]" }
                ],
                "repoInfo": { "name": "demo", "language": "Rust", "stars": 3, "forks": 1 },
                "metadata": { "license": "MIT" }
            }),
        );

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let actual = body_json(response).await;
        let expected = json!({ "readme": readme() });
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_from_files_provider_failure_is_bad_gateway() {
        let mut upstreams = Upstreams::start().await;
        upstreams
            .gemini
            .mock("POST", GEMINI_PATH)
            .with_status(500)
            .create_async()
            .await;
        let fixture = router(upstreams.state());
        let request = post_json(
            "/generate-readme-from-files",
            json!({ "files": [{ "path": "a.rs", "content": "" }], "repoInfo": { "name": "demo" } }),
        );

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let actual = body_json(response).await;
        assert_eq!(actual["code"], "AI_PROVIDER_ERROR");
        assert_eq!(
            actual["error"],
            "Both AI providers failed: Gemini API error: 500; Groq API key not configured"
        );
    }

    #[tokio::test]
    async fn test_from_files_accepts_body_at_fetch_bounds() {
        let mut upstreams = Upstreams::start().await;
        upstreams.gemini_replies(&readme()).await;
        let fixture = router(upstreams.state());
        let limits = PipelineLimits::default();
        let files: Vec<Value> = (0..limits.max_fetched_files)
            .map(|i| {
                json!({
                    "path": format!("src/f{i}.txt"),
                    "content": "中".repeat(limits.max_file_chars),
                })
            })
            .collect();
        let request = post_json(
            "/generate-readme-from-files",
            json!({ "files": files, "repoInfo": { "name": "demo" } }),
        );

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let actual = body_json(response).await;
        assert_eq!(actual, json!({ "readme": readme() }));
    }

    #[tokio::test]
    async fn test_oversized_body_is_payload_too_large() {
        let upstreams = Upstreams::start().await;
        let mut state = upstreams.state();
        state.limits = PipelineLimits::default().max_fetched_files(1).max_file_chars(10);
        let content = "a".repeat(state.limits.max_request_body_bytes());
        let fixture = router(state);
        let request = post_json(
            "/generate-readme-from-files",
            json!({
                "files": [{ "path": "a.txt", "content": content }],
                "repoInfo": { "name": "demo" },
            }),
        );

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_cors(&response);
        let actual = body_json(response).await;
        assert_eq!(actual["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_stream_rejects_invalid_url_before_streaming() {
        let upstreams = Upstreams::start().await;
        let fixture = router(upstreams.state());
        let request = post_json("/generate-readme", json!({ "repoUrl": "https://gitlab.com/a/b" }));

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let actual = body_json(response).await;
        assert_eq!(actual["code"], "INVALID_REPOSITORY_URL");
        assert_eq!(actual["error"], "Invalid GitHub URL format: https://gitlab.com/a/b");
    }

    #[tokio::test]
    async fn test_stream_requires_repo_url() {
        let upstreams = Upstreams::start().await;
        let fixture = router(upstreams.state());

        let response = fixture
            .oneshot(post_json("/generate-readme", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let actual = body_json(response).await;
        assert_eq!(actual["error"], "repoUrl is required");
    }

    #[tokio::test]
    async fn test_stream_emits_logs_then_complete() {
        let mut upstreams = Upstreams::start().await;
        upstreams
            .github
            .mock("GET", "/repos/octo/demo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"demo","default_branch":"main"}"#)
            .create_async()
            .await;
        upstreams
            .github
            .mock("GET", "/repos/octo/demo/git/trees/main")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tree":[{"path":"README.md","type":"blob","sha":"r"}]}"#)
            .create_async()
            .await;
        upstreams
            .github
            .mock("GET", "/repos/octo/demo/git/blobs/r")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":"IyBEZW1v","encoding":"base64"}"#)
            .create_async()
            .await;
        upstreams.gemini_replies(&readme()).await;
        let fixture = router(upstreams.state());
        let request =
            post_json("/generate-readme", json!({ "repoUrl": "https://github.com/octo/demo" }));

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
        let actual = sse_messages(response).await;
        assert_eq!(
            actual.first(),
            Some(&json!({
                "type": "log",
                "message": "Starting README generation...",
                "logType": "info",
            }))
        );
        assert_eq!(
            actual.last(),
            Some(&json!({ "type": "complete", "readme": readme() }))
        );
        assert!(actual[..actual.len() - 1].iter().all(|m| m["type"] == "log"));
        assert!(actual.iter().any(|m| m["message"] == "README generated successfully!"));
    }

    #[tokio::test]
    async fn test_stream_reports_missing_repository_as_error_event() {
        let mut upstreams = Upstreams::start().await;
        upstreams
            .github
            .mock("GET", "/repos/octo/missing")
            .with_status(404)
            .create_async()
            .await;
        let fixture = router(upstreams.state());
        let request =
            post_json("/generate-readme", json!({ "repoUrl": "https://github.com/octo/missing" }));

        let response = fixture.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let actual = sse_messages(response).await;
        let terminal: Vec<_> = actual.iter().filter(|m| m["type"] != "log").collect();
        assert_eq!(
            terminal,
            vec![&json!({
                "type": "error",
                "message": "Repository not found or not accessible: octo/missing (HTTP 404)"
            })]
        );
    }
}
