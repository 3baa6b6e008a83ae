use std::convert::Infallible;
use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use gitme_domain::{RepoReference, StreamMessage, TracingSink};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::warn;
use uuid::Uuid;

use super::sse::ChannelSink;
use super::state::AppState;
use super::types::{
    GenerateFromFilesRequest, GenerateReadmeRequest, HealthResponse, ReadmeResponse,
};
use crate::errors::{ApiError, ServerError};
use crate::{log_operation_error, log_operation_start, log_operation_success};

/// Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Streaming README generation from a repository URL
///
/// The URL is validated before the stream opens so malformed requests get a
/// JSON error instead of an event stream.
pub async fn generate_readme_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReadmeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let Json(request) = payload.map_err(|e| ServerError::from(e).with_request_id(&request_id))?;

    let repo_url = request.repo_url.trim().to_string();
    if repo_url.is_empty() {
        warn!(request_id = %request_id, "Rejected request without repoUrl");
        return Err(ServerError::validation("repoUrl", "repoUrl is required")
            .with_request_id(&request_id));
    }
    let reference = RepoReference::parse(&repo_url).map_err(|e| {
        ServerError::InvalidRepositoryUrl { url: e.url }.with_request_id(&request_id)
    })?;

    log_operation_start!(
        "generate_readme",
        request_id = request_id.as_str(),
        owner = reference.owner(),
        repo = reference.repo()
    );

    let (sender, receiver) = mpsc::unbounded_channel();
    let metadata = request.metadata.unwrap_or_default();
    let pipeline = state.pipeline.clone();
    let task_request_id = request_id.clone();

    tokio::spawn(async move {
        let start = Instant::now();
        let sink = ChannelSink::new(sender, task_request_id.as_str());

        match pipeline.generate_from_url(&repo_url, &metadata, &sink).await {
            Ok(readme) => {
                log_operation_success!(
                    "generate_readme",
                    start.elapsed(),
                    request_id = task_request_id.as_str(),
                    readme_chars = readme.len()
                );
                sink.send(StreamMessage::complete(readme));
            }
            Err(e) => {
                log_operation_error!("generate_readme", e, request_id = task_request_id.as_str());
                sink.send(StreamMessage::error(e.to_string()));
            }
        }
    });

    let stream = UnboundedReceiverStream::new(receiver)
        .map(|message| Ok::<_, Infallible>(sse_event(&message)));

    Ok((
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Sse::new(stream),
    )
        .into_response())
}

fn sse_event(message: &StreamMessage) -> Event {
    match serde_json::to_string(message) {
        Ok(data) => Event::default().data(data),
        Err(e) => Event::default().data(format!(
            r#"{{"type":"error","message":"Failed to encode event: {e}"}}"#
        )),
    }
}

/// Non-streaming README generation from caller-supplied files
pub async fn generate_from_files_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateFromFilesRequest>, JsonRejection>,
) -> Result<Json<ReadmeResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();
    let Json(request) = payload.map_err(|e| ServerError::from(e).with_request_id(&request_id))?;

    if request.repo_info.name.trim().is_empty() {
        return Err(ServerError::validation("repoInfo.name", "repoInfo.name is required")
            .with_request_id(&request_id));
    }
    if request.files.iter().any(|f| f.path.trim().is_empty()) {
        return Err(ServerError::validation("files", "Every file needs a non-empty path")
            .with_request_id(&request_id));
    }

    log_operation_start!(
        "generate_readme_from_files",
        request_id = request_id.as_str(),
        repo = request.repo_info.name.as_str(),
        file_count = request.files.len()
    );

    let metadata = request.metadata.unwrap_or_default();
    match state
        .pipeline
        .generate_from_files(&request.files, &request.repo_info, &metadata, &TracingSink)
        .await
    {
        Ok(readme) => {
            log_operation_success!(
                "generate_readme_from_files",
                start.elapsed(),
                request_id = request_id.as_str(),
                readme_chars = readme.len()
            );
            Ok(Json(ReadmeResponse { readme }))
        }
        Err(e) => {
            log_operation_error!("generate_readme_from_files", e, request_id = request_id.as_str());
            Err(ServerError::from(e).with_request_id(request_id))
        }
    }
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}
