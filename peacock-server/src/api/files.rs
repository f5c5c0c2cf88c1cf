//! Streaming audio files and revealing them in the platform file manager

use axum::{
    Router,
    body::Body,
    extract::{Path, Request, State},
    http::{HeaderValue, header},
    response::Response,
    routing::{get, post},
    Json,
};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tokio::process::Command;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::paths::resolve_within;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct OpenResponse {
    pub success: bool,
}

/// Content type for an audio file, by extension.
pub fn mime_type(path: &Utf8Path) -> &'static str {
    let ext = path.extension().map(str::to_lowercase);
    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("wav") => "audio/wav",
        Some("aac") => "audio/aac",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("m4v") => "video/x-m4v",
        _ => "application/octet-stream",
    }
}

/// Look up a file by bare name and confine it to the library root.
async fn library_file(state: &AppState, filename: &str) -> ApiResult<Utf8PathBuf> {
    let library = state.library.read().await;
    let record = library
        .find_by_filename(filename)
        .ok_or_else(|| ApiError::NotFound(format!("File not found: {filename}")))?;

    Ok(resolve_within(library.root(), &record.file_path)?)
}

/// GET /api/audio/*filename
///
/// Range requests are handled by `ServeFile`.
pub async fn serve_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> ApiResult<Response> {
    let path = library_file(&state, &filename).await?;
    debug!("Streaming {}", path);

    let response = match ServeFile::new(path.as_std_path())
        .oneshot(request)
        .await
    {
        Ok(response) => response,
        Err(never) => match never {},
    };

    let mut response = response.map(Body::new);
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(mime_type(&path)),
    );
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(response)
}

/// POST /api/open/*filename
pub async fn reveal_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Json<OpenResponse>> {
    let path = library_file(&state, &filename).await?;

    let status = reveal_command(&path)
        .status()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to open file manager: {e}")))?;

    if !status.success() {
        warn!("File manager exited with {} for {}", status, path);
        return Err(ApiError::Internal(format!("File manager exited with {status}")));
    }

    Ok(Json(OpenResponse { success: true }))
}

fn reveal_command(path: &Utf8Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg("-R").arg(path.as_str());
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("explorer");
        cmd.arg(format!("/select,{path}"));
        cmd
    } else {
        // xdg-open cannot select a file, so open its folder
        let folder = path.parent().unwrap_or(path);
        let mut cmd = Command::new("xdg-open");
        cmd.arg(folder.as_str());
        cmd
    }
}

pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/api/audio/*filename", get(serve_audio))
        .route("/api/open/*filename", post(reveal_file))
}
