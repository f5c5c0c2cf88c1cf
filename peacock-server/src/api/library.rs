//! Library listing and directory switching

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use camino::Utf8PathBuf;
use peacock_core::record::AudioMetadataRecord;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub default_path: Utf8PathBuf,
    pub report_title: String,
    pub file_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChangeDirectoryRequest {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChangeDirectoryResponse {
    pub success: bool,
    pub path: Utf8PathBuf,
    pub file_count: usize,
    pub audio_data: Vec<AudioMetadataRecord>,
}

/// GET /api/config
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let library = state.library.read().await;
    let config = state.config.read().await;

    Json(ConfigResponse {
        default_path: library.root().to_path_buf(),
        report_title: config.report.title.clone(),
        file_count: library.len(),
    })
}

/// GET /api/library
pub async fn get_library(State(state): State<AppState>) -> Json<Vec<AudioMetadataRecord>> {
    Json(state.library.read().await.records().to_vec())
}

/// POST /api/change_directory
///
/// Rescans the new directory and replaces the library. The old library
/// stays in place if the scan fails.
pub async fn change_directory(
    State(state): State<AppState>,
    Json(request): Json<ChangeDirectoryRequest>,
) -> ApiResult<Json<ChangeDirectoryResponse>> {
    let path = request
        .path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No path provided".to_string()))?;

    let path = Utf8PathBuf::from(path);
    if !path.exists() {
        return Err(ApiError::NotFound(format!("Directory does not exist: {path}")));
    }
    if !path.is_dir() {
        return Err(ApiError::BadRequest(format!("Path is not a directory: {path}")));
    }
    let root = path
        .canonicalize_utf8()
        .map_err(|e| ApiError::Internal(format!("Failed to resolve {path}: {e}")))?;

    // Held across the scan so no title write lands in a library that is
    // about to be replaced
    let mut library = state.library.write().await;

    let report = state.scan(root.clone()).await?;
    state.remember_root(&root).await;

    info!("Library directory changed to {} ({} files)", root, report.records.len());
    library.replace(root.clone(), report.into_records());

    Ok(Json(ChangeDirectoryResponse {
        success: true,
        path: root,
        file_count: library.len(),
        audio_data: library.records().to_vec(),
    }))
}

pub fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/api/config", get(get_config))
        .route("/api/library", get(get_library))
        .route("/api/change_directory", post(change_directory))
}
