//! Title suggestion and title writing

use axum::{Json, Router, extract::State, routing::post};
use camino::{Utf8Path, Utf8PathBuf};
use peacock_core::record::{BatchUpdateReport, TitleSuggestion, TitleUpdate, UpdateResult};
use peacock_library::TitleSuggester;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::paths::resolve_within;
use crate::state::Library;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TitleChange {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub new_title: Option<String>,
}

impl TitleChange {
    fn fields(&self) -> Option<(&str, &str)> {
        let file_path = self.file_path.as_deref().filter(|p| !p.is_empty())?;
        let new_title = self.new_title.as_deref().filter(|t| !t.is_empty())?;
        Some((file_path, new_title))
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplySuggestionsRequest {
    #[serde(default)]
    pub updates: Vec<TitleChange>,
}

#[derive(Debug, Serialize)]
pub struct UpdateTitleResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct FailedUpdate {
    pub file: Utf8PathBuf,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ApplySuggestionsResponse {
    pub success: bool,
    pub success_count: usize,
    pub failed_count: usize,
    pub errors: Vec<FailedUpdate>,
}

impl From<BatchUpdateReport> for ApplySuggestionsResponse {
    fn from(report: BatchUpdateReport) -> Self {
        let errors = report
            .failures()
            .map(|result| FailedUpdate {
                file: result.file_path.clone(),
                error: result.error.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            success: true,
            success_count: report.success_count,
            failed_count: report.failed_count,
            errors,
        }
    }
}

/// Resolve a requested path to the record path it refers to, refusing
/// anything outside the library root or not in the library.
fn locate(library: &Library, file_path: &str) -> ApiResult<Utf8PathBuf> {
    let requested = Utf8Path::new(file_path);
    let resolved = resolve_within(library.root(), requested)?;

    [requested, resolved.as_path()]
        .into_iter()
        .find_map(|path| library.get_by_path(path))
        .map(|record| record.file_path.clone())
        .ok_or_else(|| ApiError::NotFound(format!("File not in library: {file_path}")))
}

/// POST /api/update_title
pub async fn update_title(
    State(state): State<AppState>,
    Json(request): Json<TitleChange>,
) -> ApiResult<Json<UpdateTitleResponse>> {
    let (file_path, new_title) = request
        .fields()
        .ok_or_else(|| ApiError::BadRequest("Missing parameters".to_string()))?;

    let mut library = state.library.write().await;
    let path = locate(&library, file_path)?;

    let updater = state.updater();
    let title = new_title.to_string();
    let write_path = path.clone();
    let result = tokio::task::spawn_blocking(move || updater.update_one(&write_path, &title)).await?;

    if !result.success {
        let reason = result.error.unwrap_or_default();
        return Err(ApiError::Internal(format!("Failed to update file: {reason}")));
    }

    library.apply_title(&path, new_title);
    Ok(Json(UpdateTitleResponse { success: true }))
}

/// POST /api/suggest_titles
pub async fn suggest_titles(State(state): State<AppState>) -> Json<Vec<TitleSuggestion>> {
    let library = state.library.read().await;
    let suggestions = TitleSuggester::new().suggest_all(library.records());

    info!("Suggested {} title change(s)", suggestions.len());
    Json(suggestions)
}

/// POST /api/apply_title_suggestions
///
/// Entries that fail validation are reported as failures without reaching
/// the disk. The rest are written in order; only written titles are
/// mirrored in the library.
pub async fn apply_title_suggestions(
    State(state): State<AppState>,
    Json(request): Json<ApplySuggestionsRequest>,
) -> ApiResult<Json<ApplySuggestionsResponse>> {
    if request.updates.is_empty() {
        return Err(ApiError::BadRequest("No updates provided".to_string()));
    }

    let mut library = state.library.write().await;

    // Slot per request entry: rejected entries are filled now, accepted
    // ones once the batch has run
    let mut slots: Vec<Option<UpdateResult>> = Vec::with_capacity(request.updates.len());
    let mut accepted = Vec::new();
    for change in &request.updates {
        let located = change
            .fields()
            .ok_or_else(|| ApiError::BadRequest("Missing parameters".to_string()))
            .and_then(|(file_path, new_title)| {
                locate(&library, file_path).map(|path| TitleUpdate::new(path, new_title))
            });

        match located {
            Ok(update) => {
                accepted.push(update);
                slots.push(None);
            }
            Err(e) => {
                let file = change.file_path.clone().unwrap_or_default();
                slots.push(Some(UpdateResult::failed(file, e.to_string())));
            }
        }
    }

    let updater = state.updater();
    let (accepted, batch) = tokio::task::spawn_blocking(move || {
        let batch = updater.update_many(&accepted);
        (accepted, batch)
    })
    .await?;

    library.apply_results(&accepted, &batch.results);

    let mut written = batch.results.into_iter();
    let report: BatchUpdateReport = slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| written.next()))
        .collect();

    info!(
        "Applied title suggestions: {} updated, {} failed",
        report.success_count, report.failed_count
    );
    Ok(Json(report.into()))
}

pub fn title_routes() -> Router<AppState> {
    Router::new()
        .route("/api/update_title", post(update_title))
        .route("/api/suggest_titles", post(suggest_titles))
        .route("/api/apply_title_suggestions", post(apply_title_suggestions))
}
