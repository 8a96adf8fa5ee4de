use std::io::Write;
use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::AnalysisOutcome;
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
const FILE_FIELD: &str = "resume";

/// POST /api/v1/resume/upload
///
/// Stages the upload in a temp file that keeps the original extension, runs
/// the analyzer on it, and removes the file whether analysis succeeded or not.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::Validation("No file part in the request".to_string()))?;
    if file_name.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }

    info!("Analyzing upload '{}' ({} bytes)", file_name, bytes.len());

    let suffix = Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let upload_dir = state.config.upload_dir.clone();
    let analyzer = state.analyzer.clone();

    // Parsing and recognition are CPU-bound; the temp file is dropped (and
    // deleted) at the end of the closure on every path.
    let outcome = tokio::task::spawn_blocking(move || -> Result<AnalysisOutcome, AppError> {
        let mut staged = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(&upload_dir)
            .context("Failed to create temporary upload file")?;
        staged
            .write_all(&bytes)
            .and_then(|_| staged.flush())
            .context("Failed to write temporary upload file")?;

        Ok(analyzer.analyze(staged.path())?)
    })
    .await
    .context("Analysis task panicked")??;

    Ok(Json(outcome))
}
