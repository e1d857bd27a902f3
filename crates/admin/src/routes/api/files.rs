//! File upload handler (product images, registration documents).

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
};
use tracing::instrument;

use crate::{error::AppError, middleware::RequireStaff, shopify::UploadedFile, state::AppState};

/// Largest file accepted.
const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/files", post(upload))
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 64 * 1024))
}

#[derive(Debug, Default)]
struct UploadForm {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
    alt: Option<String>,
}

fn multipart_error(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("Multipart error: {e}"))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    let mut has_file = false;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                form.filename = field.file_name().unwrap_or("upload").to_string();
                form.mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                form.bytes = field.bytes().await.map_err(multipart_error)?.to_vec();
                has_file = true;
            }
            Some("alt") => {
                let alt = field.text().await.map_err(multipart_error)?;
                form.alt = Some(alt).filter(|a| !a.trim().is_empty());
            }
            _ => {}
        }
    }

    if !has_file {
        return Err(AppError::BadRequest("No file provided".to_string()));
    }
    if form.bytes.is_empty() {
        return Err(AppError::BadRequest("Empty file".to_string()));
    }
    if form.bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large: {} bytes (max {MAX_FILE_SIZE})",
            form.bytes.len()
        )));
    }
    Ok(form)
}

/// Stage, upload and register a file with Shopify.
#[instrument(skip(_actor, state, multipart))]
pub async fn upload(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedFile>), AppError> {
    let form = read_form(multipart).await?;
    let file = state
        .shopify()
        .upload_file(&form.filename, &form.mime_type, form.bytes, form.alt.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(file)))
}
