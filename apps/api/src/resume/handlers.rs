//! Axum route handler for resume uploads.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ParsedContact;
use crate::resume::document::{parse_resume, DocumentError, DocumentKind};

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ResumeParseResponse {
    pub success: bool,
    pub data: ParsedContact,
}

struct Upload {
    filename: String,
    data: Bytes,
}

/// POST /api/v1/resume/parse
///
/// Accepts a multipart `file` (PDF or DOCX) and returns the contact fields
/// found in it together with the extracted text.
pub async fn handle_parse_resume(
    mut multipart: Multipart,
) -> Result<Json<ResumeParseResponse>, AppError> {
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    if upload.filename.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    let kind = DocumentKind::from_filename(&upload.filename).ok_or_else(|| {
        AppError::Validation("Unsupported file type. Please upload PDF or DOCX file.".to_string())
    })?;
    let suffix = Path::new(&upload.filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();

    info!(
        "Parsing resume upload {} ({} bytes)",
        upload.filename,
        upload.data.len()
    );

    let contact = tokio::task::spawn_blocking(move || parse_upload(&upload.data, kind, &suffix))
        .await
        .context("Resume parsing task failed")??;

    Ok(Json(ResumeParseResponse {
        success: true,
        data: contact,
    }))
}

/// Returns the first part named `file`, if any.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        return Ok(Some(Upload { filename, data }));
    }
    Ok(None)
}

/// Spools the upload to a temporary file (removed on drop) and parses it.
fn parse_upload(
    data: &[u8],
    kind: DocumentKind,
    suffix: &str,
) -> Result<ParsedContact, DocumentError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(data)?;
    file.flush()?;
    parse_resume(file.path(), kind)
}
