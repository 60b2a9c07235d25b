//! Resume file upload.
//!
//! The file is streamed to blob storage first; the profile row's
//! `resume_url` is only written once the upload has resolved.

use aws_sdk_s3::primitives::ByteStream;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::auth::sessions::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub resume_url: String,
}

/// POST /api/v1/profile/resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Option<String>, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(sanitize_file_name) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, content_type, data));
        break;
    }

    let Some((file_name, content_type, data)) = upload else {
        return Err(AppError::Validation(
            "The upload must include a file field".to_string(),
        ));
    };
    if file_name.is_empty() || data.is_empty() {
        return Err(AppError::Validation("The uploaded file is empty".to_string()));
    }

    let key = format!("resumes/{}/{}", user.id, file_name);
    let mut request = state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .body(ByteStream::from(data.to_vec()));
    if let Some(content_type) = &content_type {
        request = request.content_type(content_type);
    }
    request
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    let resume_url = format!(
        "{}/{}/{}",
        state.config.s3_endpoint.trim_end_matches('/'),
        state.config.s3_bucket,
        key
    );

    // Store write waits on the storage write above.
    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, resume_url) VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET resume_url = EXCLUDED.resume_url, updated_at = now()
        "#,
    )
    .bind(user.id)
    .bind(&resume_url)
    .execute(&state.db)
    .await?;

    tracing::info!("Stored resume for user {} at {}", user.id, key);

    Ok(Json(UploadResponse { resume_url }))
}

/// Keeps the original file name but strips anything path-like.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_file_name("resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_file_name("C:\\cv.docx"), "C__cv.docx");
    }
}
