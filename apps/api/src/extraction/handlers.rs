//! Axum route handlers for resume data extraction.
//!
//! Pipeline per request: validate input → prompt + inlined document →
//! generative model → JSON repair → typed parse. Repair and parse failures
//! are distinct, terminal errors; the bounded retries inside the LLM client
//! are the only resilience.

use axum::{extract::State, Json};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::sessions::AuthUser;
use crate::errors::AppError;
use crate::extraction::prompts::{EDUCATION_EXTRACTION_PROMPT, EMPLOYMENT_EXTRACTION_PROMPT};
use crate::llm_client::repair::repair_json_array;
use crate::llm_client::{block_none_safety, InlineDocument, ResponseFormat};
use crate::state::AppState;

/// Media types the extraction endpoint accepts for inlined documents.
const REGISTERED_MEDIA_TYPES: [&str; 6] = [
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "image/png",
    "image/jpeg",
    "image/webp",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    /// Base64-encoded document bytes.
    pub file_data: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedJob {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAccreditation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub institute: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub year: String,
}

/// POST /api/v1/extract/employment
pub async fn handle_extract_employment(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<Vec<ExtractedJob>>, AppError> {
    let repaired = run_extraction(&state, &request, EMPLOYMENT_EXTRACTION_PROMPT).await?;
    let jobs: Vec<ExtractedJob> = serde_json::from_str(&repaired)
        .map_err(|e| AppError::ModelContract(format!("invalid employment history JSON: {e}")))?;
    Ok(Json(jobs))
}

/// POST /api/v1/extract/education
pub async fn handle_extract_education(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<Vec<ExtractedAccreditation>>, AppError> {
    let repaired = run_extraction(&state, &request, EDUCATION_EXTRACTION_PROMPT).await?;
    let items: Vec<ExtractedAccreditation> = serde_json::from_str(&repaired)
        .map_err(|e| AppError::ModelContract(format!("invalid education JSON: {e}")))?;
    Ok(Json(items))
}

/// Shared extraction pipeline: input checks, model call, JSON repair.
/// Returns the repaired array substring for the caller to parse.
async fn run_extraction(
    state: &AppState,
    request: &ExtractRequest,
    prompt: &str,
) -> Result<String, AppError> {
    validate_document(request)?;

    let document = InlineDocument {
        mime_type: request.mime_type.clone(),
        data: request.file_data.clone(),
    };

    let output = state
        .llm
        .generate(
            prompt,
            Some(&document),
            block_none_safety(),
            ResponseFormat::Json,
        )
        .await?;

    if output.finish_reason.as_deref() != Some("STOP") {
        warn!(
            "Extraction completed with reason {:?}; output may be truncated",
            output.finish_reason
        );
    }

    Ok(repair_json_array(&output.text)?)
}

/// Caller-input checks, raised before any network call.
fn validate_document(request: &ExtractRequest) -> Result<(), AppError> {
    if request.file_data.is_empty() {
        return Err(AppError::Validation("fileData is required".to_string()));
    }
    if !REGISTERED_MEDIA_TYPES.contains(&request.mime_type.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported mimeType '{}'",
            request.mime_type
        )));
    }
    let decoded = BASE64
        .decode(&request.file_data)
        .map_err(|_| AppError::Validation("fileData must be valid base64".to_string()))?;
    if decoded.is_empty() {
        return Err(AppError::Validation("fileData must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(file_data: &str, mime_type: &str) -> ExtractRequest {
        ExtractRequest {
            file_data: file_data.to_string(),
            mime_type: mime_type.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_registered_types() {
        let encoded = BASE64.encode(b"%PDF-1.4 ...");
        assert!(validate_document(&request(&encoded, "application/pdf")).is_ok());
        assert!(validate_document(&request(&encoded, "image/png")).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_and_bad_input() {
        let encoded = BASE64.encode(b"data");
        assert!(validate_document(&request("", "application/pdf")).is_err());
        assert!(validate_document(&request(&encoded, "application/x-msdownload")).is_err());
        assert!(validate_document(&request("not base64!!", "application/pdf")).is_err());
        assert!(validate_document(&request("", "text/plain")).is_err());
    }

    #[test]
    fn test_extracted_job_parses_model_shape() {
        let raw = r#"[{
            "company": "Acme Corp",
            "jobTitle": "Staff Accountant",
            "startDate": "Jan 2019",
            "endDate": "Present",
            "city": "Singapore",
            "description": "Monthly close and reporting"
        }]"#;
        let jobs: Vec<ExtractedJob> = serde_json::from_str(raw).unwrap();
        assert_eq!(jobs[0].job_title, "Staff Accountant");
        assert_eq!(jobs[0].end_date, "Present");
    }

    #[test]
    fn test_extracted_job_tolerates_missing_keys() {
        let jobs: Vec<ExtractedJob> =
            serde_json::from_str(r#"[{"company":"Acme Corp"}]"#).unwrap();
        assert!(jobs[0].end_date.is_empty());
    }

    #[test]
    fn test_extracted_accreditation_parses_model_shape() {
        let raw = r#"[{"name":"BSc Accountancy","institute":"NUS","location":"Singapore","year":"2014"}]"#;
        let items: Vec<ExtractedAccreditation> = serde_json::from_str(raw).unwrap();
        assert_eq!(items[0].institute, "NUS");
    }
}
