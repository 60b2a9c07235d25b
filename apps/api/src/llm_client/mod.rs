/// LLM Client — the single point of entry for all generative-model calls in
/// the Skillproof API.
///
/// ARCHITECTURAL RULE: No other module may call the model API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod repair;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";
/// Sized for long resumes — extraction output can run to dozens of positions.
const MAX_OUTPUT_TOKENS: u32 = 8192;
const TEMPERATURE: f32 = 0.4;
const TOP_P: f32 = 1.0;
const TOP_K: u32 = 32;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Model returned no text content")]
    EmptyContent,
}

/// A document inlined into the request alongside the instruction text.
/// `data` carries the raw bytes base64-encoded, exactly as the wire expects.
#[derive(Debug, Clone)]
pub struct InlineDocument {
    pub mime_type: String,
    pub data: String,
}

/// Requested response format. The JSON hint nudges the model towards raw
/// JSON output, but the repair pass still assumes it may be violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Text,
}

impl ResponseFormat {
    fn mime_type(self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Text => "text/plain",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

/// Content filters fully relaxed — resumes routinely trip false positives
/// (security roles, defense industry, medical history).
pub fn block_none_safety() -> Vec<SafetySetting> {
    [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: "BLOCK_NONE",
    })
    .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<RequestInlineData<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestInlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's text parts.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let parts = &candidate.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// What a successful call yields: the model's raw textual output and its
/// self-reported completion reason (e.g. "STOP", "MAX_TOKENS").
#[derive(Debug, Clone)]
pub struct ModelOutput {
    pub text: String,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client used by all services.
/// Wraps the generateContent API with a timeout and bounded retry policy.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a generateContent call, optionally inlining a document after the
    /// instruction text. Retries on 429 (rate limit) and 5xx errors with
    /// exponential backoff; all other non-success statuses fail immediately.
    pub async fn generate(
        &self,
        prompt: &str,
        document: Option<&InlineDocument>,
        safety_settings: Vec<SafetySetting>,
        format: ResponseFormat,
    ) -> Result<ModelOutput, LlmError> {
        let mut parts = vec![RequestPart {
            text: Some(prompt),
            inline_data: None,
        }];
        if let Some(doc) = document {
            parts.push(RequestPart {
                text: None,
                inline_data: Some(RequestInlineData {
                    mime_type: &doc.mime_type,
                    data: &doc.data,
                }),
            });
        }

        let request_body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                response_mime_type: format.mime_type(),
            },
            safety_settings,
        };

        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse the structured error message
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GenerateResponse = response.json().await?;
            let finish_reason = parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone());
            let text = parsed.text().ok_or(LlmError::EmptyContent)?;

            debug!(
                "LLM call succeeded: {} chars, finish_reason={:?}",
                text.len(),
                finish_reason
            );

            return Ok(ModelOutput {
                text,
                finish_reason,
            });
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case_with_inline_data() {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![
                    RequestPart {
                        text: Some("extract"),
                        inline_data: None,
                    },
                    RequestPart {
                        text: None,
                        inline_data: Some(RequestInlineData {
                            mime_type: "application/pdf",
                            data: "aGVsbG8=",
                        }),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                response_mime_type: "application/json",
            },
            safety_settings: block_none_safety(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(json["generationConfig"]["topK"], 32);
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "application/pdf"
        );
        assert_eq!(json["safetySettings"][0]["threshold"], "BLOCK_NONE");
        // Text part must not carry a null inlineData key
        assert!(json["contents"][0]["parts"][0].get("inlineData").is_none());
    }

    #[test]
    fn test_empty_safety_settings_omitted() {
        let request = GenerateRequest {
            contents: vec![],
            generation_config: GenerationConfig {
                max_output_tokens: 1,
                temperature: 0.0,
                top_p: 1.0,
                top_k: 1,
                response_mime_type: "text/plain",
            },
            safety_settings: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("safetySettings").is_none());
    }

    #[test]
    fn test_response_text_concatenates_first_candidate_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "[{\"a\""}, {"text": ":1}]"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("[{\"a\":1}]"));
        assert_eq!(
            parsed.candidates[0].finish_reason.as_deref(),
            Some("STOP")
        );
    }

    #[test]
    fn test_response_without_candidates_yields_no_text() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.text().is_none());
    }
}
