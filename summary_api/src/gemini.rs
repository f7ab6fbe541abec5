//! Minimal client for the Gemini `generateContent` endpoint.

use redact::Secret;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<Secret<String>>,
    model: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("GOOGLE_API_KEY is not configured")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("prompt was blocked: {0}")]
    Blocked(String),
    #[error("response finished without text: {0}")]
    FinishedWithoutText(String),
    #[error("response contained no candidates")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(
        http: reqwest::Client,
        api_key: Option<Secret<String>>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key,
            model: model.into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends `prompt` as a single user turn and returns the text of the
    /// first candidate. Multiple parts are concatenated.
    pub async fn generate_content(
        &self,
        prompt: &str,
    ) -> Result<String, GeminiError> {
        let api_key = self
            .api_key
            .as_ref()
            .map(Secret::expose_secret)
            .filter(|key| !key.is_empty())
            .ok_or(GeminiError::MissingApiKey)?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(
                |e| tracing::error!(error = %e, "Failed to make http request"),
            )?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map_or(text, |body| body.error.message);
            return Err(GeminiError::Api { status, message });
        }

        let response = resp.json::<GenerateContentResponse>().await?;

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Err(response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map_or(GeminiError::EmptyResponse, GeminiError::Blocked));
        };

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GeminiError::FinishedWithoutText(
                candidate
                    .finish_reason
                    .unwrap_or_else(|| "unknown".to_string()),
            ));
        }

        let finish_reason = candidate.finish_reason.as_deref().unwrap_or("");
        tracing::debug!(finish_reason, "generated content");

        Ok(text)
    }
}
