//! Minimal REST client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::EnrichError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

const TEMPERATURE: f64 = 0.1;
const MAX_OUTPUT_TOKENS: u32 = 500;
/// Error bodies are echoed into logs; keep them short.
const MAX_ERROR_BODY_CHARS: usize = 300;

pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: serde_json::Value,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// See [`GeminiClient::with_base_url`].
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, EnrichError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`EnrichError::InvalidBaseUrl`] if `base_url` and `model` do not form
    /// a valid endpoint.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, EnrichError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let invalid = |reason: String| EnrichError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("v1beta/models/{model}:generateContent")))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Sends one prompt and returns the model's text reply.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::Http`] on network failure or timeout.
    /// - [`EnrichError::ModelStatus`] on a non-2xx response.
    /// - [`EnrichError::Parse`] if the response envelope is malformed.
    /// - [`EnrichError::EmptyReply`] when no candidate carries text.
    pub async fn generate(&self, prompt: &str) -> Result<String, EnrichError> {
        let request = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [TextPart { text: prompt }],
            }],
            generation_config: json!({
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            }),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::ModelStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)?;
        parsed.into_text().ok_or(EnrichError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_model_and_method() {
        let client = GeminiClient::with_base_url("k", "gemini-2.0-flash", 5, "http://localhost:9/")
            .expect("client");
        assert_eq!(
            client.endpoint.as_str(),
            "http://localhost:9/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn reply_text_concatenates_first_candidate_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"price\": "}, {"text": "12.5}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .expect("parse");
        assert_eq!(response.into_text().as_deref(), Some("{\"price\": 12.5}"));
    }

    #[test]
    fn reply_without_candidates_has_no_text() {
        let response: GenerateResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}}))
                .expect("parse");
        assert!(response.into_text().is_none());
    }

    #[test]
    fn whitespace_reply_has_no_text() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  \n"}]}}]
        }))
        .expect("parse");
        assert!(response.into_text().is_none());
    }
}
