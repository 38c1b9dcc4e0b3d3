//! # Gemini Analyzer
//!
//! [`GeminiAnalyzer`] sends the grading prompt and the essay image to Google's Gemini
//! `generateContent` endpoint and returns the text of the first candidate.
//!
//! ## Request
//!
//! ```json
//! {
//!   "contents": [{
//!     "parts": [
//!       { "text": "<prompt>" },
//!       { "inline_data": { "mime_type": "image/jpeg", "data": "<base64>" } }
//!     ]
//!   }]
//! }
//! ```
//!
//! The API key travels in the `x-goog-api-key` header, never in the URL, so it cannot end up in
//! error messages or logs. Timeouts come from `GEMINI_TIMEOUT_SECS`.

use crate::analyzer::EssayAnalyzer;
use crate::error::{AiError, AiResult};
use crate::prompt::PromptTemplate;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use util::config::AppConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Request body for the Gemini API.
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    /// Base64-encoded bytes.
    data: String,
}

/// Response from the Gemini API. Every field is optional: blocked prompts come back without
/// candidates, and a candidate stopped by safety filters has no content.
#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    prompt: PromptTemplate,
}

impl GeminiAnalyzer {
    /// Build the analyzer from the application configuration.
    ///
    /// # Errors
    /// * [`AiError::MissingApiKey`] when `GEMINI_API_KEY` is empty.
    /// * [`AiError::Http`] when the HTTP client cannot be created.
    pub fn from_config(config: &AppConfig, prompt: PromptTemplate) -> AiResult<Self> {
        let api_key = config.gemini_api_key.trim();
        if api_key.is_empty() {
            return Err(AiError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            prompt,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl EssayAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze(&self, image: &[u8], mime: &str) -> AiResult<String> {
        let body = build_request(self.prompt.text(), image, mime);

        tracing::info!(model = %self.model, bytes = image.len(), mime, "sending essay to Gemini");
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Gemini request failed");
            return Err(AiError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let parsed = serde_json::from_str::<GeminiResponse>(&response_text).map_err(|e| {
            AiError::InvalidResponse(format!(
                "error decoding response body: {e}. Full response: {response_text}"
            ))
        })?;

        let text = first_candidate_text(&parsed).ok_or(AiError::EmptyResponse)?;
        tracing::info!(chars = text.chars().count(), "Gemini analysis received");
        Ok(text)
    }
}

fn build_request<'a>(prompt: &'a str, image: &[u8], mime: &'a str) -> GeminiRequest<'a> {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text { text: prompt },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime,
                        data: B64.encode(image),
                    },
                },
            ],
        }],
    }
}

/// Concatenated text parts of the first candidate, `None` when there is no non-blank text.
fn first_candidate_text(response: &GeminiResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_prompt_then_inline_image() {
        let request = build_request("Corrija", &[1, 2, 3], "image/png");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        { "text": "Corrija" },
                        { "inline_data": { "mime_type": "image/png", "data": "AQID" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "### Nome do Aluno\n" }, { "text": "Ana" }] } },
                { "content": { "parts": [{ "text": "ignorado" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(first_candidate_text(&response).as_deref(), Some("### Nome do Aluno\nAna"));
    }

    #[test]
    fn blocked_or_empty_answers_have_no_text() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] }),
        ] {
            let response: GeminiResponse = serde_json::from_value(body).unwrap();
            assert!(first_candidate_text(&response).is_none());
        }
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let config = AppConfig::default();
        let err = GeminiAnalyzer::from_config(&config, PromptTemplate::from_text("p")).unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey));
    }

    #[test]
    fn endpoint_uses_configured_model_and_base() {
        let config = AppConfig {
            gemini_api_key: "k".into(),
            gemini_base_url: "http://localhost:9999/v1beta/".into(),
            ..AppConfig::default()
        };
        let analyzer = GeminiAnalyzer::from_config(&config, PromptTemplate::from_text("p")).unwrap();
        assert_eq!(
            analyzer.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
    }
}
