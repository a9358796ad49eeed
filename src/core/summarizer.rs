// src/core/summarizer.rs

use serde_json::Value;
use tracing::{debug, error, info};

use crate::core::error::AnalysisError;
use crate::core::models::SiteSummary;

/// Google Generative Language API endpoint.
pub const DEFAULT_AI_BASE: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-3-flash-preview";

/// Adapter over the generative-AI collaborator.
///
/// The collaborator is opaque to the rest of the core: given a URL it returns
/// a `SiteSummary` or fails. Credentials are injected at construction rather
/// than read from the environment ad hoc, so a missing key is detectable
/// before any network call is made.
pub struct Summarizer {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Summarizer {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_AI_BASE, api_key)
    }

    /// Endpoint-injecting constructor for tests.
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    /// Whether a credential is present. The orchestrator checks this before
    /// launching any branch so a missing key is reported immediately.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Asks the AI collaborator for a summary and category of `url`.
    pub async fn summarize(&self, url: &str) -> Result<SiteSummary, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or(AnalysisError::MissingApiKey)?;

        info!(url, "Requesting content summary.");

        let prompt = format!(
            "Analyze the website {url}.\n\
             1. Provide a clear, objective and professional executive summary of its content.\n\
             2. Identify the main category (e.g. E-commerce, Blog, Institutional, Government, Portfolio, News).\n\
             3. Check whether the site appears to be active and what its main purpose is.\n\n\
             Return ONLY a JSON object with the keys \"summary\" and \"category\"."
        );

        let request_body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "summary": {
                            "type": "STRING",
                            "description": "Detailed summary of the site's content and purpose."
                        },
                        "category": {
                            "type": "STRING",
                            "description": "Simplified category of the site."
                        }
                    },
                    "required": ["summary", "category"]
                }
            }
        });

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, MODEL, api_key
        );

        let response = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(url, error = %e, "AI generation request failed.");
                AnalysisError::SummarizationFailed
            })?;

        if !response.status().is_success() {
            error!(url, status = %response.status(), "AI service returned a non-success status.");
            return Err(AnalysisError::SummarizationFailed);
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!(url, error = %e, "Could not parse the AI response body.");
            AnalysisError::SummarizationFailed
        })?;

        // The generated JSON is nested inside the first candidate's text part.
        let text = payload
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| {
                error!(url, "AI response contained no usable text.");
                AnalysisError::SummarizationFailed
            })?;

        debug!(url, bytes = text.len(), "Parsing generated summary.");

        let summary: SiteSummary = serde_json::from_str(text).map_err(|e| {
            error!(url, error = %e, "Generated text was not a valid summary object.");
            AnalysisError::SummarizationFailed
        })?;

        info!(url, category = %summary.category, "Content summary received.");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidate_with_text(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] }
            }]
        })
    }

    #[tokio::test]
    async fn missing_key_fails_without_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let summarizer = Summarizer::with_base_url(server.uri(), None);
        let err = summarizer.summarize("https://example.com").await.unwrap_err();

        assert!(matches!(err, AnalysisError::MissingApiKey));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let summarizer = Summarizer::with_base_url("http://unused", Some(String::new()));
        assert!(!summarizer.is_configured());
    }

    #[tokio::test]
    async fn parses_generated_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_with_text(
                r#"{"summary":"A simple example domain.","category":"Institucional"}"#,
            )))
            .mount(&server)
            .await;

        let summarizer = Summarizer::with_base_url(server.uri(), Some("test-key".into()));
        let summary = summarizer.summarize("https://example.com").await.unwrap();

        assert_eq!(summary.summary, "A simple example domain.");
        assert_eq!(summary.category, "Institucional");
    }

    #[tokio::test]
    async fn response_without_text_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let summarizer = Summarizer::with_base_url(server.uri(), Some("test-key".into()));
        let err = summarizer.summarize("https://example.com").await.unwrap_err();

        assert!(matches!(err, AnalysisError::SummarizationFailed));
    }

    #[tokio::test]
    async fn unparsable_generated_text_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_with_text("this is not json")),
            )
            .mount(&server)
            .await;

        let summarizer = Summarizer::with_base_url(server.uri(), Some("test-key".into()));
        let err = summarizer.summarize("https://example.com").await.unwrap_err();

        assert!(matches!(err, AnalysisError::SummarizationFailed));
    }

    #[tokio::test]
    async fn http_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let summarizer = Summarizer::with_base_url(server.uri(), Some("test-key".into()));
        let err = summarizer.summarize("https://example.com").await.unwrap_err();

        assert!(matches!(err, AnalysisError::SummarizationFailed));
    }
}
