// src/core/analyzer.rs

use chrono::Utc;
use tracing::{error, info};

use crate::core::error::AnalysisError;
use crate::core::models::AnalysisResult;
use crate::core::resolver::TechnicalResolver;
use crate::core::summarizer::Summarizer;

/// Prepares a raw user input for analysis: trims whitespace and prepends
/// `https://` when no scheme prefix is present (case-insensitive check).
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Runs the two analysis branches concurrently and merges their results.
///
/// The branches share nothing and depend on nothing from each other, which is
/// what makes the parallel launch safe. The join is fail-fast: the first
/// branch error becomes the single error surfaced to the caller, and any
/// partial result from the other branch is discarded.
pub struct Analyzer {
    resolver: TechnicalResolver,
    summarizer: Summarizer,
}

impl Analyzer {
    /// Creates an analyzer against the production endpoints.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            resolver: TechnicalResolver::default(),
            summarizer: Summarizer::new(api_key),
        }
    }

    /// Assembles an analyzer from preconfigured collaborators, used by tests
    /// to point at mock endpoints.
    pub fn with_services(resolver: TechnicalResolver, summarizer: Summarizer) -> Self {
        Self { resolver, summarizer }
    }

    /// The core's sole entry point: analyzes `raw_url` and returns the
    /// synthesized report, or exactly one unified error.
    pub async fn analyze(&self, raw_url: &str) -> Result<AnalysisResult, AnalysisError> {
        // A missing credential must surface before any network call.
        if !self.summarizer.is_configured() {
            error!("AI credential is missing, refusing to analyze.");
            return Err(AnalysisError::MissingApiKey);
        }

        let url = normalize_url(raw_url);
        info!(url = %url, "Starting analysis.");

        // try_join! returns the first error without waiting for the other
        // branch; when both fail at once, either error may win.
        let (technical, summary) = tokio::try_join!(
            self.resolver.resolve(&url),
            self.summarizer.summarize(&url),
        )
        .map_err(|e| {
            error!(url = %url, kind = e.kind(), error = %e, "Analysis failed.");
            e
        })?;

        info!(url = %url, category = %summary.category, "Analysis finished.");

        Ok(AnalysisResult {
            summary: summary.summary,
            category: summary.category,
            technical,
            url,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Protocol, SiteStatus};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn bare_hostname_gets_https_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
    }

    #[test]
    fn existing_scheme_is_preserved() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url(" https://example.com "), "https://example.com");
        // Scheme detection is case-insensitive but the input is kept as-is.
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    async fn mock_servers() -> (MockServer, MockServer, MockServer) {
        let dns = MockServer::start().await;
        let geo = MockServer::start().await;
        let ai = MockServer::start().await;
        (dns, geo, ai)
    }

    fn analyzer_for(dns: &MockServer, geo: &MockServer, ai: &MockServer) -> Analyzer {
        Analyzer::with_services(
            crate::core::resolver::TechnicalResolver::new(dns.uri(), geo.uri()),
            crate::core::summarizer::Summarizer::with_base_url(ai.uri(), Some("test-key".into())),
        )
    }

    fn ai_body(summary: &str, category: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "parts": [{
                    "text": json!({ "summary": summary, "category": category }).to_string()
                }] }
            }]
        })
    }

    #[tokio::test]
    async fn merges_both_branches_into_one_report() {
        let (dns, geo, ai) = mock_servers().await;
        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "example.com"))
            .and(query_param("type", "A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "Status": 0, "Answer": [{ "data": "93.184.216.34" }] }),
            ))
            .mount(&dns)
            .await;
        Mock::given(method("GET"))
            .and(path("/93.184.216.34"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "country": "United States",
                "city": "Norwell",
                "region": "Massachusetts",
                "connection": { "isp": "Edgecast Inc." }
            })))
            .mount(&geo)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ai_body(
                "A simple example domain.",
                "Institucional",
            )))
            .mount(&ai)
            .await;

        let result = analyzer_for(&dns, &geo, &ai)
            .analyze("example.com")
            .await
            .unwrap();

        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.summary, "A simple example domain.");
        assert_eq!(result.category, "Institucional");
        assert_eq!(result.technical.ip.as_deref(), Some("93.184.216.34"));
        assert_eq!(result.technical.status, SiteStatus::Online);
        assert_eq!(result.technical.protocol, Protocol::Https);
        assert_eq!(result.technical.country.as_deref(), Some("United States"));
        assert_eq!(result.technical.provider.as_deref(), Some("Edgecast Inc."));
        assert_eq!(
            result.technical.location.as_deref(),
            Some("Norwell, Massachusetts")
        );
    }

    #[tokio::test]
    async fn ai_failure_discards_successful_technical_branch() {
        let (dns, geo, ai) = mock_servers().await;
        Mock::given(method("GET"))
            .and(path("/resolve"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "Status": 0, "Answer": [{ "data": "93.184.216.34" }] }),
            ))
            .mount(&dns)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
            .mount(&geo)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&ai)
            .await;

        let err = analyzer_for(&dns, &geo, &ai)
            .analyze("example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::SummarizationFailed));
    }

    #[tokio::test]
    async fn dns_failure_discards_successful_ai_branch() {
        let (dns, geo, ai) = mock_servers().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&dns)
            .await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(ai_body("Fine.", "Blog")),
            )
            .mount(&ai)
            .await;

        let err = analyzer_for(&dns, &geo, &ai)
            .analyze("example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::DnsUnreachable));
    }

    #[tokio::test]
    async fn simultaneous_failure_surfaces_one_of_the_two_kinds() {
        let (dns, geo, ai) = mock_servers().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&dns)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&ai)
            .await;

        let err = analyzer_for(&dns, &geo, &ai)
            .analyze("example.com")
            .await
            .unwrap_err();

        // Which branch loses the race is accepted nondeterminism.
        assert!(matches!(
            err,
            AnalysisError::DnsUnreachable | AnalysisError::SummarizationFailed
        ));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_network_call() {
        let (dns, geo, ai) = mock_servers().await;
        for server in [&dns, &geo, &ai] {
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(server)
                .await;
        }

        let analyzer = Analyzer::with_services(
            crate::core::resolver::TechnicalResolver::new(dns.uri(), geo.uri()),
            crate::core::summarizer::Summarizer::with_base_url(ai.uri(), None),
        );
        let err = analyzer.analyze("example.com").await.unwrap_err();

        assert!(matches!(err, AnalysisError::MissingApiKey));
    }
}
