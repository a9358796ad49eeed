// src/core/error.rs

use thiserror::Error;

/// Every way a single analysis request can fail.
///
/// The `Display` text of each variant is the user-facing message shown by the
/// UI; the raw underlying errors (reqwest transport errors, bad payloads) are
/// logged at the point of failure and never leak into these messages.
///
/// Geolocation failures are deliberately absent: they are recovered inside the
/// technical resolver by falling back to empty fields and never cross its
/// boundary.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input could not be parsed into a URL with a hostname.
    #[error("The URL appears to be malformed and no hostname could be extracted from it.")]
    InvalidUrl,

    /// The DNS-over-HTTPS service could not be reached or answered with a
    /// non-success status. Without an IP no further technical enrichment is
    /// meaningful, so this aborts the whole technical branch.
    #[error("Could not retrieve technical information for the domain.")]
    DnsUnreachable,

    /// The AI collaborator was unreachable, returned no usable text, or
    /// returned a payload that does not match the expected shape.
    #[error("Failed to analyze the site content. The URL may be unreachable or protected.")]
    SummarizationFailed,

    /// The AI credential is absent from the environment. Reported before any
    /// network call is attempted.
    #[error("GEMINI_API_KEY is not configured in the environment.")]
    MissingApiKey,

    /// Catch-all for failures outside the taxonomy above, wrapped so the
    /// caller always sees a human-readable message.
    #[error("An unexpected error occurred. Please try again in a moment.")]
    Unexpected,
}

impl AnalysisError {
    /// Machine-readable kind, used in logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidUrl => "invalid-url",
            AnalysisError::DnsUnreachable => "dns-unreachable",
            AnalysisError::SummarizationFailed => "summarization-failed",
            AnalysisError::MissingApiKey => "missing-api-key",
            AnalysisError::Unexpected => "unexpected",
        }
    }
}
