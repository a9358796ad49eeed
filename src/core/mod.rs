// src/core/mod.rs

// Root of the `core` module: everything below is presentation-independent.
// The UI consumes `analyzer::Analyzer` and the value objects in `models`.

/// Unified error taxonomy for a single analysis request.
pub mod error;

/// Value objects shared across the core and the presentation layer, such as
/// `TechnicalInfo` and `AnalysisResult`.
pub mod models;

/// Technical branch: DNS-over-HTTPS resolution followed by a conditional,
/// failure-isolated geolocation lookup.
pub mod resolver;

/// Content branch: adapter over the generative-AI collaborator.
pub mod summarizer;

/// Orchestration: URL normalization, the concurrent fail-fast join of both
/// branches, and result merging.
pub mod analyzer;
