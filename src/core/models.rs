// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Core Data Models ---

/// Whether the domain's DNS answered successfully.
///
/// Derived from the DNS resolver's own status code, not from the presence of
/// an A record: a domain can be "online" (resolver answered with status 0)
/// while still having no address to show.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SiteStatus {
    Online,
    Offline,
    /// Transient state used by the presentation layer while an analysis is
    /// still in flight. Never produced by the resolver itself.
    Checking,
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteStatus::Online => write!(f, "online"),
            SiteStatus::Offline => write!(f, "offline"),
            SiteStatus::Checking => write!(f, "checking"),
        }
    }
}

/// Scheme of the analyzed URL. A plain string check, never a live probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Derives the protocol purely from the URL's scheme prefix.
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("https") {
            Protocol::Https
        } else {
            Protocol::Http
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "HTTP"),
            Protocol::Https => write!(f, "HTTPS"),
        }
    }
}

/// Technical metadata for a domain, assembled by the technical resolver.
///
/// Absent data is modeled as `None` rather than sentinel strings; the
/// presentation layer chooses the "not found" / "unknown" display fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TechnicalInfo {
    /// Resolved IPv4 address, if the DNS answer carried one.
    pub ip: Option<String>,
    /// Country name from geolocation, if available.
    pub country: Option<String>,
    /// ISP name, falling back to the owning organization.
    pub provider: Option<String>,
    /// Composed "city, region" string. Either part may be blank.
    pub location: Option<String>,
    pub status: SiteStatus,
    pub protocol: Protocol,
}

/// The AI collaborator's verdict on a site's content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteSummary {
    pub summary: String,
    pub category: String,
}

/// The synthesized report handed to the presentation layer: the AI content
/// summary merged with the technical metadata. Constructed once per analysis
/// and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub category: String,
    pub technical: TechnicalInfo,
    /// The normalized URL that was analyzed, not the raw input.
    pub url: String,
    /// Capture time, set once when the two branches are merged.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_follows_scheme_prefix() {
        assert_eq!(Protocol::from_url("https://example.com"), Protocol::Https);
        assert_eq!(Protocol::from_url("http://example.com"), Protocol::Http);
        // Anything that is not https is reported as HTTP.
        assert_eq!(Protocol::from_url("ftp://example.com"), Protocol::Http);
    }

    #[test]
    fn status_display_is_lowercase() {
        assert_eq!(SiteStatus::Online.to_string(), "online");
        assert_eq!(SiteStatus::Offline.to_string(), "offline");
    }
}
