// src/core/resolver.rs

use serde::Deserialize;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::core::error::AnalysisError;
use crate::core::models::{Protocol, SiteStatus, TechnicalInfo};

/// Google's DNS-over-HTTPS endpoint.
pub const DEFAULT_DNS_BASE: &str = "https://dns.google";
/// ipwho.is answers plain GET requests with JSON and no key.
pub const DEFAULT_GEO_BASE: &str = "https://ipwho.is";

// --- Wire shapes of the consumed services ---

#[derive(Debug, Deserialize)]
struct DnsResponse {
    #[serde(rename = "Status")]
    status: i64,
    #[serde(rename = "Answer", default)]
    answer: Vec<DnsAnswer>,
}

#[derive(Debug, Deserialize)]
struct DnsAnswer {
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    success: bool,
    country: Option<String>,
    city: Option<String>,
    region: Option<String>,
    connection: Option<GeoConnection>,
}

#[derive(Debug, Deserialize)]
struct GeoConnection {
    isp: Option<String>,
    org: Option<String>,
}

/// Resolves a URL's hostname to an IP over DNS-over-HTTPS and enriches it
/// with geolocation and hosting-provider metadata.
///
/// DNS failure aborts the resolution: without an IP there is nothing left to
/// enrich. Geolocation failure does not: IP plus online status still has
/// value on its own, and geolocation providers are the flakier of the two
/// services, so that lookup is isolated behind a local error boundary.
pub struct TechnicalResolver {
    client: reqwest::Client,
    dns_base: String,
    geo_base: String,
}

impl Default for TechnicalResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DNS_BASE, DEFAULT_GEO_BASE)
    }
}

impl TechnicalResolver {
    /// Creates a resolver against the given service endpoints. Endpoints are
    /// injectable so tests can point at local mock servers.
    pub fn new(dns_base: impl Into<String>, geo_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            dns_base: dns_base.into(),
            geo_base: geo_base.into(),
        }
    }

    /// Resolves the technical profile of `url`.
    ///
    /// Fails with `InvalidUrl` when no hostname can be extracted and with
    /// `DnsUnreachable` when the DNS-over-HTTPS call itself fails. All
    /// geolocation failures are recovered locally.
    pub async fn resolve(&self, url: &str) -> Result<TechnicalInfo, AnalysisError> {
        let hostname = Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(String::from))
            .ok_or_else(|| {
                warn!(url, "Could not extract a hostname from the URL.");
                AnalysisError::InvalidUrl
            })?;

        info!(host = %hostname, "Starting technical resolution.");

        let dns = self.lookup_a_record(&hostname).await?;

        // Online/offline comes from the resolver's own status code; the
        // presence of an answer record is a separate question.
        let status = if dns.status == 0 {
            SiteStatus::Online
        } else {
            SiteStatus::Offline
        };
        let ip = dns.answer.first().map(|record| record.data.clone());

        let mut country = None;
        let mut provider = None;
        let mut location = None;

        match ip.as_deref() {
            // IPv6 literals are skipped entirely: the geolocation service
            // only handles IPv4 in this simple lookup.
            Some(address) if !address.contains(':') => {
                if let Some(geo) = self.lookup_geolocation(address).await {
                    country = geo.country;
                    provider = geo.connection.and_then(|conn| conn.isp.or(conn.org));
                    location = Some(format!(
                        "{}, {}",
                        geo.city.unwrap_or_default(),
                        geo.region.unwrap_or_default()
                    ));
                }
            }
            Some(address) => {
                debug!(ip = address, "Skipping geolocation for IPv6 address.");
            }
            None => {
                debug!(host = %hostname, "No A record in DNS answer, skipping geolocation.");
            }
        }

        info!(host = %hostname, ip = ?ip, status = %status, "Technical resolution finished.");

        Ok(TechnicalInfo {
            ip,
            country,
            provider,
            location,
            status,
            protocol: Protocol::from_url(url),
        })
    }

    /// Queries the DNS-over-HTTPS collaborator for an A record.
    async fn lookup_a_record(&self, hostname: &str) -> Result<DnsResponse, AnalysisError> {
        let dns_url = format!("{}/resolve?name={}&type=A", self.dns_base, hostname);
        debug!(url = %dns_url, "Querying DNS-over-HTTPS.");

        let response = self.client.get(&dns_url).send().await.map_err(|e| {
            error!(host = %hostname, error = %e, "DNS-over-HTTPS request failed.");
            AnalysisError::DnsUnreachable
        })?;

        if !response.status().is_success() {
            error!(host = %hostname, status = %response.status(), "DNS-over-HTTPS returned a non-success status.");
            return Err(AnalysisError::DnsUnreachable);
        }

        response.json::<DnsResponse>().await.map_err(|e| {
            error!(host = %hostname, error = %e, "Could not parse the DNS response body.");
            AnalysisError::DnsUnreachable
        })
    }

    /// Queries the geolocation collaborator for an IPv4 address.
    ///
    /// This is the resolver's local error boundary: every failure mode is
    /// swallowed into `None` after a warning, so a flaky geolocation provider
    /// can never fail the overall resolution.
    async fn lookup_geolocation(&self, ip: &str) -> Option<GeoResponse> {
        let geo_url = format!("{}/{}", self.geo_base, ip);
        debug!(url = %geo_url, "Querying geolocation service.");

        let response = match self
            .client
            .get(&geo_url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(ip, error = %e, "Geolocation request failed.");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(ip, status = %response.status(), "Geolocation service returned a non-success status.");
            return None;
        }

        let geo = match response.json::<GeoResponse>().await {
            Ok(geo) => geo,
            Err(e) => {
                warn!(ip, error = %e, "Could not parse the geolocation response body.");
                return None;
            }
        };

        if !geo.success {
            warn!(ip, "Geolocation service reported an unsuccessful lookup.");
            return None;
        }

        Some(geo)
    }
}
