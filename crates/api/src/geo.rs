//! Visitor geolocation for `POST /api/visits/track`.
//!
//! Lookups are best-effort: private or unparseable addresses are never sent
//! out, and any HTTP error, timeout, or unsuccessful answer yields `None` so
//! the visit is still recorded without geo data.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// Default lookup URL; `{ip}` is replaced with the client address.
pub const DEFAULT_GEOIP_URL: &str = "http://ip-api.com/json/{ip}";

/// Default lookup timeout in milliseconds.
pub const DEFAULT_GEOIP_TIMEOUT_MS: u64 = 1500;

/// Geolocation settings.
#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Whether lookups run at all (default: `true`).
    pub enabled: bool,
    /// URL template containing `{ip}`.
    pub url_template: String,
    /// Per-lookup timeout.
    pub timeout_ms: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url_template: DEFAULT_GEOIP_URL.to_string(),
            timeout_ms: DEFAULT_GEOIP_TIMEOUT_MS,
        }
    }
}

impl GeoConfig {
    /// Load from `GEOIP_ENABLED`, `GEOIP_URL`, and `GEOIP_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let enabled: bool = std::env::var("GEOIP_ENABLED")
            .unwrap_or_else(|_| defaults.enabled.to_string())
            .parse()
            .expect("GEOIP_ENABLED must be true or false");

        let url_template = std::env::var("GEOIP_URL").unwrap_or(defaults.url_template);

        let timeout_ms: u64 = std::env::var("GEOIP_TIMEOUT_MS")
            .unwrap_or_else(|_| defaults.timeout_ms.to_string())
            .parse()
            .expect("GEOIP_TIMEOUT_MS must be a valid u64");

        Self {
            enabled,
            url_template,
            timeout_ms,
        }
    }
}

/// Location attached to a tracked visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoInfo {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

/// A source of visitor locations.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolve a public IP address. Never fails; unknown means `None`.
    async fn lookup(&self, ip: IpAddr) -> Option<GeoInfo>;
}

/// Lookup that never resolves anything (geolocation disabled).
pub struct NoopGeoLookup;

#[async_trait]
impl GeoLookup for NoopGeoLookup {
    async fn lookup(&self, _ip: IpAddr) -> Option<GeoInfo> {
        None
    }
}

/// Lookup against an ip-api.com compatible JSON endpoint.
pub struct HttpGeoLookup {
    client: reqwest::Client,
    url_template: String,
}

/// The subset of the ip-api.com answer we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: Option<String>,
    country: Option<String>,
    region_name: Option<String>,
    city: Option<String>,
}

impl HttpGeoLookup {
    pub fn new(config: &GeoConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            url_template: config.url_template.clone(),
        })
    }
}

#[async_trait]
impl GeoLookup for HttpGeoLookup {
    async fn lookup(&self, ip: IpAddr) -> Option<GeoInfo> {
        let url = self.url_template.replace("{ip}", &ip.to_string());

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(%ip, error = %e, "Geolocation request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(%ip, status = %response.status(), "Geolocation lookup rejected");
            return None;
        }
        let body: IpApiResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!(%ip, error = %e, "Geolocation response unreadable");
                return None;
            }
        };
        into_geo_info(body)
    }
}

fn into_geo_info(body: IpApiResponse) -> Option<GeoInfo> {
    if body.status.as_deref().is_some_and(|s| s != "success") {
        return None;
    }
    let info = GeoInfo {
        country: body.country.filter(|s| !s.is_empty()),
        region: body.region_name.filter(|s| !s.is_empty()),
        city: body.city.filter(|s| !s.is_empty()),
    };
    (info != GeoInfo::default()).then_some(info)
}

/// Build the lookup described by `config`.
///
/// Falls back to [`NoopGeoLookup`] when disabled or when the HTTP client
/// cannot be built.
pub fn build_geo_lookup(config: &GeoConfig) -> Arc<dyn GeoLookup> {
    if !config.enabled {
        return Arc::new(NoopGeoLookup);
    }
    match HttpGeoLookup::new(config) {
        Ok(lookup) => Arc::new(lookup),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build geolocation client; lookups disabled");
            Arc::new(NoopGeoLookup)
        }
    }
}

/// Parse `ip` and return it only if it is worth looking up: a globally
/// routable address (not private, loopback, link-local, or reserved for
/// documentation).
pub fn public_ip(ip: &str) -> Option<IpAddr> {
    let addr: IpAddr = ip.trim().parse().ok()?;
    let public = match addr {
        IpAddr::V4(v4) => {
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                // 100.64.0.0/10 carrier-grade NAT
                || (v4.octets()[0] == 100 && (v4.octets()[1] & 0xc0) == 64))
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            !(v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 unique local, fe80::/10 link-local
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80)
        }
    };
    public.then_some(addr)
}

/// Look up `ip` if it is public; `None` otherwise.
pub async fn locate(lookup: &dyn GeoLookup, ip: &str) -> Option<GeoInfo> {
    let addr = public_ip(ip)?;
    lookup.lookup(addr).await
}
