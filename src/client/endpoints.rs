//! Endpoints and Base URL Resolution

/// Default backend origin used when the dashboard is opened from disk
pub const DEFAULT_DEV_ORIGIN: &str = "http://127.0.0.1:8000";

/// Fixed backend endpoints consumed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Kpis,
    Segments,
    RiskDistribution,
    Customers,
    Metrics,
    Predict,
    Health,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Kpis => "/api/kpis",
            Endpoint::Segments => "/api/segments",
            Endpoint::RiskDistribution => "/api/risk_distribution",
            Endpoint::Customers => "/api/customers",
            Endpoint::Metrics => "/api/metrics",
            Endpoint::Predict => "/api/predict",
            Endpoint::Health => "/health",
        }
    }
}

/// Pick the API base for a page origin.
///
/// 1. An explicitly configured base always wins.
/// 2. A non-network origin (`file:`, or no origin at all) targets `dev_origin`.
/// 3. Otherwise requests stay relative to the serving origin (empty base).
///
/// The result never has a trailing slash.
pub fn resolve_base(configured: Option<&str>, page_protocol: Option<&str>, dev_origin: &str) -> String {
    if let Some(base) = configured.map(str::trim).filter(|b| !b.is_empty()) {
        return base.trim_end_matches('/').to_string();
    }

    match page_protocol {
        Some(protocol) if is_network_protocol(protocol) => String::new(),
        _ => dev_origin.trim_end_matches('/').to_string(),
    }
}

/// Join a base and an endpoint path
pub fn url(base: &str, endpoint: Endpoint) -> String {
    format!("{}{}", base, endpoint.path())
}

fn is_network_protocol(protocol: &str) -> bool {
    let protocol = protocol.trim_end_matches(':').to_ascii_lowercase();
    protocol == "http" || protocol == "https"
}
