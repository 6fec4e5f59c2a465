//! Output envelope returned to callers.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Base of the human-readable NWS page listing active alerts for a zone.
const ZONE_ALERTS_PAGE_BASE: &str = "https://alerts.weather.gov/cap/wwaatmget.php";

/// Weather alerts for a single location.
///
/// `alerts` is always present in the serialized form, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertReport {
    pub latitude: f64,
    pub longitude: f64,
    /// Nearest city reported by the points service.
    pub city: String,
    pub state: String,
    /// National Weather Service forecast zone (for example `MAZ024`).
    #[serde(rename = "zone")]
    pub nws_zone: String,
    /// API URL of the forecast zone.
    #[serde(rename = "zoneurl")]
    pub nws_zone_url: String,
    /// NWS web page listing the active alerts for the zone.
    #[serde(rename = "alertsurl")]
    pub active_alerts_for_zone_url: String,
    pub alerts: Vec<AlertItem>,
    /// Service version, stamped by the invocation handler.
    pub version: String,
}

impl AlertReport {
    /// Record the forecast zone and derive the alerts page URL from it.
    pub fn set_zone(&mut self, zone: impl Into<String>, zone_url: impl Into<String>) {
        self.nws_zone = zone.into();
        self.nws_zone_url = zone_url.into();
        self.active_alerts_for_zone_url = active_alerts_page_url(&self.nws_zone);
    }

    /// Stamp the service version onto the report.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// One active weather alert.
///
/// `start` carries the upstream `effective` time and `end` the upstream
/// `ends` time. Neither is validated against the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertItem {
    /// Short event summary, e.g. `Flood Warning`.
    pub event: String,
    pub headline: String,
    pub description: String,
    pub severity: String,
    pub urgency: String,
    #[serde(rename = "area_description")]
    pub area_description: String,
    /// Sender address.
    pub sender: String,
    #[serde(rename = "sendername")]
    pub sender_name: String,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

/// Web page URL listing active alerts for `zone`.
pub fn active_alerts_page_url(zone: &str) -> String {
    format!("{}?x={}&y=1", ZONE_ALERTS_PAGE_BASE, zone)
}
