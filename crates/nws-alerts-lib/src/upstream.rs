//! Response shapes of the api.weather.gov endpoints.
//!
//! Only the fields the report needs are decoded; everything else in the
//! GeoJSON documents is ignored. NWS sends `null` for many string fields, so
//! those decode as `Option` and collapse to empty strings when mapped.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::{Endpoint, Error, Result};
use crate::report::{AlertItem, AlertReport};

/// `GET /points/{lat},{long}`
#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub geometry: Geometry,
    pub properties: PointProperties,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// GeoJSON ordering: longitude first, then latitude.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    #[serde(default)]
    pub forecast_zone: Option<String>,
    #[serde(default)]
    pub relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize)]
pub struct RelativeLocation {
    pub properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize)]
pub struct RelativeLocationProperties {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// `GET /alerts/active/zone/{zone}` and `GET /alerts?point={lat},{long}`
#[derive(Debug, Deserialize)]
pub struct AlertsResponse {
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertProperties {
    pub area_desc: Option<String>,
    pub effective: Option<DateTime<FixedOffset>>,
    pub ends: Option<DateTime<FixedOffset>>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub event: Option<String>,
    pub sender: Option<String>,
    pub sender_name: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
}

impl From<AlertFeature> for AlertItem {
    fn from(feature: AlertFeature) -> Self {
        let p = feature.properties;
        AlertItem {
            event: p.event.unwrap_or_default(),
            headline: p.headline.unwrap_or_default(),
            description: p.description.unwrap_or_default(),
            severity: p.severity.unwrap_or_default(),
            urgency: p.urgency.unwrap_or_default(),
            area_description: p.area_desc.unwrap_or_default(),
            sender: p.sender.unwrap_or_default(),
            sender_name: p.sender_name.unwrap_or_default(),
            start: p.effective,
            end: p.ends,
        }
    }
}

impl AlertsResponse {
    /// Convert every feature into an alert item, keeping upstream order.
    pub fn into_items(self) -> Vec<AlertItem> {
        self.features.into_iter().map(AlertItem::from).collect()
    }
}

impl PointsResponse {
    /// Fill the location fields of `report` from the points metadata.
    pub fn apply_to(self, report: &mut AlertReport) -> Result<()> {
        let (longitude, latitude) = match self.geometry.coordinates.as_slice() {
            [longitude, latitude, ..] => (*longitude, *latitude),
            _ => {
                return Err(Error::IncompleteResponse {
                    endpoint: Endpoint::Points,
                    field: "geometry coordinates",
                })
            }
        };
        let zone_url = self
            .properties
            .forecast_zone
            .filter(|url| !url.trim().is_empty())
            .ok_or(Error::IncompleteResponse {
                endpoint: Endpoint::Points,
                field: "forecastZone",
            })?;

        report.longitude = longitude;
        report.latitude = latitude;
        report.set_zone(zone_id_from_url(&zone_url), zone_url.clone());

        if let Some(location) = self.properties.relative_location {
            report.city = location.properties.city.unwrap_or_default();
            report.state = location.properties.state.unwrap_or_default();
        }

        Ok(())
    }
}

/// Zone identifier from a forecast zone URL such as
/// `https://api.weather.gov/zones/forecast/MAZ024`.
pub fn zone_id_from_url(url: &str) -> &str {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
