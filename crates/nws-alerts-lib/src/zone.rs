//! Two-step alert lookup: points metadata, then active alerts for the zone.

use async_trait::async_trait;
use tracing::{debug, info_span, Instrument};

use crate::client::NwsClient;
use crate::coordinates::Coordinates;
use crate::error::{Endpoint, Result};
use crate::report::AlertReport;
use crate::source::AlertService;
use crate::upstream::{AlertsResponse, PointsResponse};

/// Alert source that resolves the forecast zone for a point and then lists
/// the active alerts for that zone.
///
/// Unlike [`PointAlertsService`](crate::PointAlertsService) this fills the
/// city, state, and zone fields of the report.
#[derive(Debug, Clone)]
pub struct ZoneAlertsService {
    client: NwsClient,
}

impl ZoneAlertsService {
    pub const NAME: &'static str = "nws-zone";

    pub fn new(client: NwsClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, coords: &Coordinates) -> Result<AlertReport> {
        let mut report = AlertReport::default();

        let points_url = self
            .client
            .url(Endpoint::Points, &format!("/points/{}", coords.as_query()))?;
        let points: PointsResponse = self.client.get_json(Endpoint::Points, points_url).await?;
        points.apply_to(&mut report)?;

        debug!(
            zone = %report.nws_zone,
            city = %report.city,
            state = %report.state,
            "resolved forecast zone"
        );

        let alerts_url = self.client.url(
            Endpoint::ZoneAlerts,
            &format!("/alerts/active/zone/{}", report.nws_zone),
        )?;
        let alerts: AlertsResponse = self
            .client
            .get_json(Endpoint::ZoneAlerts, alerts_url)
            .await?;

        report.alerts = alerts.into_items();
        debug!(zone = %report.nws_zone, alerts = report.alerts.len(), "compiled alert report");

        Ok(report)
    }
}

#[async_trait]
impl AlertService for ZoneAlertsService {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn get_weather_alerts(&self, lat: &str, long: &str) -> Result<AlertReport> {
        let coords = Coordinates::parse(lat, long)?;
        let span = info_span!("nws_zone_alerts", lat = %lat.trim(), long = %long.trim());
        self.fetch(&coords).instrument(span).await
    }
}
