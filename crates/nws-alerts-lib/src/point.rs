//! Single-step alert lookup against the point-based alerts endpoint.

use async_trait::async_trait;
use tracing::{debug, info_span, Instrument};

use crate::client::NwsClient;
use crate::coordinates::Coordinates;
use crate::error::{Endpoint, Result};
use crate::report::AlertReport;
use crate::source::AlertService;
use crate::upstream::AlertsResponse;

/// Alert source that queries `/alerts?point={lat},{long}` directly.
///
/// One request instead of two, but no zone resolution: city, state, and the
/// zone fields of the report stay empty. Latitude and longitude come from the
/// requested coordinates.
#[derive(Debug, Clone)]
pub struct PointAlertsService {
    client: NwsClient,
}

impl PointAlertsService {
    pub const NAME: &'static str = "nws-point";

    pub fn new(client: NwsClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, coords: &Coordinates) -> Result<AlertReport> {
        let url = self.client.url(
            Endpoint::PointAlerts,
            &format!("/alerts?point={}", coords.as_query()),
        )?;
        let alerts: AlertsResponse = self.client.get_json(Endpoint::PointAlerts, url).await?;

        let report = AlertReport {
            latitude: coords.latitude(),
            longitude: coords.longitude(),
            alerts: alerts.into_items(),
            ..AlertReport::default()
        };
        debug!(alerts = report.alerts.len(), "compiled alert report");

        Ok(report)
    }
}

#[async_trait]
impl AlertService for PointAlertsService {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn get_weather_alerts(&self, lat: &str, long: &str) -> Result<AlertReport> {
        let coords = Coordinates::parse(lat, long)?;
        let span = info_span!("nws_point_alerts", lat = %lat.trim(), long = %long.trim());
        self.fetch(&coords).instrument(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::Error;
    use crate::test_utils::{fixtures, FakeNws, Reply};
    use reqwest::StatusCode;

    fn service_for(fake: &FakeNws) -> PointAlertsService {
        let config = ClientConfig::default().with_api_base(fake.base_url());
        PointAlertsService::new(NwsClient::new(&config).expect("client builds"))
    }

    #[tokio::test]
    async fn issues_exactly_one_point_query() {
        let fake = FakeNws::builder()
            .point_alerts(Reply::json(fixtures::ALERTS_MAZ024))
            .start()
            .await;

        let report = service_for(&fake)
            .get_weather_alerts("41.257", "-70.1115")
            .await
            .expect("report");

        let requests = fake.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/alerts");
        assert_eq!(requests[0].query.as_deref(), Some("point=41.257,-70.1115"));
        assert_eq!(
            requests[0].content_type.as_deref(),
            Some("application/geo+json; charset=UTF-8")
        );

        assert_eq!(report.alerts.len(), 2);
        assert_eq!(report.alerts[0].event, "Wind Advisory");
    }

    #[tokio::test]
    async fn leaves_location_metadata_empty() {
        let fake = FakeNws::builder()
            .point_alerts(Reply::json(fixtures::ALERTS_FLOOD_WARNING))
            .start()
            .await;

        let report = service_for(&fake)
            .get_weather_alerts("41.25", "-70.11")
            .await
            .expect("report");

        assert_eq!(report.latitude, 41.25);
        assert_eq!(report.longitude, -70.11);
        assert_eq!(report.city, "");
        assert_eq!(report.state, "");
        assert_eq!(report.nws_zone, "");
        assert_eq!(report.nws_zone_url, "");
        assert_eq!(report.active_alerts_for_zone_url, "");
        assert_eq!(report.alerts[0].event, "Flood Warning");
    }

    #[tokio::test]
    async fn empty_collection_is_an_empty_list() {
        let fake = FakeNws::builder()
            .point_alerts(Reply::json(fixtures::ALERTS_EMPTY))
            .start()
            .await;

        let report = service_for(&fake)
            .get_weather_alerts("41.25", "-70.11")
            .await
            .expect("report");

        assert!(report.alerts.is_empty());
    }

    #[tokio::test]
    async fn error_status_and_bad_bodies_fail() {
        let fake = FakeNws::builder()
            .point_alerts(Reply::status(StatusCode::BAD_REQUEST))
            .start()
            .await;
        let err = service_for(&fake)
            .get_weather_alerts("41.25", "-70.11")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UpstreamStatus {
                endpoint: Endpoint::PointAlerts,
                status,
            } if status == StatusCode::BAD_REQUEST
        ));

        let fake = FakeNws::builder()
            .point_alerts(Reply::json("[]"))
            .start()
            .await;
        let err = service_for(&fake)
            .get_weather_alerts("41.25", "-70.11")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                endpoint: Endpoint::PointAlerts,
                ..
            }
        ));
    }
}
