//! Selection of which alert source(s) answer a request.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::aggregate::first_report;
use crate::client::NwsClient;
use crate::error::Result;
use crate::point::PointAlertsService;
use crate::report::AlertReport;
use crate::source::AlertService;
use crate::zone::ZoneAlertsService;

/// Environment variable naming the source strategy (`zone`, `point`, `race`).
pub const SOURCE_ENV: &str = "NWS_ALERTS_SOURCE";

/// How a request is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceStrategy {
    /// Two-step zone lookup, called directly.
    #[default]
    Zone,
    /// Single-step point lookup, called directly.
    Point,
    /// Both sources raced; the first success wins.
    Race,
}

impl SourceStrategy {
    /// Whether a failure can be reported. Racing swallows per-source errors.
    pub fn reports_errors(self) -> bool {
        !matches!(self, SourceStrategy::Race)
    }
}

impl fmt::Display for SourceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceStrategy::Zone => write!(f, "zone"),
            SourceStrategy::Point => write!(f, "point"),
            SourceStrategy::Race => write!(f, "race"),
        }
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown alert source strategy '{0}'; expected zone, point, or race")]
pub struct UnknownStrategy(pub String);

impl FromStr for SourceStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zone" => Ok(SourceStrategy::Zone),
            "point" => Ok(SourceStrategy::Point),
            "race" => Ok(SourceStrategy::Race),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// The configured alert sources sharing one HTTP client.
#[derive(Clone)]
pub struct AlertSources {
    strategy: SourceStrategy,
    zone: Arc<dyn AlertService>,
    point: Arc<dyn AlertService>,
}

impl fmt::Debug for AlertSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertSources")
            .field("strategy", &self.strategy)
            .field("zone", &self.zone.name())
            .field("point", &self.point.name())
            .finish()
    }
}

impl AlertSources {
    pub fn new(strategy: SourceStrategy, client: NwsClient) -> Self {
        Self {
            strategy,
            zone: Arc::new(ZoneAlertsService::new(client.clone())),
            point: Arc::new(PointAlertsService::new(client)),
        }
    }

    pub fn strategy(&self) -> SourceStrategy {
        self.strategy
    }

    /// Fetch a report using the configured strategy.
    ///
    /// In [`SourceStrategy::Race`] mode this only completes once a source
    /// succeeds.
    pub async fn fetch(&self, lat: &str, long: &str) -> Result<AlertReport> {
        match self.strategy {
            SourceStrategy::Zone => self.zone.get_weather_alerts(lat, long).await,
            SourceStrategy::Point => self.point.get_weather_alerts(lat, long).await,
            SourceStrategy::Race => {
                let services = [Arc::clone(&self.zone), Arc::clone(&self.point)];
                Ok(first_report(&services, lat, long).await)
            }
        }
    }
}
