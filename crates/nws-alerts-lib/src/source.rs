//! The capability shared by every alert source.

use async_trait::async_trait;

use crate::error::Result;
use crate::report::AlertReport;

/// A service that can fetch weather alerts for a location.
///
/// Implementations exist per upstream API shape. The trait is object-safe so
/// heterogeneous sources can be raced together as `Arc<dyn AlertService>`.
///
/// Cancellation follows the usual async rules: dropping the returned future
/// aborts any in-flight request.
#[async_trait]
pub trait AlertService: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Fetch the active alerts for `lat`/`long`, given as decimal-degree text.
    ///
    /// The returned report has an empty `version`; callers stamp it.
    async fn get_weather_alerts(&self, lat: &str, long: &str) -> Result<AlertReport>;
}
