//! NWS alerts library entry points.
//!
//! This crate fetches active weather alerts for a latitude/longitude pair from
//! api.weather.gov and reshapes them into an [`AlertReport`]. Two alert
//! sources are provided, one per upstream API shape, behind the
//! [`AlertService`] trait, and [`first_report`] races any number of them.
//! Higher-level consumers (CLI, Lambda) should only depend on the items
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod aggregate;
pub mod client;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod point;
pub mod report;
pub mod source;
pub mod sources;
pub mod upstream;
pub mod zone;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::first_report;
pub use client::NwsClient;
pub use config::ClientConfig;
pub use coordinates::Coordinates;
pub use error::{Axis, Endpoint, Error, Result};
pub use point::PointAlertsService;
pub use report::{AlertItem, AlertReport};
pub use source::AlertService;
pub use sources::{AlertSources, SourceStrategy, UnknownStrategy, SOURCE_ENV};
pub use zone::ZoneAlertsService;
