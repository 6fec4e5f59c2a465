//! Decimal-degree coordinate handling.

use std::fmt;

use crate::error::{Axis, Error, Result};

/// A validated latitude/longitude pair.
///
/// The original text is kept so URLs carry exactly what the caller sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
    lat_text: String,
    long_text: String,
}

impl Coordinates {
    /// Parse latitude and longitude from decimal-degree text.
    ///
    /// Surrounding whitespace is ignored. Values must be finite, with the
    /// latitude in `[-90, 90]` and the longitude in `[-180, 180]`.
    pub fn parse(lat: &str, long: &str) -> Result<Self> {
        let (latitude, lat_text) = parse_axis(lat, Axis::Latitude, 90.0)?;
        let (longitude, long_text) = parse_axis(long, Axis::Longitude, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
            lat_text,
            long_text,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The `lat,long` form used in NWS API paths and query strings.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.lat_text, self.long_text)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat_text, self.long_text)
    }
}

fn parse_axis(text: &str, axis: Axis, limit: f64) -> Result<(f64, String)> {
    let trimmed = text.trim();
    let invalid = || Error::InvalidCoordinate {
        axis,
        value: text.to_string(),
    };

    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value.abs() > limit {
        return Err(invalid());
    }

    Ok((value, trimmed.to_string()))
}
