use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias for the NWS alerts library.
pub type Result<T> = std::result::Result<T, Error>;

/// Upstream endpoint a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /points/{lat},{long}`
    Points,
    /// `GET /alerts/active/zone/{zone}`
    ZoneAlerts,
    /// `GET /alerts?point={lat},{long}`
    PointAlerts,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Points => write!(f, "NWS points service"),
            Endpoint::ZoneAlerts => write!(f, "NWS alerts service"),
            Endpoint::PointAlerts => write!(f, "NWS point alerts service"),
        }
    }
}

/// Coordinate axis, used when reporting invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a coordinate is not a finite decimal degree value in range.
    #[error("invalid {axis} '{value}': expected decimal degrees within {}", axis_range(.axis))]
    InvalidCoordinate { axis: Axis, value: String },

    /// Raised when the outbound request URL could not be built.
    #[error("problem creating request to the {endpoint}: {message}")]
    RequestConstruction { endpoint: Endpoint, message: String },

    /// Transport failure while sending the request or reading the body.
    #[error("error when sending request to the {endpoint}: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// Raised when the upstream answered with a non-success status.
    #[error("the {endpoint} responded with status {status}")]
    UpstreamStatus {
        endpoint: Endpoint,
        status: StatusCode,
    },

    /// Raised when the body is not valid JSON or does not match the expected shape.
    #[error("problem decoding the response from the {endpoint}: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    /// Raised when a decoded response lacks a value the report needs.
    #[error("the {endpoint} response is missing {field}")]
    IncompleteResponse {
        endpoint: Endpoint,
        field: &'static str,
    },

    /// Wrapper for HTTP client construction errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Endpoint the failing request was addressed to, if any.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Error::RequestConstruction { endpoint, .. }
            | Error::Network { endpoint, .. }
            | Error::UpstreamStatus { endpoint, .. }
            | Error::Decode { endpoint, .. }
            | Error::IncompleteResponse { endpoint, .. } => Some(*endpoint),
            Error::InvalidCoordinate { .. } | Error::Http(_) => None,
        }
    }
}

fn axis_range(axis: &Axis) -> &'static str {
    match axis {
        Axis::Latitude => "[-90, 90]",
        Axis::Longitude => "[-180, 180]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinate_message_names_axis_and_range() {
        let err = Error::InvalidCoordinate {
            axis: Axis::Latitude,
            value: "north".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid latitude 'north': expected decimal degrees within [-90, 90]"
        );
        assert_eq!(err.endpoint(), None);
    }

    #[test]
    fn step_errors_identify_the_endpoint() {
        let err = Error::IncompleteResponse {
            endpoint: Endpoint::Points,
            field: "geometry coordinates",
        };
        assert_eq!(
            err.to_string(),
            "the NWS points service response is missing geometry coordinates"
        );
        assert_eq!(err.endpoint(), Some(Endpoint::Points));

        let err = Error::UpstreamStatus {
            endpoint: Endpoint::ZoneAlerts,
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.to_string().contains("NWS alerts service"));
        assert!(err.to_string().contains("404"));
    }
}
