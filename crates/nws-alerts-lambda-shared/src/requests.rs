//! Request type and validation for the alerts Lambda.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nws_alerts_lib::Coordinates;

/// Validation trait for Lambda request types.
///
/// Implementations should validate all fields and return an
/// `InvalidRequest` error for bad input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is carried on the error so failures can be matched
    /// to their invocation in the logs.
    ///
    /// Returns a boxed error to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<InvalidRequest>>;
}

/// Error returned when an invocation payload fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid request {request_id}: {message}")]
pub struct InvalidRequest {
    pub message: String,
    pub request_id: String,
}

impl InvalidRequest {
    pub fn new(message: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            request_id: request_id.into(),
        }
    }
}

/// Invocation payload: coordinates as decimal-degree text.
///
/// ```json
/// { "lat": "41.256989522114395", "long": "-70.11151820621481" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertsRequest {
    /// Latitude in decimal degrees.
    #[serde(rename = "lat")]
    pub latitude: String,

    /// Longitude in decimal degrees.
    #[serde(rename = "long")]
    pub longitude: String,
}

impl Validate for AlertsRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<InvalidRequest>> {
        if self.latitude.trim().is_empty() {
            return Err(Box::new(InvalidRequest::new(
                "The 'lat' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.longitude.trim().is_empty() {
            return Err(Box::new(InvalidRequest::new(
                "The 'long' field is required and cannot be empty",
                request_id,
            )));
        }

        Coordinates::parse(&self.latitude, &self.longitude)
            .map(|_| ())
            .map_err(|e| Box::new(InvalidRequest::new(e.to_string(), request_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(lat: &str, long: &str) -> AlertsRequest {
        AlertsRequest {
            latitude: lat.to_string(),
            longitude: long.to_string(),
        }
    }

    #[test]
    fn test_parse_request_uses_lat_long_keys() {
        let request: AlertsRequest = serde_json::from_value(json!({
            "lat": "41.256989522114395",
            "long": "-70.11151820621481"
        }))
        .unwrap();

        assert_eq!(request.latitude, "41.256989522114395");
        assert_eq!(request.longitude, "-70.11151820621481");
    }

    #[test]
    fn test_parse_request_missing_long() {
        let result: Result<AlertsRequest, _> = serde_json::from_value(json!({ "lat": "41.25" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_request_rejects_numbers() {
        let result: Result<AlertsRequest, _> =
            serde_json::from_value(json!({ "lat": 41.25, "long": -70.11 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(request("41.25", "-70.11").validate("req-1").is_ok());
    }

    #[test]
    fn test_validate_empty_fields() {
        let err = request("  ", "-70.11").validate("req-2").unwrap_err();
        assert!(err.message.contains("'lat'"));
        assert_eq!(err.request_id, "req-2");

        let err = request("41.25", "").validate("req-3").unwrap_err();
        assert!(err.message.contains("'long'"));
    }

    #[test]
    fn test_validate_out_of_range() {
        let err = request("41.25", "-270").validate("req-4").unwrap_err();
        assert!(err.message.contains("longitude"));
        assert_eq!(
            err.to_string(),
            format!("invalid request req-4: {}", err.message)
        );
    }
}
