use std::time::Duration;

use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use nws_alerts_lambda_shared::{
    get_runtime, init_runtime, init_tracing, remaining_time, service_version, AlertsRequest,
    InvalidRequest, Validate,
};
use nws_alerts_lib::{AlertReport, AlertSources};

/// Raised when the upstream calls outlive the invocation deadline.
#[derive(Debug, thiserror::Error)]
#[error("invocation deadline reached after {0:?} while waiting for the NWS API")]
pub struct DeadlineExceeded(pub Duration);

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    // Build the HTTP client and sources once per container
    init_runtime()?;

    lambda_runtime::run(service_fn(handler)).await
}

async fn handler(event: LambdaEvent<Value>) -> Result<AlertReport, Error> {
    let runtime = get_runtime()?;
    handle(runtime.sources(), event.payload, &event.context).await
}

/// Handle one invocation against `sources`.
///
/// Any failure is returned as an error, which fails the invocation; no partial
/// report is produced. In direct modes the upstream calls are bounded by the
/// invocation deadline. In race mode only a success completes the call.
pub async fn handle(
    sources: &AlertSources,
    payload: Value,
    context: &Context,
) -> Result<AlertReport, Error> {
    let request_id = context.request_id.as_str();

    // Parse the request
    let request: AlertsRequest = match serde_json::from_value(payload) {
        Ok(req) => req,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to parse request");
            return Err(InvalidRequest::new(format!("Invalid request: {}", e), request_id).into());
        }
    };

    info!(
        request_id = %request_id,
        lat = %request.latitude,
        long = %request.longitude,
        strategy = %sources.strategy(),
        xray_trace_id = ?context.xray_trace_id,
        "handling alerts request"
    );

    // Validate the request
    if let Err(problem) = request.validate(request_id) {
        error!(request_id = %request_id, error = %problem, "invalid request");
        return Err((*problem).into());
    }

    let fetch = sources.fetch(&request.latitude, &request.longitude);
    let result = match remaining_time(context) {
        Some(remaining) if sources.strategy().reports_errors() => {
            match tokio::time::timeout(remaining, fetch).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(request_id = %request_id, "invocation deadline reached");
                    return Err(DeadlineExceeded(remaining).into());
                }
            }
        }
        _ => fetch.await,
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "problem getting weather alerts");
            return Err(e.into());
        }
    };

    info!(
        request_id = %request_id,
        zone = %report.nws_zone,
        alerts = report.alerts.len(),
        "weather alerts compiled"
    );

    // Set the service version information
    Ok(report.with_version(service_version()))
}
