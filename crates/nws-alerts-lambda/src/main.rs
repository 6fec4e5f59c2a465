//! AWS Lambda function for NWS weather alerts.
//!
//! Takes `{ "lat": "...", "long": "..." }` and returns the active alerts for
//! that location.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    nws_alerts_lambda::run().await
}
