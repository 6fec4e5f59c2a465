//! Shared infrastructure for the NWS alerts AWS Lambda function.
//!
//! This crate provides the functionality the Lambda handler needs around the
//! core library:
//!
//! - [`LambdaRuntime`]: Alert sources and HTTP client built once per container
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`AlertsRequest`]: The invocation payload, with validation
//! - [`service_version`]: Build version stamped onto every report
//! - [`remaining_time`]: Time left before the invocation deadline

#![deny(warnings)]

mod deadline;
mod requests;
mod runtime;
mod tracing_init;
mod version;

pub use deadline::remaining_time;
pub use requests::{AlertsRequest, InvalidRequest, Validate};
pub use runtime::{get_runtime, init_runtime, InitError, LambdaRuntime};
pub use tracing_init::init_tracing;
pub use version::{service_version, BUILD_VERSION, COMMIT_ID};
