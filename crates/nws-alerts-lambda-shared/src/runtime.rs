//! Lambda runtime initialization.
//!
//! This module provides a lazily-initialized singleton holding the HTTP
//! client and the configured alert sources. Building them once per container
//! lets warm invocations reuse pooled connections to api.weather.gov.
//!
//! # Configuration
//!
//! Read from the environment at cold start:
//!
//! - `NWS_ALERTS_SOURCE`: `zone` (default), `point`, or `race`
//! - `NWS_ALERTS_API_BASE`: upstream base URL (default `https://api.weather.gov`)
//! - `NWS_ALERTS_HTTP_TIMEOUT_SECS`: optional HTTP request timeout

use std::env;
use std::sync::OnceLock;
use std::time::Instant;

use tracing::{error, info};

use nws_alerts_lib::{
    AlertSources, ClientConfig, Error as LibError, NwsClient, SourceStrategy, UnknownStrategy,
    SOURCE_ENV,
};

/// Lazily-initialized Lambda runtime state.
static RUNTIME: OnceLock<Result<LambdaRuntime, InitError>> = OnceLock::new();

/// Error during runtime initialization.
#[derive(Debug, Clone)]
pub struct InitError {
    pub message: String,
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lambda initialization failed: {}", self.message)
    }
}

impl std::error::Error for InitError {}

impl From<LibError> for InitError {
    fn from(err: LibError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<UnknownStrategy> for InitError {
    fn from(err: UnknownStrategy) -> Self {
        Self {
            message: format!("{}: {}", SOURCE_ENV, err),
        }
    }
}

/// Initialized Lambda runtime containing the configured alert sources.
///
/// This struct is designed to be initialized once at cold start and reused
/// across all invocations.
#[derive(Debug, Clone)]
pub struct LambdaRuntime {
    sources: AlertSources,
    api_base: String,
}

impl LambdaRuntime {
    /// Build a runtime from explicit settings.
    pub fn new(config: &ClientConfig, strategy: SourceStrategy) -> Result<Self, InitError> {
        let client = NwsClient::new(config)?;
        Ok(Self {
            api_base: client.api_base().to_string(),
            sources: AlertSources::new(strategy, client),
        })
    }

    /// Build a runtime from the process environment.
    pub fn from_env() -> Result<Self, InitError> {
        let strategy = match env::var(SOURCE_ENV) {
            Ok(raw) if !raw.trim().is_empty() => raw.parse::<SourceStrategy>()?,
            _ => SourceStrategy::default(),
        };
        Self::new(&ClientConfig::from_env(), strategy)
    }

    /// Access the configured alert sources.
    pub fn sources(&self) -> &AlertSources {
        &self.sources
    }

    /// Base URL the sources talk to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Initialize the Lambda runtime from the environment.
///
/// The first call builds the runtime; later calls return the same instance
/// (or the same error).
pub fn init_runtime() -> Result<&'static LambdaRuntime, InitError> {
    let result = RUNTIME.get_or_init(|| {
        let start = Instant::now();
        let runtime = LambdaRuntime::from_env()?;

        info!(
            strategy = %runtime.sources().strategy(),
            api_base = %runtime.api_base(),
            init_ms = start.elapsed().as_millis(),
            "Lambda runtime initialization complete"
        );

        Ok(runtime)
    });

    result.as_ref().map_err(|e| {
        error!(error = %e, "Lambda runtime initialization failed");
        e.clone()
    })
}

/// Get the initialized runtime.
///
/// Returns an error if `init_runtime` has not been called or if
/// initialization failed.
pub fn get_runtime() -> Result<&'static LambdaRuntime, InitError> {
    match RUNTIME.get() {
        Some(Ok(runtime)) => Ok(runtime),
        Some(Err(e)) => Err(e.clone()),
        None => Err(InitError {
            message: "runtime not initialized; call init_runtime() first".to_string(),
        }),
    }
}
