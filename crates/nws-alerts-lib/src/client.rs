use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Endpoint, Error, Result};

const GEO_JSON: &str = "application/geo+json; charset=UTF-8";

/// Thin wrapper around a shared `reqwest::Client` bound to one API base URL.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct NwsClient {
    http: Client,
    api_base: String,
}

impl NwsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            api_base: config.api_base().to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build an absolute URL for `path_and_query` under the API base.
    pub(crate) fn url(&self, endpoint: Endpoint, path_and_query: &str) -> Result<Url> {
        let raw = format!("{}{}", self.api_base, path_and_query);
        Url::parse(&raw).map_err(|e| Error::RequestConstruction {
            endpoint,
            message: format!("{} ({})", e, raw),
        })
    }

    /// GET `url` and decode the JSON body into `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: Url,
    ) -> Result<T> {
        debug!(%url, %endpoint, "sending request");

        let response = self
            .http
            .get(url.clone())
            .header(CONTENT_TYPE, GEO_JSON)
            .send()
            .await
            .map_err(|source| {
                warn!(%url, error = %source, "request failed");
                Error::Network { endpoint, source }
            })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "received response");
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "upstream returned an error status");
            return Err(Error::UpstreamStatus { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| Error::Network { endpoint, source })?;

        serde_json::from_slice(&body).map_err(|source| {
            warn!(%url, error = %source, "failed to decode response");
            Error::Decode { endpoint, source }
        })
    }
}

fn user_agent() -> String {
    format!(
        "nws-alerts/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/scetrov/nws-alerts-rs"
    )
}
