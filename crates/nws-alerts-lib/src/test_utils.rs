//! In-process fake of api.weather.gov for tests.
//!
//! The fake serves canned JSON for the three endpoints the alert sources use
//! and records every request it receives, so tests can assert on paths,
//! query strings, and headers.
//!
//! # Usage
//!
//! Available in this crate's tests and, with the `test-utils` feature, to
//! dependent crates:
//!
//! ```ignore
//! use nws_alerts_lib::test_utils::{fixtures, FakeNws, Reply};
//!
//! #[tokio::test]
//! async fn fetches_alerts() {
//!     let fake = FakeNws::builder()
//!         .points(Reply::json(fixtures::POINTS_NANTUCKET))
//!         .zone_alerts(Reply::json(fixtures::ALERTS_FLOOD_WARNING))
//!         .start()
//!         .await;
//!     let config = ClientConfig::default().with_api_base(fake.base_url());
//!     // ... build a source from `config` and call it
//! }
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub use axum::http::StatusCode;

/// JSON fixtures captured from (and trimmed down from) real NWS responses.
pub mod fixtures {
    /// Points metadata for Nantucket, MA (zone `MAZ024`).
    pub const POINTS_NANTUCKET: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../docs/fixtures/nws/points_nantucket.json"
    ));

    /// Zone alerts with two active features.
    pub const ALERTS_MAZ024: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../docs/fixtures/nws/alerts_maz024.json"
    ));

    /// A single flood warning with effective and end times.
    pub const ALERTS_FLOOD_WARNING: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../docs/fixtures/nws/alerts_flood_warning.json"
    ));

    /// An alerts collection with no features.
    pub const ALERTS_EMPTY: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../docs/fixtures/nws/alerts_empty.json"
    ));
}

/// Canned response for one endpoint.
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl Reply {
    /// `200 OK` with `body` as GeoJSON.
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// An error status with a problem-details style body.
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: format!(
                r#"{{"title":"{}","status":{}}}"#,
                status.canonical_reason().unwrap_or("Error"),
                status.as_u16()
            ),
            delay: Duration::ZERO,
        }
    }

    /// Hold the response back for `delay` before sending it.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for Reply {
    fn default() -> Self {
        Reply::status(StatusCode::NOT_FOUND)
    }
}

/// A request observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    points: Reply,
    zone_alerts: Reply,
    point_alerts: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Builder for [`FakeNws`]. Endpoints without a reply answer `404`.
#[derive(Debug, Default)]
pub struct FakeNwsBuilder {
    points: Reply,
    zone_alerts: Reply,
    point_alerts: Reply,
}

impl FakeNwsBuilder {
    pub fn points(mut self, reply: Reply) -> Self {
        self.points = reply;
        self
    }

    pub fn zone_alerts(mut self, reply: Reply) -> Self {
        self.zone_alerts = reply;
        self
    }

    pub fn point_alerts(mut self, reply: Reply) -> Self {
        self.point_alerts = reply;
        self
    }

    /// Bind to an ephemeral localhost port and start serving on the current
    /// tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(self) -> FakeNws {
        let state = Arc::new(FakeState {
            points: self.points,
            zone_alerts: self.zone_alerts,
            point_alerts: self.point_alerts,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/points/{coords}", get(points))
            .route("/alerts/active/zone/{zone}", get(zone_alerts))
            .route("/alerts", get(point_alerts))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake NWS listener");
        let addr = listener.local_addr().expect("fake NWS local address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        FakeNws { addr, state, task }
    }
}

/// A running fake NWS API. The server stops when this is dropped.
#[derive(Debug)]
pub struct FakeNws {
    addr: SocketAddr,
    state: Arc<FakeState>,
    task: JoinHandle<()>,
}

impl FakeNws {
    pub fn builder() -> FakeNwsBuilder {
        FakeNwsBuilder::default()
    }

    /// Base URL to configure clients with, e.g. `http://127.0.0.1:41234`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Drop for FakeNws {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn points(State(state): State<Arc<FakeState>>, uri: Uri, headers: HeaderMap) -> Response {
    let reply = state.points.clone();
    respond(&state, reply, uri, &headers).await
}

async fn zone_alerts(
    State(state): State<Arc<FakeState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let reply = state.zone_alerts.clone();
    respond(&state, reply, uri, &headers).await
}

async fn point_alerts(
    State(state): State<Arc<FakeState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let reply = state.point_alerts.clone();
    respond(&state, reply, uri, &headers).await
}

async fn respond(state: &FakeState, reply: Reply, uri: Uri, headers: &HeaderMap) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: header_text(header::CONTENT_TYPE),
        user_agent: header_text(header::USER_AGENT),
    };
    if let Ok(mut requests) = state.requests.lock() {
        requests.push(recorded);
    }

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/geo+json")],
        reply.body,
    )
        .into_response()
}
