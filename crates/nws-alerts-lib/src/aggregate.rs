//! Race several alert sources and keep the first successful report.

use std::future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, Instrument, Span};

use crate::report::AlertReport;
use crate::source::AlertService;

/// Query every source concurrently and return the first successful report.
///
/// Each source runs on its own task. A task that succeeds tries to place its
/// report in a single-slot channel; if the slot is already taken the report is
/// dropped. Failures are logged at `debug` and otherwise discarded. Once a
/// report arrives the remaining tasks are aborted.
///
/// This never returns an error. With no sources, or when every source fails,
/// it never completes; callers that need a bound must apply their own timeout.
pub async fn first_report(
    services: &[Arc<dyn AlertService>],
    lat: &str,
    long: &str,
) -> AlertReport {
    let (tx, mut rx) = mpsc::channel::<(String, AlertReport)>(1);
    let mut tasks = JoinSet::new();

    for service in services {
        let service = Arc::clone(service);
        let tx = tx.clone();
        let (lat, long) = (lat.to_owned(), long.to_owned());

        tasks.spawn(
            async move {
                let name = service.name().to_owned();
                match service.get_weather_alerts(&lat, &long).await {
                    Ok(report) => {
                        if tx.try_send((name.clone(), report)).is_err() {
                            debug!(source = %name, "discarding report; another source answered first");
                        }
                    }
                    Err(err) => debug!(source = %name, error = %err, "alert source failed"),
                }
            }
            .instrument(Span::current()),
        );
    }

    // `tx` is held until a report arrives, so the channel never closes on its own.
    let (winner, report) = match rx.recv().await {
        Some(result) => result,
        None => future::pending().await,
    };
    drop(tx);
    tasks.abort_all();

    info!(
        source = %winner,
        sources = services.len(),
        alerts = report.alerts.len(),
        "alert source answered first"
    );
    report
}
