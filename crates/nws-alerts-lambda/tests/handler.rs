use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lambda_runtime::Context;
use serde_json::json;

use nws_alerts_lambda::handle;
use nws_alerts_lambda_shared::service_version;
use nws_alerts_lib::test_utils::{fixtures, FakeNws, Reply, StatusCode};
use nws_alerts_lib::{AlertSources, ClientConfig, NwsClient, SourceStrategy};

fn sources_for(fake: &FakeNws, strategy: SourceStrategy) -> AlertSources {
    let config = ClientConfig::default().with_api_base(fake.base_url());
    AlertSources::new(strategy, NwsClient::new(&config).expect("client builds"))
}

fn context(request_id: &str) -> Context {
    let mut context = Context::default();
    context.request_id = request_id.to_string();
    context
}

fn context_with_deadline(request_id: &str, remaining: Duration) -> Context {
    let mut context = context(request_id);
    let deadline = SystemTime::now() + remaining;
    context.deadline = deadline
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_millis() as u64;
    context
}

fn nantucket() -> serde_json::Value {
    json!({ "lat": "41.257", "long": "-70.1115" })
}

#[tokio::test]
async fn returns_zone_report_stamped_with_version() {
    let fake = FakeNws::builder()
        .points(Reply::json(fixtures::POINTS_NANTUCKET))
        .zone_alerts(Reply::json(fixtures::ALERTS_MAZ024))
        .start()
        .await;

    let report = handle(
        &sources_for(&fake, SourceStrategy::Zone),
        nantucket(),
        &context("req-zone"),
    )
    .await
    .expect("handler succeeds");

    assert_eq!(report.version, service_version());
    assert_eq!(report.city, "Nantucket");
    assert_eq!(report.nws_zone, "MAZ024");
    assert_eq!(report.alerts.len(), 2);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["version"], service_version());
    assert_eq!(json["zone"], "MAZ024");
    assert_eq!(
        json["alertsurl"],
        "https://alerts.weather.gov/cap/wwaatmget.php?x=MAZ024&y=1"
    );
    assert_eq!(json["alerts"][0]["event"], "Wind Advisory");
}

#[tokio::test]
async fn point_strategy_uses_single_request() {
    let fake = FakeNws::builder()
        .point_alerts(Reply::json(fixtures::ALERTS_EMPTY))
        .start()
        .await;

    let report = handle(
        &sources_for(&fake, SourceStrategy::Point),
        nantucket(),
        &context("req-point"),
    )
    .await
    .expect("handler succeeds");

    assert!(report.alerts.is_empty());
    assert_eq!(report.nws_zone, "");
    assert_eq!(report.version, service_version());
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn malformed_payload_fails_the_invocation() {
    let fake = FakeNws::builder().start().await;

    let err = handle(
        &sources_for(&fake, SourceStrategy::Zone),
        json!({ "latitude": "41.257" }),
        &context("req-bad"),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("req-bad"));
    assert!(err.to_string().contains("Invalid request"));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn invalid_coordinates_fail_before_calling_upstream() {
    let fake = FakeNws::builder()
        .points(Reply::json(fixtures::POINTS_NANTUCKET))
        .start()
        .await;

    let err = handle(
        &sources_for(&fake, SourceStrategy::Zone),
        json!({ "lat": "141.0", "long": "-70.1115" }),
        &context("req-range"),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("latitude"));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn upstream_failure_is_fatal() {
    let fake = FakeNws::builder()
        .points(Reply::json(fixtures::POINTS_NANTUCKET))
        .zone_alerts(Reply::json("<html>maintenance</html>"))
        .start()
        .await;

    let err = handle(
        &sources_for(&fake, SourceStrategy::Zone),
        nantucket(),
        &context("req-decode"),
    )
    .await
    .unwrap_err();

    assert!(err
        .to_string()
        .starts_with("problem decoding the response from the NWS alerts service"));
}

#[tokio::test]
async fn direct_call_is_bounded_by_invocation_deadline() {
    let fake = FakeNws::builder()
        .points(Reply::json(fixtures::POINTS_NANTUCKET).delayed(Duration::from_secs(5)))
        .start()
        .await;

    let started = std::time::Instant::now();
    let err = handle(
        &sources_for(&fake, SourceStrategy::Zone),
        nantucket(),
        &context_with_deadline("req-deadline", Duration::from_millis(200)),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("deadline"));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn race_returns_first_success() {
    let fake = FakeNws::builder()
        .points(Reply::status(StatusCode::SERVICE_UNAVAILABLE))
        .point_alerts(Reply::json(fixtures::ALERTS_FLOOD_WARNING))
        .start()
        .await;

    let report = handle(
        &sources_for(&fake, SourceStrategy::Race),
        nantucket(),
        &context("req-race"),
    )
    .await
    .expect("race succeeds");

    assert_eq!(report.alerts[0].event, "Flood Warning");
    assert_eq!(report.version, service_version());
}

#[tokio::test]
async fn race_with_every_source_failing_does_not_return() {
    let fake = FakeNws::builder()
        .points(Reply::status(StatusCode::INTERNAL_SERVER_ERROR))
        .point_alerts(Reply::status(StatusCode::INTERNAL_SERVER_ERROR))
        .start()
        .await;
    let sources = sources_for(&fake, SourceStrategy::Race);
    let context = context_with_deadline("req-race-fail", Duration::from_millis(50));

    let outcome = tokio::time::timeout(
        Duration::from_millis(500),
        handle(&sources, nantucket(), &context),
    )
    .await;

    assert!(outcome.is_err(), "race mode only completes on success");
}
