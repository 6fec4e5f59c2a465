use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nws_alerts_cli::{render_report, OutputFormat};
use nws_alerts_lambda_shared::service_version;
use nws_alerts_lib::config::{API_BASE_ENV, DEFAULT_API_BASE, HTTP_TIMEOUT_ENV};
use nws_alerts_lib::{AlertSources, ClientConfig, NwsClient, SourceStrategy, SOURCE_ENV};

#[derive(Parser, Debug)]
#[command(author, version, about = "Active NWS weather alerts for a location")]
struct Cli {
    /// Latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    lat: String,

    /// Longitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    long: String,

    /// Which alert source answers: zone, point, or race.
    #[arg(long, env = SOURCE_ENV, default_value_t = SourceStrategy::Zone)]
    source: SourceStrategy,

    /// Base URL of the NWS API.
    #[arg(long, env = API_BASE_ENV, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Whole-request HTTP timeout in seconds. No timeout when omitted.
    #[arg(long, env = HTTP_TIMEOUT_ENV)]
    timeout_secs: Option<u64>,

    /// Print the report on a single line.
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ClientConfig::default().with_api_base(&cli.api_base);
    if let Some(secs) = cli.timeout_secs.filter(|secs| *secs > 0) {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = NwsClient::new(&config).context("failed to build the HTTP client")?;
    let sources = AlertSources::new(cli.source, client);

    info!(
        lat = %cli.lat,
        long = %cli.long,
        strategy = %sources.strategy(),
        api_base = %config.api_base(),
        "fetching weather alerts"
    );

    let report = sources
        .fetch(&cli.lat, &cli.long)
        .await
        .with_context(|| format!("failed to get weather alerts for {},{}", cli.lat, cli.long))?
        .with_version(service_version());

    let rendered = render_report(&report, OutputFormat::from_compact_flag(cli.compact))
        .context("failed to serialize the alert report")?;
    println!("{}", rendered);

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
