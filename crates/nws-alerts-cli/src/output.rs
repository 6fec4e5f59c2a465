//! Rendering of alert reports for stdout.

use nws_alerts_lib::AlertReport;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented JSON, one field per line.
    #[default]
    Pretty,
    /// Single-line JSON, convenient for piping into other tools.
    Compact,
}

impl OutputFormat {
    pub fn from_compact_flag(compact: bool) -> Self {
        if compact {
            OutputFormat::Compact
        } else {
            OutputFormat::Pretty
        }
    }
}

/// Serialize `report` using the same field names as the Lambda output.
pub fn render_report(report: &AlertReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(report),
        OutputFormat::Compact => serde_json::to_string(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nws_alerts_lib::AlertItem;

    fn sample() -> AlertReport {
        let mut report = AlertReport {
            latitude: 41.257,
            longitude: -70.1115,
            city: "Nantucket".to_string(),
            state: "MA".to_string(),
            alerts: vec![AlertItem {
                event: "Wind Advisory".to_string(),
                ..AlertItem::default()
            }],
            ..AlertReport::default()
        };
        report.set_zone("MAZ024", "https://api.weather.gov/zones/forecast/MAZ024");
        report.with_version("1.2.abc")
    }

    #[test]
    fn compact_flag_selects_format() {
        assert_eq!(OutputFormat::from_compact_flag(true), OutputFormat::Compact);
        assert_eq!(OutputFormat::from_compact_flag(false), OutputFormat::Pretty);
    }

    #[test]
    fn compact_output_is_a_single_line() {
        let rendered = render_report(&sample(), OutputFormat::Compact).unwrap();
        assert!(!rendered.contains('\n'));
        assert!(rendered.contains("\"zone\":\"MAZ024\""));
        assert!(rendered.contains("\"version\":\"1.2.abc\""));
    }

    #[test]
    fn pretty_output_uses_report_field_names() {
        let rendered = render_report(&sample(), OutputFormat::Pretty).unwrap();
        assert!(rendered.lines().count() > 1);

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["city"], "Nantucket");
        assert_eq!(
            value["alertsurl"],
            "https://alerts.weather.gov/cap/wwaatmget.php?x=MAZ024&y=1"
        );
        assert_eq!(value["alerts"][0]["event"], "Wind Advisory");
        assert!(value["alerts"][0]["start"].is_null());
    }
}
