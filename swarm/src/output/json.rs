use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write as _;

use super::OutputFormatter;

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    // Stdout carries exactly one line, so there is no progress stream.
    fn progress(&self) -> Option<swarm_core::runner::ProgressFn> {
        None
    }

    fn print_summary(&self, summary: &swarm_core::runner::RunSummary) -> anyhow::Result<()> {
        let line = build_summary_line(summary);
        emit_json_line(&line)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonSummaryLine {
    pub kind: &'static str,

    pub total_requests: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub cancelled: bool,

    pub elapsed_secs: f64,
    pub requests_per_sec: f64,
    pub mean_latency_us: u64,
    pub latency: Option<JsonLatency>,

    pub status_codes: BTreeMap<u16, u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonLatency {
    pub count: u64,
    pub min: u64,
    pub mean: f64,
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
    pub max: u64,
}

fn build_summary_line(summary: &swarm_core::runner::RunSummary) -> JsonSummaryLine {
    JsonSummaryLine {
        kind: "summary",
        total_requests: summary.total_attempted,
        succeeded: summary.succeeded,
        failed: summary.failed,
        cancelled: summary.cancelled,
        elapsed_secs: summary.elapsed.as_secs_f64(),
        requests_per_sec: summary.requests_per_sec(),
        mean_latency_us: u64::try_from(summary.mean_latency().as_micros()).unwrap_or(u64::MAX),
        latency: summary.latency.map(|h| JsonLatency {
            count: h.count,
            min: h.min_us,
            mean: h.mean_us,
            p50: h.p50_us,
            p90: h.p90_us,
            p99: h.p99_us,
            max: h.max_us,
        }),
        status_codes: summary.status_codes.clone(),
    }
}

fn emit_json_line<T: Serialize>(line: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, line)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::time::Duration;
    use swarm_core::runner::RunSummary;

    #[test]
    fn summary_line_has_kind_and_counts() {
        let summary = RunSummary {
            total_attempted: 4,
            succeeded: 4,
            failed: 0,
            status_codes: BTreeMap::from([(200, 2), (500, 2)]),
            total_duration: Duration::from_millis(8),
            elapsed: Duration::from_secs(1),
            ..RunSummary::default()
        };

        let v: Value = match serde_json::to_value(build_summary_line(&summary)) {
            Ok(v) => v,
            Err(err) => panic!("to_value failed: {err}"),
        };

        assert_eq!(v["kind"], "summary");
        assert_eq!(v["total_requests"], 4);
        assert_eq!(v["succeeded"], 4);
        assert_eq!(v["failed"], 0);
        assert_eq!(v["cancelled"], false);
        assert_eq!(v["mean_latency_us"], 2_000);
        assert_eq!(v["status_codes"]["200"], 2);
        assert_eq!(v["status_codes"]["500"], 2);
        assert!(v["latency"].is_null());
    }
}
