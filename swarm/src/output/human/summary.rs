use std::fmt::Write as _;

use swarm_core::runner::RunSummary;

use super::duration::{format_duration_single, format_secs};
use super::format::{format_micros, format_rate};

const RULE: &str = "--------------------------------------------------";

pub(crate) fn render(summary: &RunSummary) -> String {
    let mut out = String::new();

    writeln!(out, "{RULE}").ok();
    if summary.cancelled {
        out.push_str("Summary (interrupted):\n");
    } else {
        out.push_str("Summary:\n");
    }
    writeln!(out, "  Total Requests: {}", summary.total_attempted).ok();
    writeln!(out, "  Success:        {}", summary.succeeded).ok();
    writeln!(out, "  Failed:         {}", summary.failed).ok();
    writeln!(out, "  Total Duration: {}", format_secs(summary.elapsed)).ok();
    writeln!(out, "{RULE}").ok();

    writeln!(
        out,
        "  RPS:            {} req/s",
        format_rate(summary.requests_per_sec())
    )
    .ok();
    writeln!(
        out,
        "  Mean Latency:   {}",
        format_duration_single(summary.mean_latency())
    )
    .ok();

    if let Some(h) = &summary.latency {
        writeln!(
            out,
            "  Latency:        p50={} p90={} p99={} max={} (n={})",
            format_micros(h.p50_us),
            format_micros(h.p90_us),
            format_micros(h.p99_us),
            format_micros(h.max_us),
            h.count
        )
        .ok();
    } else {
        out.push_str("  Latency:        n/a\n");
    }
    writeln!(out, "{RULE}").ok();

    if !summary.status_codes.is_empty() {
        out.push_str("Status codes:\n");
        for (code, count) in &summary.status_codes {
            writeln!(out, "  {code}: {count}").ok();
        }
    }

    out
}
