use clap::Parser;
use std::time::Duration;

fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("duration cannot be empty (expected e.g. 10s, 250ms, 1m)".to_string());
    }

    let number_end = s
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(s.len(), |(idx, _)| idx);

    if number_end == 0 {
        return Err(format!(
            "invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"
        ));
    }

    let (number_str, unit_str) = s.split_at(number_end);
    let value: u64 = number_str
        .parse()
        .map_err(|_| format!("invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"))?;

    let unit = unit_str.trim();
    match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => Ok(Duration::from_secs(value)),
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => {
            Ok(Duration::from_millis(value))
        }
        "us" | "µs" | "usec" | "usecs" | "microsecond" | "microseconds" => {
            Ok(Duration::from_micros(value))
        }
        "m" | "min" | "mins" | "minute" | "minutes" => {
            let secs = value
                .checked_mul(60)
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        _ => Err(format!(
            "invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"
        )),
    }
}

/// A zero timeout would fail every request before it is sent.
fn parse_timeout(input: &str) -> Result<Duration, String> {
    let d = parse_duration(input)?;
    if d.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(d)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    HumanReadable,
    /// Emit a single JSON summary line (NDJSON) to stdout.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "swarm",
    author,
    version,
    about = "Fire a fixed number of HTTP GET requests at a URL with bounded concurrency",
    long_about = "swarm sends exactly --requests GET requests to --url, keeping at most --concurrency of them in flight, and prints a summary of successes, failures, latency and status codes.\n\nAny HTTP response counts as a success (including 4xx/5xx); only transport failures, timeouts and cancellation count as failures.\n\nCtrl+C (or SIGTERM) stops dispatching, aborts in-flight requests and still prints the summary.",
    after_help = "Examples:\n  swarm -u http://localhost:8080/ -n 1000 -c 50\n  swarm -u https://example.com/ -n 200 -c 10 --timeout 5s\n  swarm -u http://localhost:8080/ -n 1000 -c 50 --output json"
)]
pub struct Cli {
    /// Target URL (http or https)
    #[arg(short = 'u', long, env = "SWARM_URL")]
    pub url: String,

    /// Total number of requests to send
    #[arg(short = 'n', long, env = "SWARM_REQUESTS")]
    pub requests: u64,

    /// Maximum number of requests in flight at once
    #[arg(short = 'c', long, env = "SWARM_CONCURRENCY")]
    pub concurrency: u64,

    /// Per-request timeout (e.g. 10s, 250ms, 1m)
    #[arg(long, env = "SWARM_TIMEOUT", value_parser = parse_timeout, default_value = "30s")]
    pub timeout: Duration,

    /// TCP connect timeout
    #[arg(long, env = "SWARM_CONNECT_TIMEOUT", value_parser = parse_timeout, default_value = "3s")]
    pub connect_timeout: Duration,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::HumanReadable)]
    pub output: OutputFormat,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
