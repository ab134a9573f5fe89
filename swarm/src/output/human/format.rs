use std::time::Duration;

use super::duration::format_duration_single;

pub(crate) fn format_rate(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "0.00".to_string()
    }
}

pub(crate) fn format_micros(us: u64) -> String {
    format_duration_single(Duration::from_micros(us))
}
