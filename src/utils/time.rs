use chrono::{DateTime, Utc};

/// Formats the time between two instants, e.g. `"0.148s"`.
pub fn format_duration(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> String {
    let duration = ended_at - started_at;
    format!("{:.3}s", duration.num_milliseconds() as f64 / 1000.0)
}
