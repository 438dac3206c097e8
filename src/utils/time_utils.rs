use chrono::{DateTime, Local, Utc};

/// Monotonic clock used for timing fetches and frames.
pub type AppInstant = web_time::Instant;

/// Display format for every time label on the chart (24-hour, no date).
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Render an instant as a local 24-hour clock label, e.g. `14:03:27`.
pub fn format_local_clock(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format(CLOCK_FORMAT).to_string()
}

/// Compact elapsed-time label: `45s` under a minute, `3m 5s` otherwise.
pub fn format_span_secs(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_labels() {
        assert_eq!(format_span_secs(0), "0s");
        assert_eq!(format_span_secs(59), "59s");
        assert_eq!(format_span_secs(60), "1m 0s");
        assert_eq!(format_span_secs(185), "3m 5s");
    }

    #[test]
    fn clock_label_shape() {
        let label = format_local_clock(Utc::now());
        assert_eq!(label.len(), 8);
        assert_eq!(&label[2..3], ":");
    }
}
