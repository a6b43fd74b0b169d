use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};

/// Wall-clock time of a segment, keeping the offset it was written with.
pub type ProgramDateTime = DateTime<FixedOffset>;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601-like program date time.
///
/// Accepts RFC 3339, offsets without a colon (`+0000`), and timestamps
/// without any offset, which are taken as UTC.
pub fn parse_program_date_time(s: &str) -> Option<ProgramDateTime> {
    let s = s.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts);
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }

    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

/// Advance a timestamp by a duration in seconds, rounded to milliseconds.
///
/// Durations that cannot be represented leave the timestamp unchanged.
pub fn advance(ts: ProgramDateTime, seconds: f64) -> ProgramDateTime {
    if !seconds.is_finite() {
        return ts;
    }
    TimeDelta::try_milliseconds((seconds * 1000.0).round() as i64)
        .and_then(|delta| ts.checked_add_signed(delta))
        .unwrap_or(ts)
}

/// Format as `YYYY-MM-DD HH:MM:SS.mmm` in the timestamp's own offset.
pub fn format_timestamp(ts: &ProgramDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Format a duration in seconds as `HH:MM:SS.mmm`.
///
/// Negative durations show as zero. Returns `None` when the value does not
/// fit in whole milliseconds.
pub fn format_duration(seconds: f64) -> Option<String> {
    let millis = (seconds * 1000.0).round();
    if !millis.is_finite() || millis >= u64::MAX as f64 {
        return None;
    }
    let total_ms = if millis > 0.0 { millis as u64 } else { 0 };

    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    Some(format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_program_date_time("2024-03-01T12:00:00.500Z").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-01 12:00:00.500");
    }

    #[test]
    fn test_parse_compact_offset() {
        let ts = parse_program_date_time("2024-03-01T12:00:00.000+0200").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 7200);
        assert_eq!(format_timestamp(&ts), "2024-03-01 12:00:00.000");
    }

    #[test]
    fn test_parse_without_offset_is_utc() {
        let ts = parse_program_date_time("2024-03-01T12:00:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_program_date_time("yesterday").is_none());
        assert!(parse_program_date_time("").is_none());
    }

    #[test]
    fn test_advance() {
        let ts = parse_program_date_time("2024-03-01T23:59:58.000Z").unwrap();
        let next = advance(ts, 2.5);
        assert_eq!(format_timestamp(&next), "2024-03-02 00:00:00.500");
        assert_eq!(advance(ts, f64::NAN), ts);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0).as_deref(), Some("00:00:00.000"));
        assert_eq!(format_duration(6.006).as_deref(), Some("00:00:06.006"));
        assert_eq!(format_duration(3725.5).as_deref(), Some("01:02:05.500"));
        assert_eq!(format_duration(-1.0).as_deref(), Some("00:00:00.000"));
    }

    #[test]
    fn test_format_duration_out_of_range() {
        assert_eq!(format_duration(1e20), None);
        assert_eq!(format_duration(f64::INFINITY), None);
        assert_eq!(format_duration(f64::NAN), None);
    }
}
