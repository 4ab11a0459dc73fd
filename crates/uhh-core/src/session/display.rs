//! Presentation helpers shared by every front end.
//!
//! These are the small formatting rules the session list, the live session
//! view and the stats page agree on.

use super::stats::{MinuteBucket, SessionStats};
use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Formats fractional minutes as `MM:SS`.
pub fn format_duration(minutes: f64) -> String {
    let mins = minutes.floor();
    let secs = ((minutes - mins) * 60.0).floor();
    format!("{:02}:{:02}", mins as u64, secs as u64)
}

/// Formats an elapsed clock as `MM:SS`, or `H:MM:SS` once an hour has passed.
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let mins = (total / 60) % 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// 1-based minute a live session is currently in.
pub fn current_minute(elapsed_seconds: f64) -> u32 {
    (elapsed_seconds.max(0.0) / 60.0).floor() as u32 + 1
}

/// Last minute shown on a histogram for the given stats.
pub fn last_minute(stats: &SessionStats) -> u32 {
    stats.duration_minutes.ceil() as u32
}

/// Rate with two decimals, as shown next to every session.
pub fn format_rate(uhh_per_minute: f64) -> String {
    format!("{:.2}", uhh_per_minute)
}

/// The minute with the most filler words, as `(minute, uhh)`.
///
/// On a tie the earliest minute wins. `None` when nothing was counted, which
/// is the "zero uhh" case a front end celebrates instead.
pub fn peak_minute(stats: &SessionStats) -> Option<(u32, u32)> {
    if stats.total_uhh == 0 {
        return None;
    }
    stats
        .minute_by_minute_data
        .iter()
        .fold(None, |peak: Option<&MinuteBucket>, bucket| match peak {
            Some(best) if bucket.uhh <= best.uhh => Some(best),
            _ => Some(bucket),
        })
        .map(|bucket| (bucket.minute, bucket.uhh))
}

/// Number of minutes without a single filler word.
pub fn clean_minutes(stats: &SessionStats) -> usize {
    stats
        .minute_by_minute_data
        .iter()
        .filter(|bucket| bucket.uhh == 0)
        .count()
}

/// Elapsed seconds between `start_ms` and `now_ms`.
pub fn elapsed_seconds(start_ms: i64, now_ms: i64) -> f64 {
    (now_ms - start_ms) as f64 / 1000.0
}

/// Whether two epoch-ms timestamps fall on the same calendar day in `tz`.
pub fn is_same_day<Tz: TimeZone>(start_ms: i64, end_ms: i64, tz: &Tz) -> bool {
    let (Some(start), Some(end)) = (to_local(start_ms, tz), to_local(end_ms, tz)) else {
        return false;
    };
    start.year() == end.year() && start.ordinal() == end.ordinal()
}

fn to_local<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|utc| utc.with_timezone(tz))
}
