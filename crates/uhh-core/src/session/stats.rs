//! Statistics engine.
//!
//! Pure derivation of totals, rate and a per-minute histogram from a session
//! snapshot. Nothing here is persisted.

use super::model::{FillerWordKind, Session};
use serde::{Deserialize, Serialize};

pub const MS_PER_MINUTE: i64 = 60_000;

/// Upper bound on histogram buckets (one week of minutes). Later events land
/// in the last bucket.
pub const MAX_HISTOGRAM_MINUTES: usize = 7 * 24 * 60;

/// Filler words counted in one 60-second window of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBucket {
    /// 1-based minute number
    pub minute: u32,
    pub uhh: u32,
}

/// Aggregate metrics for a single session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total_uhh: u32,
    /// Elapsed minutes, never below 1.0
    pub duration_minutes: f64,
    pub uhh_per_minute: f64,
    pub minute_by_minute_data: Vec<MinuteBucket>,
}

/// Computes statistics for `session`, using `now` as the end of an active one.
///
/// Bucket `i` covers `[start + (i-1)min, start + i·min)`, so an event exactly on
/// a boundary lands in the later bucket. Events outside the bucketed range are
/// clamped into the first or last bucket, which keeps the histogram total equal
/// to `total_uhh`. The histogram never exceeds [`MAX_HISTOGRAM_MINUTES`]
/// buckets; `duration_minutes` is not capped.
pub fn compute_stats(session: &Session, now: i64) -> SessionStats {
    let effective_end = session.end_time.unwrap_or(now);
    let elapsed_ms = effective_end.saturating_sub(session.start_time);
    let duration_minutes = (elapsed_ms as f64 / MS_PER_MINUTE as f64).max(1.0);

    let bucket_count = (duration_minutes.ceil() as usize).min(MAX_HISTOGRAM_MINUTES);
    let mut counts = vec![0u32; bucket_count];
    let mut total_uhh = 0u32;

    for event in session
        .events
        .iter()
        .filter(|e| e.kind == FillerWordKind::Uhh)
    {
        total_uhh += 1;
        let offset = event.timestamp.saturating_sub(session.start_time);
        let bucket = if offset < 0 {
            0
        } else {
            ((offset / MS_PER_MINUTE) as usize).min(bucket_count - 1)
        };
        counts[bucket] += 1;
    }

    let minute_by_minute_data = counts
        .into_iter()
        .enumerate()
        .map(|(i, uhh)| MinuteBucket {
            minute: i as u32 + 1,
            uhh,
        })
        .collect();

    SessionStats {
        total_uhh,
        duration_minutes,
        uhh_per_minute: total_uhh as f64 / duration_minutes,
        minute_by_minute_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::model::FillerWordEvent;

    fn session(start: i64, end: Option<i64>, event_times: &[i64]) -> Session {
        Session {
            id: "s".to_string(),
            name: "Talk".to_string(),
            start_time: start,
            end_time: end,
            events: event_times.iter().copied().map(FillerWordEvent::uhh).collect(),
            index: 0,
        }
    }

    fn buckets(pairs: &[(u32, u32)]) -> Vec<MinuteBucket> {
        pairs
            .iter()
            .map(|&(minute, uhh)| MinuteBucket { minute, uhh })
            .collect()
    }

    #[test]
    fn test_talk_scenario() {
        let s = session(0, Some(130_000), &[30_000, 95_000]);
        let stats = compute_stats(&s, 999_999);

        assert_eq!(stats.total_uhh, 2);
        assert!((stats.duration_minutes - 130.0 / 60.0).abs() < 1e-9);
        assert!((stats.uhh_per_minute - 2.0 / (130.0 / 60.0)).abs() < 1e-9);
        assert_eq!(
            stats.minute_by_minute_data,
            buckets(&[(1, 1), (2, 1), (3, 0)])
        );
    }

    #[test]
    fn test_fresh_session_has_one_empty_bucket() {
        let s = session(5_000, None, &[]);
        let stats = compute_stats(&s, 5_000);

        assert_eq!(stats.duration_minutes, 1.0);
        assert_eq!(stats.total_uhh, 0);
        assert_eq!(stats.uhh_per_minute, 0.0);
        assert_eq!(stats.minute_by_minute_data, buckets(&[(1, 0)]));
    }

    #[test]
    fn test_active_session_uses_now() {
        let s = session(0, None, &[10_000, 70_000, 150_000]);
        let stats = compute_stats(&s, 180_000);

        assert_eq!(stats.duration_minutes, 3.0);
        assert_eq!(
            stats.minute_by_minute_data,
            buckets(&[(1, 1), (2, 1), (3, 1)])
        );
    }

    #[test]
    fn test_boundary_event_goes_to_later_bucket() {
        let s = session(0, Some(150_000), &[60_000]);
        let stats = compute_stats(&s, 0);
        assert_eq!(
            stats.minute_by_minute_data,
            buckets(&[(1, 0), (2, 1), (3, 0)])
        );
    }

    #[test]
    fn test_out_of_range_events_are_clamped() {
        // One event before start, one exactly at the end of a 2-minute session.
        let s = session(10_000, Some(130_000), &[5_000, 130_000]);
        let stats = compute_stats(&s, 0);

        assert_eq!(stats.total_uhh, 2);
        assert_eq!(stats.minute_by_minute_data, buckets(&[(1, 1), (2, 1)]));
    }

    #[test]
    fn test_unknown_kinds_are_not_counted() {
        let mut s = session(0, Some(60_000), &[1_000]);
        s.events.push(FillerWordEvent {
            timestamp: 2_000,
            kind: FillerWordKind::Other("umm".to_string()),
        });
        let stats = compute_stats(&s, 0);
        assert_eq!(stats.total_uhh, 1);
        assert_eq!(stats.minute_by_minute_data, buckets(&[(1, 1)]));
    }

    #[test]
    fn test_end_before_start_still_floors_to_one_minute() {
        let s = session(100_000, Some(50_000), &[]);
        let stats = compute_stats(&s, 0);
        assert_eq!(stats.duration_minutes, 1.0);
        assert_eq!(stats.minute_by_minute_data.len(), 1);
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let s = session(i64::MIN, Some(0), &[i64::MAX, i64::MIN]);
        let stats = compute_stats(&s, 0);
        assert_eq!(stats.total_uhh, 2);
        assert_eq!(stats.minute_by_minute_data.len(), MAX_HISTOGRAM_MINUTES);
        assert_eq!(stats.minute_by_minute_data[0].uhh, 1);
        assert_eq!(stats.minute_by_minute_data[MAX_HISTOGRAM_MINUTES - 1].uhh, 1);

        let s = session(i64::MAX, None, &[0]);
        let stats = compute_stats(&s, i64::MIN);
        assert_eq!(stats.duration_minutes, 1.0);
        assert_eq!(stats.minute_by_minute_data, buckets(&[(1, 1)]));
    }

    #[test]
    fn test_histogram_is_capped_for_very_long_sessions() {
        // An active session started at the epoch, viewed decades later.
        let now = 1_760_000_000_000;
        let s = session(0, None, &[30_000, now - 1]);
        let stats = compute_stats(&s, now);

        assert!(stats.duration_minutes > MAX_HISTOGRAM_MINUTES as f64);
        assert_eq!(stats.minute_by_minute_data.len(), MAX_HISTOGRAM_MINUTES);
        let histogram_total: u32 = stats.minute_by_minute_data.iter().map(|b| b.uhh).sum();
        assert_eq!(histogram_total, 2);
        assert_eq!(stats.minute_by_minute_data[MAX_HISTOGRAM_MINUTES - 1].uhh, 1);
    }

    #[test]
    fn test_inverted_session_keeps_its_events() {
        let s = session(100_000, Some(50_000), &[40_000, 120_000]);
        let stats = compute_stats(&s, 0);
        assert_eq!(stats.total_uhh, 2);
        assert_eq!(stats.minute_by_minute_data, buckets(&[(1, 2)]));
    }

    #[test]
    fn test_invariants_hold_over_many_shapes() {
        for duration in [0_i64, 1, 59_999, 60_000, 60_001, 600_000, 3_725_000] {
            for step in [1_000_i64, 17_000, 59_999, 61_000] {
                let times: Vec<i64> = (0..duration + 70_000).step_by(step as usize).collect();
                let s = session(0, Some(duration), &times);
                let stats = compute_stats(&s, 0);

                assert!(stats.duration_minutes >= 1.0);
                let histogram_total: u32 = stats.minute_by_minute_data.iter().map(|b| b.uhh).sum();
                assert_eq!(histogram_total, stats.total_uhh);
                assert_eq!(
                    stats.minute_by_minute_data.len(),
                    stats.duration_minutes.ceil() as usize
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let s = session(0, None, &[1_000, 2_000, 61_000]);
        assert_eq!(compute_stats(&s, 90_000), compute_stats(&s, 90_000));
    }

    #[test]
    fn test_stats_json_shape() {
        let s = session(0, Some(60_000), &[1_000]);
        let json = serde_json::to_value(compute_stats(&s, 0)).unwrap();
        assert_eq!(json["totalUhh"], 1);
        assert_eq!(json["durationMinutes"], 1.0);
        assert_eq!(json["minuteByMinuteData"][0]["minute"], 1);
    }
}
