use crate::types::repo::UNKNOWN_PUSH_AGE_DAYS;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Whole days between `pushed_at` (RFC 3339) and `now`, floored at 0.
/// Missing or unparsable timestamps map to the "very stale" sentinel.
pub fn days_since_push(pushed_at: Option<&str>, now: DateTime<Utc>) -> i64 {
    let Some(raw) = pushed_at else {
        return UNKNOWN_PUSH_AGE_DAYS;
    };
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(pushed) => (now - pushed.with_timezone(&Utc)).num_days().max(0),
        Err(err) => {
            debug!(pushed_at = raw, error = %err, "unparsable push timestamp");
            UNKNOWN_PUSH_AGE_DAYS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn counts_whole_days() {
        assert_eq!(days_since_push(Some("2025-02-19T12:00:00Z"), now()), 10);
        assert_eq!(days_since_push(Some("2025-02-28T13:00:00Z"), now()), 0);
    }

    #[test]
    fn honours_offsets() {
        assert_eq!(days_since_push(Some("2025-02-27T14:00:00+02:00"), now()), 2);
    }

    #[test]
    fn future_pushes_floor_at_zero() {
        assert_eq!(days_since_push(Some("2025-04-01T00:00:00Z"), now()), 0);
    }

    #[test]
    fn missing_or_invalid_timestamps_use_sentinel() {
        assert_eq!(days_since_push(None, now()), 9999);
        assert_eq!(days_since_push(Some("yesterday"), now()), 9999);
        assert_eq!(days_since_push(Some("2025-02-19T12:00:00"), now()), 9999);
    }
}
