use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

const MINUTES_PER_HOUR: u32 = 60;

/// Time left until the next `*/interval` minute slot, cron style
///
/// Slots are the minutes of the (local) hour divisible by `interval_minutes`,
/// so the schedule restarts at the top of every hour.
pub fn until_next_slot(now: DateTime<Utc>, interval_minutes: u32, timezone: Tz) -> Duration {
    let local = now.with_timezone(&timezone);
    let minute = local.minute();
    let step = interval_minutes.max(1);

    let next_slot = (minute / step + 1) * step;
    let minutes_ahead = if next_slot < MINUTES_PER_HOUR {
        next_slot - minute
    } else {
        MINUTES_PER_HOUR - minute
    };

    let into_minute = Duration::from_secs(local.second().into())
        + Duration::from_nanos(local.nanosecond().min(999_999_999).into());
    Duration::from_secs(u64::from(minutes_ahead) * 60).saturating_sub(into_minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, s).unwrap()
    }

    #[test]
    fn test_within_hour() {
        assert_eq!(until_next_slot(at(10, 7, 30), 5, Tz::UTC), Duration::from_secs(150));
        assert_eq!(until_next_slot(at(10, 10, 0), 5, Tz::UTC), Duration::from_secs(300));
        assert_eq!(until_next_slot(at(10, 0, 1), 1, Tz::UTC), Duration::from_secs(59));
    }

    #[test]
    fn test_wraps_to_next_hour() {
        assert_eq!(until_next_slot(at(10, 55, 0), 5, Tz::UTC), Duration::from_secs(300));
        // 7 does not divide 60: last slot is :56, next one is :00
        assert_eq!(until_next_slot(at(10, 59, 59), 7, Tz::UTC), Duration::from_secs(1));
        assert_eq!(until_next_slot(at(10, 0, 0), 60, Tz::UTC), Duration::from_secs(3600));
        assert_eq!(until_next_slot(at(10, 30, 0), 90, Tz::UTC), Duration::from_secs(1800));
    }

    #[test]
    fn test_local_minute_offsets() {
        // Kathmandu is UTC+05:45, so 10:00 UTC is 15:45 local
        assert_eq!(
            until_next_slot(at(10, 0, 0), 15, chrono_tz::Asia::Kathmandu),
            Duration::from_secs(900)
        );
        assert_eq!(
            until_next_slot(at(10, 0, 0), 10, chrono_tz::Asia::Kathmandu),
            Duration::from_secs(300)
        );
    }
}
