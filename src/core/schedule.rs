//! Reminder schedule arithmetic.
//!
//! Pure functions only: computing the next reminder when a habit is saved,
//! and advancing a reminder by one period after it has been delivered.
//! Times of day are interpreted in the timezone of the `now` they are
//! combined with, never as naive UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Attaches `offset` to the local wall-clock instant `date @ time`.
#[must_use]
pub fn at_local(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.and_time(time);
    let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Computes the next reminder for a habit performed at `habit_time` every
/// `frequency_days` days, as seen from `now`.
///
/// If today's slot is still ahead, the reminder is today at `habit_time`.
/// If it has passed, or is exactly `now`, the reminder is `frequency_days`
/// days after today, so a habit saved at its own time never fires at once.
/// The result carries the same offset as `now`.
#[must_use]
pub fn compute_next_reminder(
    habit_time: NaiveTime,
    frequency_days: i32,
    now: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    let offset = *now.offset();
    let today = now.date_naive();
    let candidate = at_local(today, habit_time, offset);

    let next_date = if candidate <= now {
        today + TimeDelta::days(i64::from(frequency_days))
    } else {
        today
    };

    at_local(next_date, habit_time, offset)
}

/// Moves a delivered reminder forward by one period.
///
/// The step is taken from the reminder itself, not from the current time, so
/// a late sweep does not shift the habit's time of day.
#[must_use]
pub fn advance_by_frequency(next_reminder: DateTime<Utc>, frequency_days: i32) -> DateTime<Utc> {
    next_reminder + TimeDelta::days(i64::from(frequency_days))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn local(
        tz: FixedOffset,
        (y, mo, d): (i32, u32, u32),
        (h, mi, s): (u32, u32, u32),
    ) -> DateTime<FixedOffset> {
        at_local(
            NaiveDate::from_ymd_opt(y, mo, d).unwrap(),
            NaiveTime::from_hms_opt(h, mi, s).unwrap(),
            tz,
        )
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_at_local_keeps_wall_clock() {
        let dt = local(offset(7), (2025, 10, 24), (12, 0, 0));
        assert_eq!(dt.to_rfc3339(), "2025-10-24T12:00:00+07:00");
        assert_eq!(
            dt.with_timezone(&Utc).to_rfc3339(),
            "2025-10-24T05:00:00+00:00"
        );
    }

    #[test]
    fn test_upcoming_slot_is_today() {
        let now = local(offset(7), (2025, 10, 24), (12, 0, 0));
        let next = compute_next_reminder(time(17, 35, 0), 1, now);
        assert_eq!(next.to_rfc3339(), "2025-10-24T17:35:00+07:00");
    }

    #[test]
    fn test_slot_exactly_now_moves_one_period() {
        let now = local(offset(7), (2025, 10, 24), (12, 0, 0));
        let next = compute_next_reminder(time(12, 0, 0), 1, now);
        assert_eq!(next.to_rfc3339(), "2025-10-25T12:00:00+07:00");
    }

    #[test]
    fn test_passed_slot_uses_frequency() {
        let now = local(offset(7), (2025, 10, 24), (12, 0, 0));
        let next = compute_next_reminder(time(8, 15, 0), 3, now);
        assert_eq!(next.to_rfc3339(), "2025-10-27T08:15:00+07:00");
    }

    #[test]
    fn test_upcoming_slot_ignores_frequency() {
        let now = local(offset(7), (2025, 10, 24), (12, 0, 0));
        let next = compute_next_reminder(time(12, 0, 1), 7, now);
        assert_eq!(next.to_rfc3339(), "2025-10-24T12:00:01+07:00");
    }

    #[test]
    fn test_passed_slot_crosses_month_end() {
        let now = local(offset(0), (2025, 10, 30), (23, 0, 0));
        let next = compute_next_reminder(time(6, 0, 0), 2, now);
        assert_eq!(next.to_rfc3339(), "2025-11-01T06:00:00+00:00");
    }

    #[test]
    fn test_rule_holds_across_offsets() {
        let times = [time(0, 0, 0), time(9, 30, 0), time(12, 0, 0), time(23, 59, 59)];
        for hours in [-11, -5, 0, 3, 7, 14] {
            let tz = offset(hours);
            let now = local(tz, (2025, 3, 10), (12, 0, 0));
            for habit_time in times {
                for frequency in 1..=7 {
                    let next = compute_next_reminder(habit_time, frequency, now);
                    let candidate = at_local(now.date_naive(), habit_time, tz);
                    let expected = if candidate <= now {
                        at_local(
                            now.date_naive() + TimeDelta::days(i64::from(frequency)),
                            habit_time,
                            tz,
                        )
                    } else {
                        candidate
                    };
                    assert_eq!(next, expected, "offset {hours}h, time {habit_time}");
                    assert_eq!(next.offset(), &tz);
                    assert_eq!(next.time(), habit_time);
                    assert!(next > now);
                }
            }
        }
    }

    #[test]
    fn test_same_inputs_same_result() {
        let now = local(offset(7), (2025, 10, 24), (12, 0, 0));
        let first = compute_next_reminder(time(9, 0, 0), 4, now);
        let second = compute_next_reminder(time(9, 0, 0), 4, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_advance_adds_whole_days_to_stored_value() {
        let stored = local(offset(7), (2025, 10, 24), (17, 35, 0)).with_timezone(&Utc);
        let advanced = advance_by_frequency(stored, 3);
        assert_eq!(
            advanced.with_timezone(&offset(7)).to_rfc3339(),
            "2025-10-27T17:35:00+07:00"
        );
    }
}
