//! Consecutive-day streak counting.

use chrono::{DateTime, NaiveDate, Utc};

/// Count consecutive calendar days, walking backward from `today`, on which
/// at least one record falls. Stops at the first gap.
///
/// Records are sorted descending by timestamp; an expected day-offset starts
/// at zero. A record whose day-distance from today equals the offset extends
/// the streak; a larger distance is a gap and ends it; a smaller distance is
/// a same-day duplicate and is skipped.
pub fn streak_days<T>(
    records: &[T],
    date_of: impl Fn(&T) -> DateTime<Utc>,
    today: NaiveDate,
) -> u32 {
    let mut days: Vec<NaiveDate> = records.iter().map(|r| date_of(r).date_naive()).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak: i64 = 0;
    for day in days {
        let distance = (today - day).num_days();
        if distance == streak {
            streak += 1;
        } else if distance > streak {
            break;
        }
        // distance < streak: same-day duplicate, keep going.
    }
    streak as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ts(days_ago: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap() - Duration::days(days_ago)
    }

    fn today() -> NaiveDate {
        ts(0).date_naive()
    }

    #[test]
    fn empty_collection_has_no_streak() {
        let records: Vec<DateTime<Utc>> = vec![];
        assert_eq!(streak_days(&records, |t| *t, today()), 0);
    }

    #[test]
    fn n_consecutive_days_ending_today_count_n() {
        let records: Vec<_> = (0..5).map(ts).collect();
        assert_eq!(streak_days(&records, |t| *t, today()), 5);
    }

    #[test]
    fn gap_cuts_the_streak() {
        // Days 0, 1, 3: the missing day 2 ends the walk at 2.
        let records = vec![ts(0), ts(1), ts(3)];
        assert_eq!(streak_days(&records, |t| *t, today()), 2);
    }

    #[test]
    fn streak_not_ending_today_is_zero() {
        let records = vec![ts(1), ts(2), ts(3)];
        assert_eq!(streak_days(&records, |t| *t, today()), 0);
    }

    #[test]
    fn same_day_duplicates_do_not_inflate() {
        let records = vec![ts(0), ts(0), ts(0), ts(1)];
        assert_eq!(streak_days(&records, |t| *t, today()), 2);
    }

    #[test]
    fn unsorted_input_is_handled() {
        let records = vec![ts(2), ts(0), ts(1)];
        assert_eq!(streak_days(&records, |t| *t, today()), 3);
    }
}
