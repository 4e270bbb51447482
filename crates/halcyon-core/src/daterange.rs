//! Named date-range periods and the timestamp filter built on them.
//!
//! A period resolves against an explicit "now" so callers (and tests)
//! control the reference instant. Named ranges end at today's day-end
//! (23:59:59.999) and start at day-start of now minus the calendar offset.

use chrono::{DateTime, Duration, Months, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Named date-range shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "all")]
    All,
    #[serde(rename = "custom")]
    Custom,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Last week",
            Period::Month => "Last month",
            Period::ThreeMonths => "Last 3 months",
            Period::SixMonths => "Last 6 months",
            Period::Year => "Last year",
            Period::All => "All time",
            Period::Custom => "Custom",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "3months" => Ok(Period::ThreeMonths),
            "6months" => Ok(Period::SixMonths),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            "custom" => Ok(Period::Custom),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

/// Inclusive start/end instants. Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// `all` ranges start here; nothing predates the product.
fn epoch_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

fn day_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn day_end(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("valid day-end time")
        .and_utc()
}

/// Resolve a period to a concrete range.
///
/// `custom` bounds are used verbatim for [`Period::Custom`]; when absent,
/// the range falls back to the one-month window.
pub fn range_for(
    period: Period,
    now: DateTime<Utc>,
    custom: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> DateRange {
    if period == Period::Custom {
        if let Some((start, end)) = custom {
            return DateRange { start, end };
        }
    }

    let end = day_end(now);
    let start = match period {
        Period::Week => day_start(now - Duration::days(7)),
        Period::Month | Period::Custom => months_back(now, 1),
        Period::ThreeMonths => months_back(now, 3),
        Period::SixMonths => months_back(now, 6),
        Period::Year => months_back(now, 12),
        Period::All => epoch_start(),
    };
    DateRange { start, end }
}

fn months_back(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let shifted = now
        .checked_sub_months(Months::new(months))
        .unwrap_or(epoch_start());
    day_start(shifted)
}

/// Keep records whose timestamp lies within the range, inclusive on both
/// ends. Filtering an already-filtered collection with the same range
/// returns the identical set.
pub fn filter_by_range<T: Clone>(
    records: &[T],
    date_of: impl Fn(&T) -> DateTime<Utc>,
    range: &DateRange,
) -> Vec<T> {
    records
        .iter()
        .filter(|r| range.contains(date_of(r)))
        .cloned()
        .collect()
}

/// Stateful period selection, one per dashboard view.
///
/// Holds the chosen period plus optional custom bounds; the concrete range
/// is recomputed from "now" on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateFilter {
    period: Period,
    custom_start: Option<DateTime<Utc>>,
    custom_end: Option<DateTime<Utc>>,
}

impl Default for DateFilter {
    fn default() -> Self {
        Self {
            period: Period::Month,
            custom_start: None,
            custom_end: None,
        }
    }
}

impl DateFilter {
    pub fn period(&self) -> Period {
        self.period
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    /// Select an explicit window and switch to the custom period.
    pub fn set_custom_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidRange { start, end });
        }
        self.custom_start = Some(start);
        self.custom_end = Some(end);
        self.period = Period::Custom;
        Ok(())
    }

    pub fn current_range(&self, now: DateTime<Utc>) -> DateRange {
        let custom = match (self.custom_start, self.custom_end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        };
        range_for(self.period, now, custom)
    }

    pub fn contains(&self, now: DateTime<Utc>, instant: DateTime<Utc>) -> bool {
        self.current_range(now).contains(instant)
    }

    pub fn label(&self) -> String {
        if self.period == Period::Custom {
            if let (Some(start), Some(end)) = (self.custom_start, self.custom_end) {
                return format!("{} - {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"));
            }
        }
        self.period.label().to_string()
    }

    /// Back to the default one-month window.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn week_range_ends_at_day_end() {
        let now = noon(2025, 6, 15);
        let range = range_for(Period::Week, now, None);
        assert_eq!(range.end, Utc.with_ymd_and_hms(2025, 6, 15, 23, 59, 59).unwrap() + Duration::milliseconds(999));
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 6, 8, 0, 0, 0).unwrap());
    }

    #[test]
    fn week_filter_excludes_eight_days_ago_includes_six() {
        let now = noon(2025, 6, 15);
        let range = range_for(Period::Week, now, None);
        let records = vec![now - Duration::days(8), now - Duration::days(6)];
        let kept = filter_by_range(&records, |t| *t, &range);
        assert_eq!(kept, vec![now - Duration::days(6)]);
    }

    #[test]
    fn month_range_uses_calendar_offset() {
        let now = noon(2025, 3, 31);
        let range = range_for(Period::Month, now, None);
        // chrono clamps to the last day of the shorter month.
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn all_range_starts_at_epoch() {
        let range = range_for(Period::All, noon(2025, 1, 1), None);
        assert_eq!(range.start, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn custom_bounds_are_verbatim() {
        let start = noon(2025, 1, 3);
        let end = noon(2025, 1, 9);
        let range = range_for(Period::Custom, noon(2025, 6, 1), Some((start, end)));
        assert_eq!(range, DateRange { start, end });
    }

    #[test]
    fn custom_without_bounds_falls_back_to_month() {
        let now = noon(2025, 6, 15);
        assert_eq!(
            range_for(Period::Custom, now, None),
            range_for(Period::Month, now, None)
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let now = noon(2025, 6, 15);
        let range = range_for(Period::Week, now, None);
        assert!(range.contains(range.start));
        assert!(range.contains(range.end));
        assert!(!range.contains(range.end + Duration::milliseconds(1)));
    }

    #[test]
    fn filter_is_idempotent() {
        let now = noon(2025, 6, 15);
        let range = range_for(Period::Week, now, None);
        let records: Vec<_> = (0..20).map(|d| now - Duration::days(d)).collect();
        let once = filter_by_range(&records, |t| *t, &range);
        let twice = filter_by_range(&once, |t| *t, &range);
        assert_eq!(once, twice);
    }

    #[test]
    fn date_filter_rejects_inverted_custom_range() {
        let mut filter = DateFilter::default();
        let err = filter.set_custom_range(noon(2025, 2, 1), noon(2025, 1, 1));
        assert!(err.is_err());
        assert_eq!(filter.period(), Period::Month);
    }

    #[test]
    fn date_filter_custom_label_shows_bounds() {
        let mut filter = DateFilter::default();
        filter
            .set_custom_range(noon(2025, 1, 3), noon(2025, 1, 9))
            .unwrap();
        assert_eq!(filter.label(), "2025-01-03 - 2025-01-09");
    }

    proptest! {
        #[test]
        fn filtering_twice_never_changes_the_set(day_offsets in prop::collection::vec(0i64..400, 0..50)) {
            let now = noon(2025, 6, 15);
            let records: Vec<_> = day_offsets.iter().map(|d| now - Duration::days(*d)).collect();
            for period in [Period::Week, Period::Month, Period::Year, Period::All] {
                let range = range_for(period, now, None);
                let once = filter_by_range(&records, |t| *t, &range);
                let twice = filter_by_range(&once, |t| *t, &range);
                prop_assert_eq!(&once, &twice);
            }
        }
    }
}
