use crate::config::DashboardConfig;
use crate::schema::{FilterSelection, Period};
use crate::utils::{
    end_of_day, get_month_starts_in_period, get_week_starts_in_period, next_month_start,
    start_of_day, subtract_months,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inclusive time window `[start, end]` an invoice's `created_at` must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Weekly,
    Monthly,
}

impl DateWindow {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Weekly for windows of at most `weekly_span_days` days, monthly otherwise.
    /// A span limit too large to represent counts as monthly.
    pub fn granularity(&self, config: &DashboardConfig) -> Granularity {
        match Duration::try_days(config.weekly_span_days) {
            Some(limit) if self.span() <= limit => Granularity::Weekly,
            _ => Granularity::Monthly,
        }
    }
}

/// One chart bucket: an inclusive run of days and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

/// Contiguous buckets covering `[first_day, last_day]`.
///
/// Weekly buckets are 7-day runs from `first_day`; monthly buckets are calendar
/// months, the first and last clipped to the range.
pub fn bucket_ranges(
    first_day: NaiveDate,
    last_day: NaiveDate,
    granularity: Granularity,
) -> Vec<BucketRange> {
    let multi_year = first_day.year() != last_day.year();

    match granularity {
        Granularity::Weekly => get_week_starts_in_period(first_day, last_day)
            .into_iter()
            .map(|start| {
                let label = if multi_year {
                    start.format("Wk of %b %d %Y").to_string()
                } else {
                    start.format("Wk of %b %d").to_string()
                };
                BucketRange {
                    start,
                    end: (start + Duration::days(6)).min(last_day),
                    label,
                }
            })
            .collect(),
        Granularity::Monthly => get_month_starts_in_period(first_day, last_day)
            .into_iter()
            .map(|month| BucketRange {
                start: month.max(first_day),
                end: (next_month_start(month) - Duration::days(1)).min(last_day),
                label: month.format("%b %Y").to_string(),
            })
            .collect(),
    }
}

/// Resolves the selection's period against `now`.
///
/// Returns `None` for a `Custom` period missing either bound, or whose start day
/// comes after its end day.
pub fn resolve_window(selection: &FilterSelection, now: NaiveDateTime) -> Option<DateWindow> {
    match selection.period.months() {
        Some(months) => Some(DateWindow {
            start: subtract_months(now, months),
            end: now,
        }),
        None => {
            let (start, end) = (selection.custom_start?, selection.custom_end?);
            if start > end {
                return None;
            }
            Some(DateWindow {
                start: start_of_day(start),
                end: end_of_day(end),
            })
        }
    }
}

/// Bucket granularity for a selection.
///
/// `1Month` is always weekly, the longer fixed periods always monthly, and a custom
/// window depends on its span.
pub fn granularity_for(
    selection: &FilterSelection,
    window: Option<&DateWindow>,
    config: &DashboardConfig,
) -> Granularity {
    match selection.period {
        Period::OneMonth => Granularity::Weekly,
        Period::ThreeMonths | Period::OneYear => Granularity::Monthly,
        Period::Custom => window
            .map(|w| w.granularity(config))
            .unwrap_or(Granularity::Monthly),
    }
}
