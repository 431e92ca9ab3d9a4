use crate::config::DashboardConfig;
use crate::schema::{FilterSelection, Invoice};
use crate::utils::months_between;
use crate::window::{bucket_ranges, granularity_for, resolve_window, Granularity};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesBucket {
    pub label: String,
    /// First day covered, inclusive
    pub start: NaiveDate,
    /// Last day covered, inclusive
    pub end: NaiveDate,
    /// Paid-like income before scaling
    pub raw_income: f64,
    /// `raw_income / display_divisor`
    pub income: f64,
    /// Change of `raw_income` against the previous bucket, in percent
    pub growth_pct: f64,
    pub highlighted: bool,
}

/// Builds the chronological income series for the chart.
///
/// Buckets cover the resolved window contiguously. When the window cannot be
/// resolved they cover the span of `filtered` by month instead, and an empty
/// `filtered` gives an empty series.
pub fn build_series(
    filtered: &[Invoice],
    selection: &FilterSelection,
    now: NaiveDateTime,
    config: &DashboardConfig,
) -> Vec<SeriesBucket> {
    let window = resolve_window(selection, now);
    let granularity = granularity_for(selection, window.as_ref(), config);

    let range = match window {
        Some(w) => Some((w.start.date(), w.end.date(), granularity)),
        None => invoice_extent(filtered).map(|(first, last)| (first, last, Granularity::Monthly)),
    };
    let Some((first_day, last_day, granularity)) = range else {
        return Vec::new();
    };

    let mut buckets = empty_buckets(first_day, last_day, granularity);

    for invoice in filtered.iter().filter(|i| i.status.is_paid_like()) {
        let day = invoice.created_at.date();
        if day < first_day || day > last_day {
            continue;
        }
        let index = match granularity {
            Granularity::Weekly => ((day - first_day).num_days() / 7) as usize,
            Granularity::Monthly => months_between(first_day, day) as usize,
        };
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.raw_income += invoice.amount;
        }
    }

    let mut previous_raw: Option<f64> = None;
    for bucket in buckets.iter_mut() {
        bucket.income = bucket.raw_income / config.display_divisor;
        bucket.growth_pct = previous_raw
            .map(|prev| growth_percentage(prev, bucket.raw_income))
            .unwrap_or(0.0);
        previous_raw = Some(bucket.raw_income);
    }

    debug!(
        "Built {} {:?} buckets from {} invoices ({} .. {})",
        buckets.len(),
        granularity,
        filtered.len(),
        first_day,
        last_day
    );

    apply_highlight(&mut buckets, selection.hover_index);
    buckets
}

/// Percentage change from `previous` to `current`; 0 when `previous` is 0.
pub fn growth_percentage(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Marks only the bucket at `hover_index` as highlighted.
pub fn apply_highlight(series: &mut [SeriesBucket], hover_index: Option<usize>) {
    for (idx, bucket) in series.iter_mut().enumerate() {
        bucket.highlighted = hover_index == Some(idx);
    }
}

fn invoice_extent(invoices: &[Invoice]) -> Option<(NaiveDate, NaiveDate)> {
    let first = invoices.iter().map(|i| i.created_at.date()).min()?;
    let last = invoices.iter().map(|i| i.created_at.date()).max()?;
    Some((first, last))
}

fn empty_buckets(first_day: NaiveDate, last_day: NaiveDate, granularity: Granularity) -> Vec<SeriesBucket> {
    bucket_ranges(first_day, last_day, granularity)
        .into_iter()
        .map(|range| SeriesBucket {
            label: range.label,
            start: range.start,
            end: range.end,
            raw_income: 0.0,
            income: 0.0,
            growth_pct: 0.0,
            highlighted: false,
        })
        .collect()
}
