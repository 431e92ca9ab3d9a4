use crate::config::SyntheticConfig;
use crate::schema::{Invoice, InvoiceOrigin, InvoiceStatus};
use crate::utils::{end_of_day, round_to_cents, start_of_day};
use crate::window::{bucket_ranges, DateWindow, Granularity};
use chrono::Duration;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const MIN_AMOUNT_RATIO: f64 = 0.25;
const SYNTHETIC_DUE_DAYS: i64 = 30;

/// Generates placeholder paid-like invoices, one at the middle of each
/// `granularity` bucket of `window`, so every chart bucket receives income.
///
/// Output depends only on the window, granularity and config: the random stream is
/// seeded from `config.seed` and the window bounds.
pub fn generate_synthetic(
    window: &DateWindow,
    granularity: Granularity,
    config: &SyntheticConfig,
) -> Vec<Invoice> {
    let buckets = bucket_ranges(window.start.date(), window.end.date(), granularity);

    let mut rng = StdRng::seed_from_u64(window_seed(window, config.seed));
    let normal = Normal::new(0.0, config.noise_factor).ok();

    debug!(
        "Generating {} synthetic invoices ({:?}) for window {} .. {}",
        buckets.len(),
        granularity,
        window.start,
        window.end
    );

    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            // bucket days clipped to the window; the first and last may be partial
            let from = start_of_day(bucket.start).max(window.start);
            let to = end_of_day(bucket.end).min(window.end);
            let created_at = from + (to - from) / 2;

            let noise = normal
                .as_ref()
                .map(|n| n.sample(&mut rng))
                .unwrap_or(0.0);
            let amount = (config.base_amount * (1.0 + noise))
                .max(config.base_amount * MIN_AMOUNT_RATIO);

            let status = InvoiceStatus::PAID_LIKE[i % InvoiceStatus::PAID_LIKE.len()];

            Invoice {
                id: format!("synthetic-{}", i),
                client_name: format!("Sample Client {}", i + 1),
                amount: round_to_cents(amount),
                due_date: created_at.date() + Duration::days(SYNTHETIC_DUE_DAYS),
                status,
                created_at,
                origin: InvoiceOrigin::Synthetic,
            }
        })
        .collect()
}

fn window_seed(window: &DateWindow, seed: u64) -> u64 {
    let start = window.start.and_utc().timestamp() as u64;
    let end = window.end.and_utc().timestamp() as u64;
    seed ^ start.rotate_left(17) ^ end.rotate_left(41)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateWindow {
        DateWindow {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_weekly_points_inside_window() {
        let w = window((2026, 9, 18), (2026, 10, 18));
        let invoices = generate_synthetic(&w, Granularity::Weekly, &SyntheticConfig::default());

        assert_eq!(invoices.len(), 5);
        for invoice in &invoices {
            assert!(w.contains(invoice.created_at));
            assert!(invoice.is_synthetic());
            assert!(invoice.status.is_paid_like());
            assert!(invoice.amount > 0.0);
        }

        let mut dates: Vec<_> = invoices.iter().map(|i| i.created_at).collect();
        let sorted = {
            let mut d = dates.clone();
            d.sort();
            d
        };
        assert_eq!(dates, sorted);
        dates.dedup();
        assert_eq!(dates.len(), 5);
    }

    #[test]
    fn test_monthly_points_for_three_months() {
        let w = window((2026, 7, 18), (2026, 10, 18));
        let invoices = generate_synthetic(&w, Granularity::Monthly, &SyntheticConfig::default());
        // Jul, Aug, Sep, Oct
        assert_eq!(invoices.len(), 4);
        assert_eq!(invoices[0].status, InvoiceStatus::Paid);
        assert_eq!(invoices[1].status, InvoiceStatus::PartiallyPaid);
    }

    #[test]
    fn test_each_point_lands_in_its_own_bucket() {
        // window starts mid-afternoon, so the first week and last month are partial
        let start = NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let cases = [
            (DateWindow { start, end }, Granularity::Monthly),
            (
                DateWindow {
                    start: NaiveDate::from_ymd_opt(2026, 9, 18)
                        .unwrap()
                        .and_hms_opt(15, 0, 0)
                        .unwrap(),
                    end,
                },
                Granularity::Weekly,
            ),
        ];

        for (w, granularity) in cases {
            let buckets = bucket_ranges(w.start.date(), w.end.date(), granularity);
            let invoices = generate_synthetic(&w, granularity, &SyntheticConfig::default());
            assert_eq!(invoices.len(), buckets.len());
            for (invoice, bucket) in invoices.iter().zip(&buckets) {
                let day = invoice.created_at.date();
                assert!(w.contains(invoice.created_at));
                assert!(bucket.start <= day && day <= bucket.end, "{} not in {}", day, bucket.label);
            }
        }
    }

    #[test]
    fn test_deterministic_for_same_window() {
        let w = window((2026, 1, 1), (2026, 12, 31));
        let config = SyntheticConfig::default();
        let a = generate_synthetic(&w, Granularity::Monthly, &config);
        let b = generate_synthetic(&w, Granularity::Monthly, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_noise_gives_base_amount() {
        let w = window((2026, 1, 1), (2026, 3, 31));
        let config = SyntheticConfig {
            base_amount: 1200.0,
            noise_factor: 0.0,
            seed: 1,
        };
        let invoices = generate_synthetic(&w, Granularity::Monthly, &config);
        assert!(invoices.iter().all(|i| i.amount == 1200.0));
    }
}
