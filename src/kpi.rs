use crate::schema::{Invoice, InvoiceStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiTotals {
    /// Sum over paid-like invoices
    pub total_earnings: f64,
    /// Sum over awaited-like invoices
    pub payment_awaited: f64,
    pub payment_overdue: f64,
}

/// Sums amounts into the three dashboard KPIs. Disputed and Draft invoices count
/// toward none of them.
pub fn aggregate_kpis(filtered: &[Invoice]) -> KpiTotals {
    filtered
        .iter()
        .fold(KpiTotals::default(), |mut totals, invoice| {
            if invoice.status.is_paid_like() {
                totals.total_earnings += invoice.amount;
            } else if invoice.status.is_awaited_like() {
                totals.payment_awaited += invoice.amount;
            } else if invoice.status.is_overdue() {
                totals.payment_overdue += invoice.amount;
            }
            totals
        })
}

/// Per-status amount totals. Statuses with no invoices are absent.
pub fn aggregate_by_status(filtered: &[Invoice]) -> BTreeMap<InvoiceStatus, f64> {
    let mut totals = BTreeMap::new();
    for invoice in filtered {
        *totals.entry(invoice.status).or_insert(0.0) += invoice.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InvoiceOrigin;
    use chrono::NaiveDate;

    fn invoice(id: &str, amount: f64, status: InvoiceStatus) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        Invoice {
            id: id.to_string(),
            client_name: "Client".to_string(),
            amount,
            due_date: date,
            status,
            created_at: date.and_hms_opt(10, 0, 0).unwrap(),
            origin: InvoiceOrigin::Recorded,
        }
    }

    #[test]
    fn test_aggregate_kpis() {
        let invoices = vec![
            invoice("a", 100.0, InvoiceStatus::Paid),
            invoice("b", 50.0, InvoiceStatus::PartiallyPaid),
            invoice("c", 30.0, InvoiceStatus::Unpaid),
            invoice("d", 20.0, InvoiceStatus::Awaited),
            invoice("e", 70.0, InvoiceStatus::Overdue),
            invoice("f", 999.0, InvoiceStatus::Disputed),
            invoice("g", 888.0, InvoiceStatus::Draft),
        ];

        let totals = aggregate_kpis(&invoices);
        assert_eq!(totals.total_earnings, 150.0);
        assert_eq!(totals.payment_awaited, 50.0);
        assert_eq!(totals.payment_overdue, 70.0);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        assert_eq!(aggregate_kpis(&[]), KpiTotals::default());
        assert!(aggregate_by_status(&[]).is_empty());
    }

    #[test]
    fn test_by_status_partition_sums_to_total() {
        let invoices = vec![
            invoice("a", 10.0, InvoiceStatus::Paid),
            invoice("b", 15.0, InvoiceStatus::Paid),
            invoice("c", 5.0, InvoiceStatus::Draft),
        ];
        let by_status = aggregate_by_status(&invoices);
        assert_eq!(by_status.get(&InvoiceStatus::Paid), Some(&25.0));
        assert_eq!(by_status.get(&InvoiceStatus::Draft), Some(&5.0));
        assert_eq!(by_status.values().sum::<f64>(), 30.0);
    }
}
