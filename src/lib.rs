//! # Invoice Tracker
//!
//! A library for turning an invoice collection and a dashboard filter selection into
//! the three read-only views an invoice dashboard renders.
//!
//! ## Core Concepts
//!
//! - **Status & Period Filter**: narrows the collection by status and by a time window
//!   (`1Month`, `3Months`, `1Year` or a custom inclusive date range)
//! - **Synthetic Fallback**: an empty but resolvable window is filled with clearly
//!   marked placeholder invoices so charts never collapse to zero
//! - **KPI Aggregator**: total earnings, payment awaited and payment overdue
//! - **Series Builder**: weekly or monthly income buckets with bucket-over-bucket growth
//! - **Ledger**: the host-owned collection, validated on creation and status update
//!
//! ## Example
//!
//! ```rust,ignore
//! use invoice_tracker::*;
//! use chrono::{NaiveDate, Utc};
//!
//! let mut ledger = InvoiceLedger::new();
//! ledger.create(
//!     InvoiceDraft {
//!         client_name: "ACME Corp".to_string(),
//!         amount: 1200.0,
//!         due_date: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
//!         status: InvoiceStatus::Paid,
//!     },
//!     Utc::now().naive_utc(),
//! )?;
//!
//! let selection = FilterSelection::new(StatusFilter::All, Period::OneMonth);
//! let view = derive_dashboard(ledger.invoices(), &selection, Utc::now().naive_utc());
//! assert_eq!(view.kpis.total_earnings, 1200.0);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod ingestion;
pub mod kpi;
pub mod ledger;
pub mod schema;
pub mod series;
pub mod synthetic;
pub mod utils;
pub mod window;

pub use config::{DashboardConfig, SyntheticConfig};
pub use error::{InvoiceTrackerError, Result};
pub use filter::{filter_invoices, select_invoices, FilteredInvoices};
pub use ingestion::*;
pub use kpi::{aggregate_by_status, aggregate_kpis, KpiTotals};
pub use ledger::{InvoiceDraft, InvoiceLedger};
pub use schema::*;
pub use series::{apply_highlight, build_series, growth_percentage, SeriesBucket};
pub use synthetic::generate_synthetic;
pub use window::{bucket_ranges, granularity_for, resolve_window, BucketRange, DateWindow, Granularity};

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub filtered: FilteredInvoices,
    pub kpis: KpiTotals,
    pub series: Vec<SeriesBucket>,
}

impl DashboardView {
    /// True when the views were computed from placeholder invoices.
    pub fn is_synthetic(&self) -> bool {
        self.filtered.synthetic
    }
}

/// Runs the derivation pipeline under one validated [`DashboardConfig`].
///
/// Holds no invoice state; the collection and selection are passed to each
/// [`derive`](Self::derive) call.
pub struct InvoiceDashboard {
    config: DashboardConfig,
}

impl InvoiceDashboard {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Runs filter, KPI aggregation and series building in order.
    ///
    /// Pure with respect to its inputs: call it again whenever the collection or
    /// the selection changes.
    pub fn derive(
        &self,
        invoices: &[Invoice],
        selection: &FilterSelection,
        now: NaiveDateTime,
    ) -> DashboardView {
        let filtered = filter_invoices(invoices, selection, now, &self.config);
        let kpis = aggregate_kpis(&filtered.invoices);
        let series = build_series(&filtered.invoices, selection, now, &self.config);

        debug!(
            "Derived dashboard: {} invoices (synthetic: {}), {} buckets, earnings {:.2}",
            filtered.len(),
            filtered.synthetic,
            series.len(),
            kpis.total_earnings
        );

        DashboardView {
            filtered,
            kpis,
            series,
        }
    }
}

impl Default for InvoiceDashboard {
    fn default() -> Self {
        Self {
            config: DashboardConfig::default(),
        }
    }
}

pub fn derive_dashboard(
    invoices: &[Invoice],
    selection: &FilterSelection,
    now: NaiveDateTime,
) -> DashboardView {
    InvoiceDashboard::default().derive(invoices, selection, now)
}
