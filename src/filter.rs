use crate::config::DashboardConfig;
use crate::schema::{FilterSelection, Invoice};
use crate::synthetic::generate_synthetic;
use crate::window::{granularity_for, resolve_window, DateWindow};
use chrono::NaiveDateTime;
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredInvoices {
    pub invoices: Vec<Invoice>,
    /// `None` when a custom period is missing a bound
    pub window: Option<DateWindow>,
    /// True when `invoices` holds placeholders instead of real data
    pub synthetic: bool,
    /// Real invoices that matched before any fallback
    pub real_count: usize,
}

impl FilteredInvoices {
    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }
}

/// Real invoices matching the status filter and falling inside `window`, in input
/// order.
pub fn select_invoices(
    invoices: &[Invoice],
    selection: &FilterSelection,
    window: &DateWindow,
) -> Vec<Invoice> {
    invoices
        .iter()
        .filter(|invoice| selection.status.matches(invoice.status))
        .filter(|invoice| window.contains(invoice.created_at))
        .cloned()
        .collect()
}

/// Narrows `invoices` by status and period.
///
/// An unresolved custom window yields an empty result. A resolved window with no
/// matching invoices yields synthetic placeholders instead.
pub fn filter_invoices(
    invoices: &[Invoice],
    selection: &FilterSelection,
    now: NaiveDateTime,
    config: &DashboardConfig,
) -> FilteredInvoices {
    let Some(window) = resolve_window(selection, now) else {
        debug!(
            "Custom period without a usable range (start: {:?}, end: {:?}); nothing selected",
            selection.custom_start, selection.custom_end
        );
        return FilteredInvoices {
            invoices: Vec::new(),
            window: None,
            synthetic: false,
            real_count: 0,
        };
    };

    let selected = select_invoices(invoices, selection, &window);
    debug!(
        "Selected {} of {} invoices for {:?} / {:?} in {} .. {}",
        selected.len(),
        invoices.len(),
        selection.status,
        selection.period,
        window.start,
        window.end
    );

    if !selected.is_empty() {
        return FilteredInvoices {
            real_count: selected.len(),
            invoices: selected,
            window: Some(window),
            synthetic: false,
        };
    }

    let granularity = granularity_for(selection, Some(&window), config);
    let placeholders = generate_synthetic(&window, granularity, &config.synthetic);
    info!(
        "No invoices in {} .. {}; substituting {} synthetic invoices",
        window.start,
        window.end,
        placeholders.len()
    );

    FilteredInvoices {
        invoices: placeholders,
        window: Some(window),
        synthetic: true,
        real_count: 0,
    }
}
