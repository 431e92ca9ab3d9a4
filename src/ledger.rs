use crate::error::{InvoiceTrackerError, Result};
use crate::schema::{Invoice, InvoiceOrigin, InvoiceStatus};
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fields a user supplies when creating an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub client_name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

/// The host-owned invoice collection, newest first.
///
/// The derivation pipeline only ever reads snapshots of it; creation and status
/// updates are the only mutations, and both validate their input here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceLedger {
    invoices: Vec<Invoice>,
    next_sequence: u32,
}

impl InvoiceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from an existing collection, keeping its order.
    pub fn from_invoices(invoices: Vec<Invoice>) -> Result<Self> {
        let mut seen = HashSet::new();
        for invoice in &invoices {
            validate_invoice(invoice)?;
            if !seen.insert(invoice.id.as_str()) {
                return Err(InvoiceTrackerError::DuplicateInvoiceId(invoice.id.clone()));
            }
        }

        Ok(Self {
            next_sequence: invoices.len() as u32,
            invoices,
        })
    }

    /// Validates `draft`, assigns it the next free `INV-nnnn` id and prepends it.
    pub fn create(&mut self, draft: InvoiceDraft, created_at: NaiveDateTime) -> Result<&Invoice> {
        let sequence = self.next_free_sequence();
        let invoice = Invoice {
            id: format_id(sequence),
            client_name: draft.client_name.trim().to_string(),
            amount: draft.amount,
            due_date: draft.due_date,
            status: draft.status,
            created_at,
            origin: InvoiceOrigin::Recorded,
        };
        validate_invoice(&invoice)?;
        self.next_sequence = sequence;

        info!(
            "Created invoice {} for '{}' ({:.2}, {})",
            invoice.id, invoice.client_name, invoice.amount, invoice.status
        );
        self.invoices.insert(0, invoice);
        Ok(&self.invoices[0])
    }

    pub fn update_status(&mut self, id: &str, status: InvoiceStatus) -> Result<()> {
        let invoice = self
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| InvoiceTrackerError::InvoiceNotFound(id.to_string()))?;

        info!("Invoice {} status {} -> {}", id, invoice.status, status);
        invoice.status = status;
        Ok(())
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn get(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id == id)
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    fn next_free_sequence(&self) -> u32 {
        let mut sequence = self.next_sequence + 1;
        while self.get(&format_id(sequence)).is_some() {
            sequence += 1;
        }
        sequence
    }
}

fn format_id(sequence: u32) -> String {
    format!("INV-{:04}", sequence)
}

pub(crate) fn validate_invoice(invoice: &Invoice) -> Result<()> {
    if invoice.id.trim().is_empty() {
        return Err(InvoiceTrackerError::ValidationError {
            invoice: invoice.id.clone(),
            details: "Invoice id must not be empty".to_string(),
        });
    }

    if invoice.client_name.trim().is_empty() {
        return Err(InvoiceTrackerError::ValidationError {
            invoice: invoice.id.clone(),
            details: "Client name must not be empty".to_string(),
        });
    }

    if !invoice.amount.is_finite() || invoice.amount < 0.0 {
        return Err(InvoiceTrackerError::InvalidAmount(invoice.amount));
    }

    if invoice.is_synthetic() {
        return Err(InvoiceTrackerError::ValidationError {
            invoice: invoice.id.clone(),
            details: "Synthetic invoices cannot be stored".to_string(),
        });
    }

    Ok(())
}
