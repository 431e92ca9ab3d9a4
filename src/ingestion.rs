use crate::error::{InvoiceTrackerError, Result};
use crate::ledger::validate_invoice;
use crate::schema::{Invoice, InvoiceOrigin, InvoiceStatus};
use crate::utils::{parse_date, parse_date_time};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A loosely-typed invoice row as exported by a form, a spreadsheet or a JSON API.
///
/// Field names are accepted in snake_case or camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: String,
    #[serde(alias = "clientName")]
    pub client_name: String,
    pub amount: f64,
    #[serde(alias = "dueDate")]
    pub due_date: String,
    pub status: String,
    #[serde(alias = "createdAt")]
    pub created_at: String,
}

/// Converts raw rows into validated invoices, failing on the first bad row.
pub fn convert_records(records: &[InvoiceRecord]) -> Result<Vec<Invoice>> {
    let mut seen = HashSet::new();
    let mut invoices = Vec::with_capacity(records.len());

    for record in records {
        let invoice = convert_record(record)?;
        if !seen.insert(invoice.id.clone()) {
            return Err(InvoiceTrackerError::DuplicateInvoiceId(invoice.id));
        }
        invoices.push(invoice);
    }

    debug!("Converted {} invoice records", invoices.len());
    Ok(invoices)
}

fn convert_record(record: &InvoiceRecord) -> Result<Invoice> {
    let field_error = |field: &str, err: InvoiceTrackerError| InvoiceTrackerError::ValidationError {
        invoice: record.id.clone(),
        details: format!("{}: {}", field, err),
    };

    let status: InvoiceStatus = record
        .status
        .parse()
        .map_err(|e| field_error("status", e))?;
    let due_date = parse_date(&record.due_date).map_err(|e| field_error("due_date", e))?;
    let created_at =
        parse_date_time(&record.created_at).map_err(|e| field_error("created_at", e))?;

    let invoice = Invoice {
        id: record.id.trim().to_string(),
        client_name: record.client_name.trim().to_string(),
        amount: record.amount,
        due_date,
        status,
        created_at,
        origin: InvoiceOrigin::Recorded,
    };
    validate_invoice(&invoice)?;
    Ok(invoice)
}

/// Parses a JSON array of [`InvoiceRecord`]s.
pub fn load_invoices_json(json: &str) -> Result<Vec<Invoice>> {
    let records: Vec<InvoiceRecord> = serde_json::from_str(json)?;
    convert_records(&records)
}

pub fn load_invoices_file(path: impl AsRef<Path>) -> Result<Vec<Invoice>> {
    let contents = std::fs::read_to_string(path)?;
    load_invoices_json(&contents)
}
