use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceTrackerError {
    #[error("Validation error for invoice '{invoice}': {details}")]
    ValidationError { invoice: String, details: String },

    #[error("Unknown invoice status: {0}")]
    UnknownStatus(String),

    #[error("Invalid amount {0}: must be a finite, non-negative number")]
    InvalidAmount(f64),

    #[error("Invalid noise factor {0}: must be between 0.0 and 1.0")]
    InvalidNoiseFactor(f64),

    #[error("Invalid dashboard configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate invoice id: {0}")]
    DuplicateInvoiceId(String),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InvoiceTrackerError>;
