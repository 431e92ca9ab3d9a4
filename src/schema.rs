use crate::error::{InvoiceTrackerError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "PascalCase")]
pub enum InvoiceStatus {
    #[schemars(description = "Settled in full. Counts toward earnings.")]
    Paid,

    #[schemars(description = "Issued and not yet settled. Counts toward payment awaited.")]
    Unpaid,

    #[schemars(description = "Settled in part. Counts toward earnings.")]
    PartiallyPaid,

    #[schemars(description = "Past its due date without settlement. Counts toward payment overdue.")]
    Overdue,

    #[schemars(description = "Contested by the client. Excluded from every KPI.")]
    Disputed,

    #[schemars(description = "Payment announced and pending. Counts toward payment awaited.")]
    Awaited,

    #[schemars(description = "Not yet issued. Excluded from every KPI.")]
    Draft,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 7] = [
        InvoiceStatus::Paid,
        InvoiceStatus::Unpaid,
        InvoiceStatus::PartiallyPaid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Disputed,
        InvoiceStatus::Awaited,
        InvoiceStatus::Draft,
    ];

    /// Statuses counted as earned income.
    pub const PAID_LIKE: [InvoiceStatus; 2] = [InvoiceStatus::Paid, InvoiceStatus::PartiallyPaid];

    /// Statuses counted as money still expected.
    pub const AWAITED_LIKE: [InvoiceStatus; 2] = [InvoiceStatus::Awaited, InvoiceStatus::Unpaid];

    pub const OVERDUE: [InvoiceStatus; 1] = [InvoiceStatus::Overdue];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::PartiallyPaid => "PartiallyPaid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Disputed => "Disputed",
            InvoiceStatus::Awaited => "Awaited",
            InvoiceStatus::Draft => "Draft",
        }
    }

    pub fn is_paid_like(&self) -> bool {
        Self::PAID_LIKE.contains(self)
    }

    pub fn is_awaited_like(&self) -> bool {
        Self::AWAITED_LIKE.contains(self)
    }

    pub fn is_overdue(&self) -> bool {
        Self::OVERDUE.contains(self)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = InvoiceTrackerError;

    /// Accepts the canonical names case-insensitively, ignoring spaces, underscores
    /// and hyphens ("Partially Paid", "partially_paid" and "PartiallyPaid" all match).
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .iter()
            .find(|status| status.as_str().to_lowercase() == normalized)
            .copied()
            .ok_or_else(|| InvoiceTrackerError::UnknownStatus(s.to_string()))
    }
}

/// Where an invoice came from. Synthetic invoices only ever appear in derived views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum InvoiceOrigin {
    /// Entered by a user or loaded from a caller-supplied collection
    #[default]
    Recorded,
    /// Placeholder generated to keep an empty window populated
    Synthetic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[schemars(description = "Unique identifier, stable for the record's lifetime")]
    pub id: String,

    #[schemars(description = "Free-text client label")]
    pub client_name: String,

    #[schemars(description = "Non-negative, currency-agnostic amount")]
    pub amount: f64,

    pub due_date: NaiveDate,

    pub status: InvoiceStatus,

    #[schemars(description = "Creation timestamp used for period filtering and bucketing")]
    pub created_at: NaiveDateTime,

    #[serde(default)]
    pub origin: InvoiceOrigin,
}

impl Invoice {
    pub fn is_synthetic(&self) -> bool {
        self.origin == InvoiceOrigin::Synthetic
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Invoice)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}

/// Status selection: either every status or exactly one.
///
/// Serialised as a plain string, `"All"` or a status name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: InvoiceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = InvoiceTrackerError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = InvoiceTrackerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => "All".to_string(),
            StatusFilter::Only(status) => status.as_str().to_string(),
        }
    }
}

impl JsonSchema for StatusFilter {
    fn schema_name() -> String {
        "StatusFilter".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub enum Period {
    #[serde(rename = "1Month")]
    #[schemars(description = "The last calendar month up to now")]
    #[default]
    OneMonth,

    #[serde(rename = "3Months")]
    #[schemars(description = "The last three calendar months up to now")]
    ThreeMonths,

    #[serde(rename = "1Year")]
    #[schemars(description = "The last calendar year up to now")]
    OneYear,

    #[schemars(description = "Caller-supplied start and end dates, both inclusive")]
    Custom,
}

impl Period {
    /// Calendar months covered by a fixed period, `None` for `Custom`.
    pub fn months(&self) -> Option<u32> {
        match self {
            Period::OneMonth => Some(1),
            Period::ThreeMonths => Some(3),
            Period::OneYear => Some(12),
            Period::Custom => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default)]
    pub status: StatusFilter,

    #[serde(default)]
    pub period: Period,

    #[serde(default)]
    #[schemars(description = "Inclusive start day, only read when period is Custom")]
    pub custom_start: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Inclusive end day, only read when period is Custom")]
    pub custom_end: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Index of the chart bucket under the pointer, passed through to the series")]
    pub hover_index: Option<usize>,
}

impl FilterSelection {
    pub fn new(status: StatusFilter, period: Period) -> Self {
        Self {
            status,
            period,
            ..Self::default()
        }
    }

    pub fn custom(status: StatusFilter, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            status,
            period: Period::Custom,
            custom_start: Some(start),
            custom_end: Some(end),
            hover_index: None,
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FilterSelection)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}
