use serde::{Deserialize, Serialize};

use crate::period::{Period, ReportPeriod};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Amount cell as delivered by ingestion: already numeric, locale text, or null.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Number(f64),
    Text(String),
    Null,
}

/// One row of the transaction (billing) dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub client: String,
    pub operating_center: String,
    pub amount_usd: Amount,
    pub concept: String,
    pub currency: String,
    pub item: String,
    pub salesperson: Option<String>,
    pub country: String,
}

/// One row of the budget-by-salesperson dataset.
///
/// A row without a month is an annual figure.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRecord {
    pub salesperson: Option<String>,
    pub month: Option<u32>,
    pub amount_usd: Amount,
}

/// Immutable snapshot of both datasets.
#[derive(Debug, Clone, Default)]
pub struct MetricsInput {
    pub transactions: Vec<TransactionRecord>,
    pub budget: Vec<BudgetRecord>,
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Salesperson,
    OperatingCenter,
    Client,
    Country,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Salesperson,
        Dimension::OperatingCenter,
        Dimension::Client,
        Dimension::Country,
    ];

    /// Key of `record` along this dimension, trimmed.
    pub fn key_of<'a>(&self, record: &'a TransactionRecord) -> Option<&'a str> {
        let raw = match self {
            Self::Salesperson => record.salesperson.as_deref()?,
            Self::OperatingCenter => record.operating_center.as_str(),
            Self::Client => record.client.as_str(),
            Self::Country => record.country.as_str(),
        };
        Some(raw.trim())
    }

    /// Column header used by the summary workbook.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Salesperson => "Vendedor",
            Self::OperatingCenter => "Sede",
            Self::Client => "Cliente",
            Self::Country => "País",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Salesperson => write!(f, "salesperson"),
            Self::OperatingCenter => write!(f, "operating_center"),
            Self::Client => write!(f, "client"),
            Self::Country => write!(f, "country"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One row of execution-versus-budget output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub key: String,
    pub budget: f64,
    pub executed: f64,
    pub execution_pct: f64,
    pub shortfall_pct: f64,
    pub target: f64,
    /// Month number for monthly results, `None` for annual.
    pub period: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_total: bool,
}

/// One row of a ranked (no budget) table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTotal {
    pub key: String,
    pub total: f64,
    /// Percent of the whole group's total (before any top-N cut).
    pub share_pct: f64,
}

/// Company-wide executed versus budget for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyOverview {
    pub period: Period,
    pub caption: String,
    pub executed: f64,
    pub budget: f64,
    pub execution_pct: f64,
    pub shortfall_pct: f64,
}

/// Annual and monthly flavors of one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodPair<T> {
    pub annual: T,
    pub monthly: T,
}

/// Everything the consolidated report consumes, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub reference: ReportPeriod,
    pub overview: PeriodPair<CompanyOverview>,
    pub salespeople: PeriodPair<Vec<AggregationResult>>,
    pub operating_centers: PeriodPair<Vec<RankedTotal>>,
    pub top_clients: PeriodPair<Vec<RankedTotal>>,
    pub top_countries: PeriodPair<Vec<RankedTotal>>,
    pub warnings: DataWarnings,
}

/// Non-fatal data quality counters surfaced to operators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataWarnings {
    /// Budget cells whose text could not be parsed and were read as 0.
    pub coerced_budget_amounts: usize,
    /// Transaction cells whose text could not be parsed and were read as 0.
    pub coerced_transaction_amounts: usize,
}
