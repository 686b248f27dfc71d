use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

/// Spanish month names used in report captions, indexed by month - 1.
pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// The reference year/month a report is computed for.
///
/// The engine never reads the clock; callers pass this in. Only the CLI
/// builds one from the system date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawReportPeriod")]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawReportPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawReportPeriod> for ReportPeriod {
    type Error = MetricsError;

    fn try_from(raw: RawReportPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, MetricsError> {
        if !(1..=12).contains(&month) {
            return Err(MetricsError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(input: &str) -> Result<Self, MetricsError> {
        let trimmed = input.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| MetricsError::PeriodParse(input.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MetricsError::PeriodParse(input.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MetricsError::PeriodParse(input.to_string()))?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Aggregation window relative to a [`ReportPeriod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Year-to-date: transactions of the reference year.
    Annual,
    /// Month-to-date: transactions of the reference year and month.
    Monthly,
}

impl Period {
    /// Month number carried on result rows; `None` for annual.
    pub fn label(&self, reference: ReportPeriod) -> Option<u32> {
        match self {
            Self::Annual => None,
            Self::Monthly => Some(reference.month()),
        }
    }

    /// Human caption, e.g. "Anual 2024" or "Junio 2024".
    pub fn caption(&self, reference: ReportPeriod) -> String {
        match self {
            Self::Annual => format!("Anual {}", reference.year()),
            Self::Monthly => format!("{} {}", reference.month_name(), reference.year()),
        }
    }

    /// Whether a transaction dated `year`/`month` falls inside this window.
    pub fn contains(&self, reference: ReportPeriod, year: Option<i32>, month: Option<u32>) -> bool {
        match self {
            Self::Annual => year == Some(reference.year()),
            Self::Monthly => year == Some(reference.year()) && month == Some(reference.month()),
        }
    }

    /// Whether a budget row for `month` counts toward this window.
    ///
    /// Budget rows carry no year. Annual windows take every row, rows
    /// without a month included.
    pub fn contains_budget_month(&self, reference: ReportPeriod, month: Option<u32>) -> bool {
        match self {
            Self::Annual => true,
            Self::Monthly => month == Some(reference.month()),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Annual => write!(f, "annual"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}
