//! Snapshot loading: reads both tables from a workbook or a pair of CSV
//! exports and maps them to engine records.

use std::path::{Path, PathBuf};

use carex_metrics::normalize::normalize_amount;
use carex_metrics::{load_budget, load_transactions, MetricsInput};
use serde::Serialize;

use crate::csv;
use crate::error::IoError;
use crate::layout::InputLayout;
use crate::workbook::WorkbookReader;

/// Where a snapshot comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// One workbook holding both sheets.
    Workbook(PathBuf),
    /// Two delimited exports, one per table.
    Csv { transactions: PathBuf, budget: PathBuf },
}

impl InputSource {
    /// Pick the source kind from the file extension. CSV/TXT/TSV inputs need
    /// a companion budget file.
    pub fn from_paths(input: &Path, budget: Option<&Path>) -> Result<Self, IoError> {
        let ext = input
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" | "tsv" => match budget {
                Some(budget) => Ok(Self::Csv {
                    transactions: input.to_path_buf(),
                    budget: budget.to_path_buf(),
                }),
                None => Err(IoError::open(input, "CSV input needs a budget file as well")),
            },
            _ => Ok(Self::Workbook(input.to_path_buf())),
        }
    }
}

/// Row counts and data-quality counters from one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub transactions: usize,
    pub budget: usize,
    /// Amount cells holding text that could not be parsed; read as 0.
    pub coerced_amounts: usize,
}

/// Read both tables and map them with the layout's column names. Any
/// missing required column aborts the load.
pub fn load_input(source: &InputSource, layout: &InputLayout) -> Result<(MetricsInput, LoadReport), IoError> {
    let (bd, budget) = match source {
        InputSource::Workbook(path) => {
            let mut reader = WorkbookReader::open(path)?;
            let bd = reader.read_table(&layout.transactions_sheet)?;
            let budget = reader.read_table(&layout.budget_sheet)?;
            (bd, budget)
        }
        InputSource::Csv { transactions, budget } => (
            csv::read_table(transactions, &layout.transactions_sheet)?,
            csv::read_table(budget, &layout.budget_sheet)?,
        ),
    };

    let input = MetricsInput {
        transactions: load_transactions(&bd, &layout.columns.transactions)?,
        budget: load_budget(&budget, &layout.columns.budget)?,
    };

    let coerced_amounts = input
        .transactions
        .iter()
        .map(|t| &t.amount_usd)
        .chain(input.budget.iter().map(|b| &b.amount_usd))
        .filter(|amount| normalize_amount(amount).coerced)
        .count();

    let report = LoadReport {
        transactions: input.transactions.len(),
        budget: input.budget.len(),
        coerced_amounts,
    };

    log::info!(
        "loaded {} transaction rows and {} budget rows",
        report.transactions,
        report.budget
    );
    if coerced_amounts > 0 {
        log::warn!("{coerced_amounts} amount cell(s) could not be parsed and were read as 0");
    }

    Ok((input, report))
}
