//! Typed records from untyped tables, via the configured column mapping.

use crate::config::{BudgetColumns, TransactionColumns};
use crate::error::MetricsError;
use crate::model::{Amount, BudgetRecord, TransactionRecord};
use crate::table::{Cell, Table};

fn amount_of(cell: &Cell) -> Amount {
    match cell {
        Cell::Empty => Amount::Null,
        Cell::Number(n) => Amount::Number(*n),
        Cell::Text(s) => Amount::Text(s.clone()),
    }
}

fn month_of(cell: &Cell) -> Option<u32> {
    cell.as_int().and_then(|m| u32::try_from(m).ok())
}

/// Map every row of the transaction table. Fails if any mapped column is
/// absent.
pub fn load_transactions(
    table: &Table,
    columns: &TransactionColumns,
) -> Result<Vec<TransactionRecord>, MetricsError> {
    let year = table.require_column(&columns.year)?;
    let month = table.require_column(&columns.month)?;
    let client = table.require_column(&columns.client)?;
    let center = table.require_column(&columns.operating_center)?;
    let amount = table.require_column(&columns.amount_usd)?;
    let concept = table.require_column(&columns.concept)?;
    let currency = table.require_column(&columns.currency)?;
    let item = table.require_column(&columns.item)?;
    let salesperson = table.require_column(&columns.salesperson)?;
    let country = table.require_column(&columns.country)?;

    let text = |row: usize, col: usize| table.cell(row, col).as_text().unwrap_or_default();

    let records = (0..table.len())
        .map(|row| TransactionRecord {
            year: table.cell(row, year).as_int().and_then(|y| i32::try_from(y).ok()),
            month: month_of(table.cell(row, month)),
            client: text(row, client),
            operating_center: text(row, center),
            amount_usd: amount_of(table.cell(row, amount)),
            concept: text(row, concept),
            currency: text(row, currency),
            item: text(row, item),
            salesperson: table.cell(row, salesperson).as_text(),
            country: text(row, country),
        })
        .collect();

    Ok(records)
}

/// Map every row of the budget table. The month column may be absent, in
/// which case every row is an annual figure.
pub fn load_budget(table: &Table, columns: &BudgetColumns) -> Result<Vec<BudgetRecord>, MetricsError> {
    let salesperson = table.require_column(&columns.salesperson)?;
    let amount = table.require_column(&columns.amount_usd)?;
    let month = table.column(&columns.month);

    let records = (0..table.len())
        .map(|row| BudgetRecord {
            salesperson: table.cell(row, salesperson).as_text(),
            month: month.and_then(|col| month_of(table.cell(row, col))),
            amount_usd: amount_of(table.cell(row, amount)),
        })
        .collect();

    Ok(records)
}
