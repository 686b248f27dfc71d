// Excel workbook import (xlsx, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use carex_metrics::{Cell, Table};

use crate::error::IoError;

/// An opened workbook from which named sheets are read as tables.
pub struct WorkbookReader {
    path: std::path::PathBuf,
    sheets: Sheets<std::io::BufReader<std::fs::File>>,
}

impl WorkbookReader {
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let sheets = open_workbook_auto(path).map_err(|e| IoError::open(path, e))?;
        Ok(Self { path: path.to_path_buf(), sheets })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_vec()
    }

    /// Read `sheet` with its first row as headers. Leading and trailing
    /// whitespace around sheet names is ignored.
    pub fn read_table(&mut self, sheet: &str) -> Result<Table, IoError> {
        let wanted = sheet.trim();
        let actual = self
            .sheet_names()
            .into_iter()
            .find(|name| name.trim() == wanted)
            .ok_or_else(|| IoError::SheetNotFound {
                path: self.path.clone(),
                sheet: wanted.to_string(),
            })?;

        let range = self
            .sheets
            .worksheet_range(&actual)
            .map_err(|e| IoError::open(&self.path, format!("sheet '{actual}': {e}")))?;

        let table = table_from_range(wanted, &range);
        log::debug!(
            "{}: sheet '{}' has {} data rows",
            self.path.display(),
            wanted,
            table.len()
        );
        Ok(table)
    }
}

/// Build a table from a cell range: first row is the header row, the rest
/// are data rows. Fully empty rows are skipped.
pub fn table_from_range(name: &str, range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| row.iter().map(|c| cell_of(c).as_text().unwrap_or_default()).collect())
        .unwrap_or_default();

    let mut table = Table::new(name, headers);
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(cell_of).collect();
        if cells.iter().all(|c| *c == Cell::Empty) {
            continue;
        }
        table.push_row(cells);
    }
    table
}

fn cell_of(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Error cells read as unparseable text so the amount normalizer counts them
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
