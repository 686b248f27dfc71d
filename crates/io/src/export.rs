// Summary workbook export (xlsx only)
//
// One sheet per salesperson period plus one per ranked table. Presentation
// snapshot for distribution; never read back by the engine.

use std::path::Path;

use carex_metrics::{AggregationResult, CompanyOverview, Dashboard, Dimension, RankedTotal};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::IoError;

const SALESPERSON_HEADERS: [&str; 7] =
    ["Vendedor", "Budget", "Ejecutado", "% Ejecución", "% Faltante", "Meta", "Mes"];
const MONEY: &str = "#,##0.00";
const PCT: &str = "0.00";

/// Counts reported back to the caller after a successful export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    pub sheets_written: usize,
    pub rows_written: usize,
}

struct Formats {
    plain: Format,
    header: Format,
    money: Format,
    pct: Format,
    total_text: Format,
    total_money: Format,
    total_pct: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            plain: Format::new(),
            header: Format::new().set_bold(),
            money: Format::new().set_num_format(MONEY),
            pct: Format::new().set_num_format(PCT),
            total_text: Format::new().set_bold(),
            total_money: Format::new().set_bold().set_num_format(MONEY),
            total_pct: Format::new().set_bold().set_num_format(PCT),
        }
    }
}

/// Write the summary workbook for `dashboard` to `path`.
pub fn write_summary(dashboard: &Dashboard, path: &Path) -> Result<ExportSummary, IoError> {
    write_workbook(dashboard, path).map_err(|e| IoError::write(path, e))
}

fn write_workbook(dashboard: &Dashboard, path: &Path) -> Result<ExportSummary, XlsxError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    let mut summary = ExportSummary::default();

    let overview = [&dashboard.overview.annual, &dashboard.overview.monthly];
    summary.rows_written += write_overview(workbook.add_worksheet().set_name("Resumen")?, &overview, &formats)?;
    summary.sheets_written += 1;

    for (name, rows) in [
        ("Vendedores Mes", &dashboard.salespeople.monthly),
        ("Vendedores Anual", &dashboard.salespeople.annual),
    ] {
        let sheet = workbook.add_worksheet().set_name(name)?;
        summary.rows_written += write_execution(sheet, rows, &formats)?;
        summary.sheets_written += 1;
    }

    for (dimension, prefix, pair) in [
        (Dimension::OperatingCenter, "Sedes", &dashboard.operating_centers),
        (Dimension::Client, "Clientes", &dashboard.top_clients),
        (Dimension::Country, "Países", &dashboard.top_countries),
    ] {
        for (suffix, rows) in [("Mes", &pair.monthly), ("Anual", &pair.annual)] {
            let sheet = workbook.add_worksheet().set_name(format!("{prefix} {suffix}"))?;
            summary.rows_written += write_ranked(sheet, dimension, rows, &formats)?;
            summary.sheets_written += 1;
        }
    }

    workbook.save(path)?;
    log::info!(
        "wrote {} ({} sheets, {} rows)",
        path.display(),
        summary.sheets_written,
        summary.rows_written
    );
    Ok(summary)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], formats: &Formats) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_overview(
    sheet: &mut Worksheet,
    rows: &[&CompanyOverview],
    formats: &Formats,
) -> Result<usize, XlsxError> {
    write_headers(sheet, &["Periodo", "Budget", "Ejecutado", "% Ejecución", "% Faltante"], formats)?;
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.caption)?;
        sheet.write_number_with_format(r, 1, row.budget, &formats.money)?;
        sheet.write_number_with_format(r, 2, row.executed, &formats.money)?;
        sheet.write_number_with_format(r, 3, row.execution_pct, &formats.pct)?;
        sheet.write_number_with_format(r, 4, row.shortfall_pct, &formats.pct)?;
    }
    sheet.set_column_width(0, 18)?;
    Ok(rows.len())
}

fn write_execution(
    sheet: &mut Worksheet,
    rows: &[AggregationResult],
    formats: &Formats,
) -> Result<usize, XlsxError> {
    write_headers(sheet, &SALESPERSON_HEADERS, formats)?;
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        let (text, money, pct) = if row.is_total {
            (&formats.total_text, &formats.total_money, &formats.total_pct)
        } else {
            (&formats.plain, &formats.money, &formats.pct)
        };
        sheet.write_string_with_format(r, 0, &row.key, text)?;
        sheet.write_number_with_format(r, 1, row.budget, money)?;
        sheet.write_number_with_format(r, 2, row.executed, money)?;
        sheet.write_number_with_format(r, 3, row.execution_pct, pct)?;
        sheet.write_number_with_format(r, 4, row.shortfall_pct, pct)?;
        sheet.write_number_with_format(r, 5, row.target, pct)?;
        if let Some(month) = row.period {
            sheet.write_number_with_format(r, 6, month, text)?;
        }
    }
    sheet.set_column_width(0, 40)?;
    Ok(rows.len())
}

fn write_ranked(
    sheet: &mut Worksheet,
    dimension: Dimension,
    rows: &[RankedTotal],
    formats: &Formats,
) -> Result<usize, XlsxError> {
    write_headers(sheet, &[dimension.header(), "Ejecutado", "% Participación"], formats)?;
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.key)?;
        sheet.write_number_with_format(r, 1, row.total, &formats.money)?;
        sheet.write_number_with_format(r, 2, row.share_pct, &formats.pct)?;
    }
    sheet.set_column_width(0, 40)?;
    Ok(rows.len())
}
