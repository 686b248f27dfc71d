// Plain-text tables for the terminal

use carex_metrics::format::{format_colombian, format_pct, format_usd};
use carex_metrics::{AggregationResult, CompanyOverview, Dashboard, Dimension, RankedTotal};

use crate::util::{display_width, pad_left, pad_right};

const KEY_MAX: usize = 40;
const FIGURE: usize = 16;
const PCT: usize = 11;

fn key_width(header: &str, keys: impl Iterator<Item = usize>) -> usize {
    keys.chain(std::iter::once(display_width(header)))
        .max()
        .unwrap_or(0)
        .min(KEY_MAX)
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

/// Salesperson execution table, total row last.
pub fn execution_table(title: &str, rows: &[AggregationResult]) -> String {
    let kw = key_width(
        Dimension::Salesperson.header(),
        rows.iter().map(|r| display_width(&r.key)),
    );
    let header = format!(
        "{}  {}  {}  {}  {}  {}  {}",
        pad_right(Dimension::Salesperson.header(), kw),
        pad_left("Budget", FIGURE),
        pad_left("Ejecutado", FIGURE),
        pad_left("% Ejecución", PCT),
        pad_left("% Faltante", PCT),
        pad_left("Meta", 8),
        pad_left("Mes", 3),
    );

    let mut out = format!("{title}\n{header}\n{}\n", rule(display_width(&header)));
    for row in rows {
        if row.is_total {
            out.push_str(&rule(display_width(&header)));
            out.push('\n');
        }
        let month = row.period.map(|m| m.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{}  {}  {}  {}  {}  {}  {}\n",
            pad_right(&row.key, kw),
            pad_left(&format_colombian(row.budget), FIGURE),
            pad_left(&format_colombian(row.executed), FIGURE),
            pad_left(&format_pct(row.execution_pct), PCT),
            pad_left(&format_pct(row.shortfall_pct), PCT),
            pad_left(&format_pct(row.target), 8),
            pad_left(&month, 3),
        ));
    }
    out
}

/// Ranked totals with their share of the group.
pub fn ranked_table(title: &str, dimension: Dimension, rows: &[RankedTotal]) -> String {
    let kw = key_width(dimension.header(), rows.iter().map(|r| display_width(&r.key)));
    let header = format!(
        "{}  {}  {}",
        pad_right(dimension.header(), kw),
        pad_left("Ejecutado", FIGURE),
        pad_left("% Part.", PCT),
    );
    let mut out = format!("{title}\n{header}\n{}\n", rule(display_width(&header)));
    if rows.is_empty() {
        out.push_str("(sin ventas)\n");
    }
    for row in rows {
        out.push_str(&format!(
            "{}  {}  {}\n",
            pad_right(&row.key, kw),
            pad_left(&format_colombian(row.total), FIGURE),
            pad_left(&format_pct(row.share_pct), PCT),
        ));
    }
    out
}

/// One line per overview gauge.
pub fn overview_line(overview: &CompanyOverview) -> String {
    format!(
        "{}: ejecutado {} de {} ({} ejecutado, faltan {})",
        overview.caption,
        format_usd(overview.executed),
        format_usd(overview.budget),
        format_pct(overview.execution_pct),
        format_pct(overview.shortfall_pct),
    )
}

/// Every table of the consolidated report, in reading order.
pub fn dashboard(dash: &Dashboard) -> String {
    let month = &dash.overview.monthly.caption;
    let year = &dash.overview.annual.caption;

    let mut sections = vec![
        format!(
            "{}\n{}\n",
            overview_line(&dash.overview.annual),
            overview_line(&dash.overview.monthly)
        ),
        execution_table(&format!("Ejecución por vendedor - {month}"), &dash.salespeople.monthly),
        execution_table(&format!("Ejecución por vendedor - {year}"), &dash.salespeople.annual),
    ];
    for (dimension, label, pair) in [
        (Dimension::OperatingCenter, "Ventas por sede", &dash.operating_centers),
        (Dimension::Client, "Top clientes", &dash.top_clients),
        (Dimension::Country, "Top países", &dash.top_countries),
    ] {
        sections.push(ranked_table(&format!("{label} - {month}"), dimension, &pair.monthly));
        sections.push(ranked_table(&format!("{label} - {year}"), dimension, &pair.annual));
    }
    sections.join("\n")
}
