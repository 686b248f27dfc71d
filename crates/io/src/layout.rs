use serde::{Deserialize, Serialize};

use carex_metrics::ColumnMapping;

pub const DEFAULT_TRANSACTIONS_SHEET: &str = "BD";
pub const DEFAULT_BUDGET_SHEET: &str = "Budget x Vendedor";

/// Where the two tables live inside a workbook and how their columns are
/// named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputLayout {
    pub transactions_sheet: String,
    pub budget_sheet: String,
    pub columns: ColumnMapping,
}

impl Default for InputLayout {
    fn default() -> Self {
        Self {
            transactions_sheet: DEFAULT_TRANSACTIONS_SHEET.into(),
            budget_sheet: DEFAULT_BUDGET_SHEET.into(),
            columns: ColumnMapping::default(),
        }
    }
}
