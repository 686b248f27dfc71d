use serde::{Deserialize, Serialize};

use crate::error::MetricsError;
use crate::model::Dimension;

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

pub const DEFAULT_HOUSE_ACCOUNT: &str = "COMERCIALIZADORA INTERNACIONAL CARIBBEAN EXOTICS S A";
pub const DEFAULT_TOTAL_LABEL: &str = "TOTAL COMPAÑÍA";

/// Freight, inventory-transfer, recovery and specific SKUs that never count
/// as sales.
pub const DEFAULT_EXCLUDED_ITEMS: [&str; 14] = [
    "AIR FREIGHT",
    "INV PLANTAS",
    "INV PRIMA - FLO",
    "INV RECICLAJE",
    "OTHER EXPORT COSTS",
    "SEA FREIGHT COST",
    "HUMAGRO CALCIUM DRENCH",
    "SULPHUR GULUPA X 20 LITROS",
    "HUMAGRO CALCIUM FOLIAR UCH X 20 LITROS",
    "HUMAGRO KAGUACATE X 20",
    "INV RECUPERACIONES",
    "UCHUVA X 400GR DESGRANAD NACIONAL EURO",
    "CONTENEDOR PET 19,0X12,0X7,5 500 GRS",
    "HIGO X 1KG NACIONAL EXITO",
];

/// Inclusion/exclusion rules and presentation constants for the engine.
///
/// Every field has a production default, so an empty `[rules]` table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Invoice and invoice-void concepts, compared case-insensitively.
    pub accepted_concepts: Vec<String>,
    /// Compared case-insensitively.
    pub accepted_currencies: Vec<String>,
    /// Compared exactly after trimming.
    pub excluded_items: Vec<String>,
    /// Internal company identity; compared case-insensitively after trimming.
    pub house_account: String,
    pub total_label: String,
    pub target_pct: f64,
    pub top_clients: usize,
    pub top_countries: usize,
    /// `None` keeps every operating center.
    pub top_operating_centers: Option<usize>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            accepted_concepts: ["FACTURA", "ANULACIÓN FE", "INVOICE", "INVOICE VOID"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            accepted_currencies: vec!["USD".into(), "EUR".into()],
            excluded_items: DEFAULT_EXCLUDED_ITEMS.iter().map(|s| s.to_string()).collect(),
            house_account: DEFAULT_HOUSE_ACCOUNT.into(),
            total_label: DEFAULT_TOTAL_LABEL.into(),
            target_pct: 100.0,
            top_clients: 5,
            top_countries: 4,
            top_operating_centers: None,
        }
    }
}

impl RulesConfig {
    pub fn from_toml(input: &str) -> Result<Self, MetricsError> {
        let config: RulesConfig =
            toml::from_str(input).map_err(|e| MetricsError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MetricsError> {
        if self.accepted_concepts.iter().all(|c| c.trim().is_empty()) {
            return Err(MetricsError::ConfigValidation(
                "accepted_concepts must name at least one concept".into(),
            ));
        }
        if self.accepted_currencies.iter().all(|c| c.trim().is_empty()) {
            return Err(MetricsError::ConfigValidation(
                "accepted_currencies must name at least one currency".into(),
            ));
        }
        if self.total_label.trim().is_empty() {
            return Err(MetricsError::ConfigValidation(
                "total_label must not be blank".into(),
            ));
        }
        if !self.target_pct.is_finite() || self.target_pct < 0.0 {
            return Err(MetricsError::ConfigValidation(format!(
                "target_pct must be a non-negative number, got {}",
                self.target_pct
            )));
        }
        Ok(())
    }

    /// Row limit for a ranked dimension. Salesperson tables are never cut.
    pub fn top_n(&self, dimension: Dimension) -> Option<usize> {
        match dimension {
            Dimension::Salesperson => None,
            Dimension::OperatingCenter => self.top_operating_centers,
            Dimension::Client => Some(self.top_clients),
            Dimension::Country => Some(self.top_countries),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names of the transaction table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransactionColumns {
    pub year: String,
    pub month: String,
    pub client: String,
    pub operating_center: String,
    pub amount_usd: String,
    pub concept: String,
    pub currency: String,
    pub item: String,
    pub salesperson: String,
    pub country: String,
}

impl Default for TransactionColumns {
    fn default() -> Self {
        Self {
            year: "Año".into(),
            month: "Mes".into(),
            client: "Nombre Cliente_factura".into(),
            operating_center: "Nombre Centro de Operacion".into(),
            amount_usd: "Valor Total USD".into(),
            concept: "Concepto".into(),
            currency: "Moneda".into(),
            item: "Nombre Item".into(),
            salesperson: "Vendedor".into(),
            country: "Desc Pais Cliente_factura".into(),
        }
    }
}

/// Header names of the budget table. `month` is optional in the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetColumns {
    pub salesperson: String,
    pub month: String,
    pub amount_usd: String,
}

impl Default for BudgetColumns {
    fn default() -> Self {
        Self {
            salesperson: "Vendedor".into(),
            month: "Mes".into(),
            amount_usd: "Valor Total USD".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    pub transactions: TransactionColumns,
    pub budget: BudgetColumns,
}
