//! `carex-metrics`: sales execution-versus-budget metric engine.
//!
//! Pure engine crate: receives pre-loaded transaction and budget records,
//! returns per-salesperson execution tables, ranked totals and the company
//! overview. No file I/O.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod model;
pub mod normalize;
pub mod period;
pub mod records;
pub mod table;

pub use config::{ColumnMapping, RulesConfig};
pub use engine::Engine;
pub use error::MetricsError;
pub use model::{
    AggregationResult, Amount, BudgetRecord, CompanyOverview, Dashboard, DataWarnings, Dimension,
    MetricsInput, PeriodPair, RankedTotal, TransactionRecord,
};
pub use period::{Period, ReportPeriod};
pub use records::{load_budget, load_transactions};
pub use table::{Cell, Table};
