use std::collections::{HashMap, HashSet};

use crate::aggregate::{execution_row, rank, sum_by_key, total_row};
use crate::config::RulesConfig;
use crate::filter::{accepts_budget, Predicate};
use crate::model::{
    AggregationResult, CompanyOverview, Dashboard, DataWarnings, Dimension, MetricsInput,
    PeriodPair, RankedTotal, TransactionRecord,
};
use crate::normalize::{amount_value, normalize_amount};
use crate::period::{Period, ReportPeriod};

/// Execution-versus-budget engine over one immutable snapshot.
///
/// Every query is a fresh pass over the input; the engine holds no state
/// beyond the compiled rules.
pub struct Engine<'a> {
    rules: &'a RulesConfig,
    predicate: Predicate,
    input: &'a MetricsInput,
}

impl<'a> Engine<'a> {
    pub fn new(rules: &'a RulesConfig, input: &'a MetricsInput) -> Self {
        Self {
            rules,
            predicate: Predicate::new(rules),
            input,
        }
    }

    /// Distinct salesperson names in first-seen order, taken from the whole
    /// transaction table before any filtering. Blank names and the house
    /// account are left out.
    pub fn salespeople(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut names = Vec::new();
        for record in &self.input.transactions {
            let Some(name) = record.salesperson.as_deref().map(str::trim) else {
                continue;
            };
            if name.is_empty() || self.predicate.is_house_account(name) {
                continue;
            }
            if seen.insert(name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Group qualifying transactions of `period` by `dimension`.
    ///
    /// Salesperson tables join the budget and list every known salesperson,
    /// including those with no sales. Other dimensions carry no budget: rows
    /// are ranked descending and cut to the configured top-N, and their
    /// percentage fields are not meaningful (budget 0); render those with
    /// [`Engine::rank_by`] instead. The last row is always the company total
    /// of the rows above it.
    pub fn aggregate_by(
        &self,
        dimension: Dimension,
        period: Period,
        reference: ReportPeriod,
    ) -> Vec<AggregationResult> {
        let label = period.label(reference);
        let target = self.rules.target_pct;

        let mut rows = match dimension {
            Dimension::Salesperson => self.salesperson_rows(period, reference),
            _ => self
                .rank_by(dimension, period, reference)
                .into_iter()
                .map(|r| execution_row(r.key, 0.0, r.total, target, label))
                .collect(),
        };

        let total = total_row(&rows, &self.rules.total_label, target, label);
        log::debug!(
            "aggregate_by {dimension} {period} {reference}: {} rows, executed {}",
            rows.len(),
            total.executed
        );
        rows.push(total);
        rows
    }

    /// Ranked totals of qualifying transactions along `dimension`.
    pub fn rank_by(
        &self,
        dimension: Dimension,
        period: Period,
        reference: ReportPeriod,
    ) -> Vec<RankedTotal> {
        let sums = sum_by_key(self.qualifying(period, reference).filter_map(|(record, amount)| {
            let key = dimension.key_of(record)?;
            (!key.is_empty()).then_some((key, amount))
        }));
        rank(sums, self.rules.top_n(dimension))
    }

    /// Company-wide executed against the whole budget of the window.
    pub fn company_overview(&self, period: Period, reference: ReportPeriod) -> CompanyOverview {
        let executed: f64 = self.qualifying(period, reference).map(|(_, amount)| amount).sum();
        let budget: f64 = self
            .input
            .budget
            .iter()
            .filter(|b| accepts_budget(b) && period.contains_budget_month(reference, b.month))
            .map(|b| normalize_amount(&b.amount_usd).value)
            .sum();
        let row = execution_row("", budget, executed, self.rules.target_pct, None);
        CompanyOverview {
            period,
            caption: period.caption(reference),
            executed: row.executed,
            budget: row.budget,
            execution_pct: row.execution_pct,
            shortfall_pct: row.shortfall_pct,
        }
    }

    /// Every table of the consolidated report for `reference`.
    pub fn dashboard(&self, reference: ReportPeriod) -> Dashboard {
        let ranked = |dimension: Dimension| PeriodPair {
            annual: self.rank_by(dimension, Period::Annual, reference),
            monthly: self.rank_by(dimension, Period::Monthly, reference),
        };

        Dashboard {
            reference,
            overview: PeriodPair {
                annual: self.company_overview(Period::Annual, reference),
                monthly: self.company_overview(Period::Monthly, reference),
            },
            salespeople: PeriodPair {
                annual: self.aggregate_by(Dimension::Salesperson, Period::Annual, reference),
                monthly: self.aggregate_by(Dimension::Salesperson, Period::Monthly, reference),
            },
            operating_centers: ranked(Dimension::OperatingCenter),
            top_clients: ranked(Dimension::Client),
            top_countries: ranked(Dimension::Country),
            warnings: self.warnings(),
        }
    }

    /// Amount cells that held unparseable text.
    pub fn warnings(&self) -> DataWarnings {
        DataWarnings {
            coerced_budget_amounts: self
                .input
                .budget
                .iter()
                .filter(|b| normalize_amount(&b.amount_usd).coerced)
                .count(),
            coerced_transaction_amounts: self
                .input
                .transactions
                .iter()
                .filter(|t| normalize_amount(&t.amount_usd).coerced)
                .count(),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Transactions passing the predicate and inside the window, with their
    /// normalized amount.
    fn qualifying(
        &self,
        period: Period,
        reference: ReportPeriod,
    ) -> impl Iterator<Item = (&'a TransactionRecord, f64)> + '_ {
        let input: &'a MetricsInput = self.input;
        input
            .transactions
            .iter()
            .filter(move |t| period.contains(reference, t.year, t.month) && self.predicate.accepts(t))
            .filter_map(|t| amount_value(&t.amount_usd).map(|amount| (t, amount)))
    }

    fn salesperson_rows(&self, period: Period, reference: ReportPeriod) -> Vec<AggregationResult> {
        let names = self.salespeople();

        let mut executed: HashMap<&str, f64> = HashMap::new();
        for (record, amount) in self.qualifying(period, reference) {
            if let Some(name) = record.salesperson.as_deref() {
                *executed.entry(name.trim()).or_insert(0.0) += amount;
            }
        }

        let mut budget: HashMap<&str, f64> = HashMap::new();
        for row in &self.input.budget {
            if !accepts_budget(row) || !period.contains_budget_month(reference, row.month) {
                continue;
            }
            if let Some(name) = row.salesperson.as_deref() {
                *budget.entry(name.trim()).or_insert(0.0) += normalize_amount(&row.amount_usd).value;
            }
        }

        let label = period.label(reference);
        names
            .into_iter()
            .map(|name| {
                let e = executed.get(name.as_str()).copied().unwrap_or(0.0);
                let b = budget.get(name.as_str()).copied().unwrap_or(0.0);
                execution_row(name, b, e, self.rules.target_pct, label)
            })
            .collect()
    }
}
