use std::collections::HashMap;

use crate::model::{AggregationResult, RankedTotal};
use crate::normalize::round2;

/// `executed / budget * 100`, or 0 when there is no positive budget.
pub fn execution_pct(executed: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        executed / budget * 100.0
    } else {
        0.0
    }
}

/// Points left to reach `target`, never negative.
pub fn shortfall_pct(execution_pct: f64, target: f64) -> f64 {
    (target - execution_pct).max(0.0)
}

/// Build one execution row. Percentages come from the unrounded sums;
/// every figure is then rounded to 2 decimals.
pub fn execution_row(
    key: impl Into<String>,
    budget: f64,
    executed: f64,
    target: f64,
    period: Option<u32>,
) -> AggregationResult {
    let pct = execution_pct(executed, budget);
    AggregationResult {
        key: key.into(),
        budget: round2(budget),
        executed: round2(executed),
        execution_pct: round2(pct),
        shortfall_pct: round2(shortfall_pct(pct, target)),
        target,
        period,
        is_total: false,
    }
}

/// Company roll-up of `rows`: budget and executed are summed, the
/// percentage is derived again from those sums. Per-row percentages are
/// never averaged.
pub fn total_row(
    rows: &[AggregationResult],
    label: &str,
    target: f64,
    period: Option<u32>,
) -> AggregationResult {
    let budget: f64 = rows.iter().map(|r| r.budget).sum();
    let executed: f64 = rows.iter().map(|r| r.executed).sum();
    AggregationResult {
        is_total: true,
        ..execution_row(label, budget, executed, target, period)
    }
}

/// Share of `part` in `whole` as a rounded percentage; 0 for an empty whole.
pub fn share_pct(part: f64, whole: f64) -> f64 {
    if whole != 0.0 {
        round2(part / whole * 100.0)
    } else {
        0.0
    }
}

/// Sum amounts per key, keeping keys in first-seen order.
pub fn sum_by_key<'a, I>(entries: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut sums: Vec<(String, f64)> = Vec::new();
    for (key, amount) in entries {
        match index.get(key) {
            Some(&i) => sums[i].1 += amount,
            None => {
                index.insert(key, sums.len());
                sums.push((key.to_string(), amount));
            }
        }
    }
    sums
}

/// Sort group sums descending (ties by key), attach each group's share of
/// the whole, then keep the first `top_n`.
pub fn rank(mut sums: Vec<(String, f64)>, top_n: Option<usize>) -> Vec<RankedTotal> {
    let grand_total: f64 = sums.iter().map(|(_, v)| v).sum();
    sums.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if let Some(n) = top_n {
        sums.truncate(n);
    }
    sums.into_iter()
        .map(|(key, total)| RankedTotal {
            share_pct: share_pct(total, grand_total),
            key,
            total: round2(total),
        })
        .collect()
}
