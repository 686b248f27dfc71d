//! Inclusion rules for transactions and budget rows.

use std::collections::HashSet;

use crate::config::RulesConfig;
use crate::model::{BudgetRecord, TransactionRecord};
use crate::normalize::{amount_value, clean, match_key};

/// Rules compiled into lookup sets. Built once per engine.
#[derive(Debug, Clone)]
pub struct Predicate {
    concepts: HashSet<String>,
    currencies: HashSet<String>,
    excluded_items: HashSet<String>,
    house_account: String,
}

impl Predicate {
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            concepts: rules.accepted_concepts.iter().map(|c| match_key(c)).collect(),
            currencies: rules.accepted_currencies.iter().map(|c| match_key(c)).collect(),
            excluded_items: rules.excluded_items.iter().map(|i| clean(i)).collect(),
            house_account: match_key(&rules.house_account),
        }
    }

    pub fn is_house_account(&self, salesperson: &str) -> bool {
        !self.house_account.is_empty() && match_key(salesperson) == self.house_account
    }

    pub fn is_excluded_item(&self, item: &str) -> bool {
        self.excluded_items.contains(item.trim())
    }

    pub fn accepts_concept(&self, concept: &str) -> bool {
        self.concepts.contains(&match_key(concept))
    }

    pub fn accepts_currency(&self, currency: &str) -> bool {
        self.currencies.contains(&match_key(currency))
    }

    /// The transaction predicate. All conditions must hold:
    /// accepted concept, accepted currency, item not excluded, non-null
    /// non-zero amount, salesperson not the house account. Rows without a
    /// salesperson pass the last check.
    pub fn accepts(&self, record: &TransactionRecord) -> bool {
        self.accepts_concept(&record.concept)
            && self.accepts_currency(&record.currency)
            && !self.is_excluded_item(&record.item)
            && is_valid_amount(amount_value(&record.amount_usd))
            && !record
                .salesperson
                .as_deref()
                .is_some_and(|s| self.is_house_account(s))
    }
}

/// Non-null and non-zero.
pub fn is_valid_amount(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0)
}

/// Budget rows count when their normalized amount is non-zero.
pub fn accepts_budget(record: &BudgetRecord) -> bool {
    is_valid_amount(amount_value(&record.amount_usd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;

    fn txn(concept: &str, currency: &str, item: &str, amount: Amount, seller: Option<&str>) -> TransactionRecord {
        TransactionRecord {
            year: Some(2024),
            month: Some(6),
            client: "Client".into(),
            operating_center: "Bogotá".into(),
            amount_usd: amount,
            concept: concept.into(),
            currency: currency.into(),
            item: item.into(),
            salesperson: seller.map(str::to_string),
            country: "Países Bajos".into(),
        }
    }

    fn predicate() -> Predicate {
        Predicate::new(&RulesConfig::default())
    }

    #[test]
    fn accepts_invoice_and_void() {
        let p = predicate();
        assert!(p.accepts(&txn("FACTURA", "USD", "UCHUVA", Amount::Number(10.0), Some("Ana"))));
        assert!(p.accepts(&txn("anulación fe", "eur", "UCHUVA", Amount::Number(-10.0), Some("Ana"))));
        assert!(p.accepts(&txn(" Invoice Void ", "USD", "UCHUVA", Amount::Number(-10.0), Some("Ana"))));
    }

    #[test]
    fn rejects_other_concepts_and_currencies() {
        let p = predicate();
        assert!(!p.accepts(&txn("NOTA CREDITO", "USD", "UCHUVA", Amount::Number(10.0), Some("Ana"))));
        assert!(!p.accepts(&txn("FACTURA", "COP", "UCHUVA", Amount::Number(10.0), Some("Ana"))));
    }

    #[test]
    fn rejects_excluded_items_after_trim() {
        let p = predicate();
        assert!(!p.accepts(&txn("FACTURA", "USD", " AIR FREIGHT ", Amount::Number(10.0), Some("Ana"))));
        assert!(!p.accepts(&txn(
            "FACTURA",
            "USD",
            "CONTENEDOR PET 19,0X12,0X7,5 500 GRS",
            Amount::Number(10.0),
            Some("Ana")
        )));
    }

    #[test]
    fn rejects_null_and_zero_amounts() {
        let p = predicate();
        assert!(!p.accepts(&txn("FACTURA", "USD", "UCHUVA", Amount::Null, Some("Ana"))));
        assert!(!p.accepts(&txn("FACTURA", "USD", "UCHUVA", Amount::Number(0.0), Some("Ana"))));
    }

    #[test]
    fn rejects_house_account_case_insensitively() {
        let p = predicate();
        let house = " Comercializadora Internacional Caribbean Exotics S A ";
        assert!(!p.accepts(&txn("FACTURA", "USD", "UCHUVA", Amount::Number(10.0), Some(house))));
        assert!(p.accepts(&txn("FACTURA", "USD", "UCHUVA", Amount::Number(10.0), None)));
    }

    #[test]
    fn budget_validity() {
        let row = |amount: Amount| BudgetRecord {
            salesperson: Some("Ana".into()),
            month: Some(6),
            amount_usd: amount,
        };
        assert!(accepts_budget(&row(Amount::Text("2.000,00".into()))));
        assert!(!accepts_budget(&row(Amount::Text("n/a".into()))));
        assert!(!accepts_budget(&row(Amount::Null)));
        assert!(!accepts_budget(&row(Amount::Number(0.0))));
    }
}
