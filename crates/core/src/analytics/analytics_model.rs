//! Analytics result models and the transaction list filter.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::{Transaction, TransactionKind};

/// Aggregate figures for the reports view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    /// Percentage of income kept, clamped to >= 0 for display.
    pub savings_rate: Decimal,
    pub avg_transaction_amount: Decimal,
    pub avg_income_amount: Decimal,
    pub avg_expense_amount: Decimal,
    /// Heuristic 0-100 presentation metric, not a financial model.
    pub health_score: i32,
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
}

/// Per-month income/expense/net sums over a trailing window, oldest first.
///
/// The four vectors are parallel; `months` holds `YYYY-MM` labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeries {
    pub months: Vec<String>,
    pub income: Vec<Decimal>,
    pub expenses: Vec<Decimal>,
    pub net: Vec<Decimal>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Conjunction of optional criteria for the transaction list view.
///
/// Unset criteria match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    /// Case-insensitive substring match against the description.
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_from: Option<Decimal>,
    pub amount_to: Option<Decimal>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &transaction.category != category {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            if !search.is_empty()
                && !transaction
                    .description
                    .to_lowercase()
                    .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if transaction.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if transaction.date > to {
                return false;
            }
        }
        if let Some(from) = self.amount_from {
            if transaction.amount < from {
                return false;
            }
        }
        if let Some(to) = self.amount_to {
            if transaction.amount > to {
                return false;
            }
        }
        true
    }
}
