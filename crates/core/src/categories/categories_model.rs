//! Categories domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which transaction kinds a category may classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

/// A label classifying transactions.
///
/// Categories are a shared taxonomy loaded globally, not scoped per user,
/// and are immutable from the client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryKind,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Whether this category applies to the given transaction kind.
    pub fn applies_to(&self, kind: crate::transactions::TransactionKind) -> bool {
        use crate::transactions::TransactionKind;
        match self.kind {
            CategoryKind::Both => true,
            CategoryKind::Income => kind == TransactionKind::Income,
            CategoryKind::Expense => kind == TransactionKind::Expense,
        }
    }
}
