//! Transactions domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Domain model representing a single dated income or expense record.
///
/// Transactions are immutable once created: the only lifecycle operations
/// are insert and delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new transaction.
///
/// Server-assigned fields (id, owner, timestamps) are absent; the persisted
/// record returned by the backend carries them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Validates form input before any remote call is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "amount must be greater than zero".to_string(),
            )
            .into());
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()).into());
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category".to_string()).into());
        }
        Ok(())
    }
}
