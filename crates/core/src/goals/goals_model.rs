//! Goals domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Category of savings goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Savings,
    Investment,
    Emergency,
    Purchase,
    Vacation,
    Other,
}

/// Domain model representing a savings goal.
///
/// `current_amount` may legitimately exceed `target_amount`; only the
/// progress percentage clamps. `completed_date` is advisory bookkeeping,
/// stamped once when the target is first reached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub category: GoalCategory,
    pub deadline: Option<NaiveDate>,
    pub archived: bool,
    pub completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Progress towards the target as a percentage, clamped to 100.
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let percent = self.current_amount / self.target_amount * dec!(100);
        percent.min(dec!(100))
    }

    /// A goal is completed when its progress reaches 100%, independent of
    /// the advisory `completed_date` field.
    pub fn is_completed(&self) -> bool {
        self.progress() >= dec!(100)
    }

    /// Builds the partial update for a user contribution of `amount`.
    ///
    /// Stamps `completed_date` on the first crossing of the target only;
    /// later contributions leave the original date in place.
    pub fn contribution(&self, amount: Decimal, today: NaiveDate) -> GoalUpdate {
        let new_amount = self.current_amount + amount;
        let mut update = GoalUpdate {
            current_amount: Some(new_amount),
            ..GoalUpdate::default()
        };
        if new_amount >= self.target_amount && self.completed_date.is_none() {
            update.completed_date = Some(today);
        }
        update
    }
}

/// Input model for creating a new goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub category: GoalCategory,
    pub deadline: Option<NaiveDate>,
}

impl NewGoal {
    /// Validates form input before any remote call is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "target amount must be greater than zero".to_string(),
            )
            .into());
        }
        if self.current_amount < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "current amount must not be negative".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Partial update for a goal; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GoalCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
}

impl GoalUpdate {
    /// Validates the fields that are present.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField("title".to_string()).into());
            }
        }
        if let Some(target_amount) = self.target_amount {
            if target_amount <= Decimal::ZERO {
                return Err(ValidationError::InvalidInput(
                    "target amount must be greater than zero".to_string(),
                )
                .into());
            }
        }
        if let Some(current_amount) = self.current_amount {
            if current_amount < Decimal::ZERO {
                return Err(ValidationError::InvalidInput(
                    "current amount must not be negative".to_string(),
                )
                .into());
            }
        }
        Ok(())
    }
}
