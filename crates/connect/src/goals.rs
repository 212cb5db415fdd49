//! Remote repository for the `goals` table.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use centavo_core::errors::Result;
use centavo_core::goals::{Goal, GoalCategory, GoalUpdate, NewGoal};

use crate::client::ConnectClient;

const TABLE: &str = "goals";

#[derive(Debug, Deserialize)]
struct GoalRow {
    id: String,
    user_id: String,
    title: String,
    target_amount: Decimal,
    current_amount: Decimal,
    category: GoalCategory,
    #[serde(default)]
    deadline: Option<NaiveDate>,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    completed_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Goal {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            target_amount: row.target_amount,
            current_amount: row.current_amount,
            category: row.category,
            deadline: row.deadline,
            archived: row.archived,
            completed_date: row.completed_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewGoalRow<'a> {
    user_id: &'a str,
    title: &'a str,
    target_amount: Decimal,
    current_amount: Decimal,
    category: GoalCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<NaiveDate>,
}

/// Partial update payload: only the columns actually being changed are
/// serialized, so untouched columns survive at the backend.
#[derive(Debug, Serialize)]
struct GoalUpdateRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<GoalCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_date: Option<NaiveDate>,
}

impl<'a> From<&'a GoalUpdate> for GoalUpdateRow<'a> {
    fn from(update: &'a GoalUpdate) -> Self {
        GoalUpdateRow {
            title: update.title.as_deref(),
            target_amount: update.target_amount,
            current_amount: update.current_amount,
            category: update.category,
            deadline: update.deadline,
            archived: update.archived,
            completed_date: update.completed_date,
        }
    }
}

pub struct RemoteGoalRepository {
    client: Arc<ConnectClient>,
}

impl RemoteGoalRepository {
    pub fn new(client: Arc<ConnectClient>) -> Self {
        RemoteGoalRepository { client }
    }
}

#[async_trait]
impl centavo_core::goals::GoalRepositoryTrait for RemoteGoalRepository {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        let rows: Vec<GoalRow> = self
            .client
            .get_rows(
                TABLE,
                &[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;

        info!("[Connect] Fetched {} goals", rows.len());
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn insert(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let payload = NewGoalRow {
            user_id,
            title: &new_goal.title,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            category: new_goal.category,
            deadline: new_goal.deadline,
        };
        let row: GoalRow = self.client.insert_row(TABLE, &payload).await?;
        Ok(row.into())
    }

    async fn update(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        let payload = GoalUpdateRow::from(&update);
        let row: GoalRow = self.client.update_row(TABLE, goal_id, &payload).await?;
        Ok(row.into())
    }

    async fn delete(&self, goal_id: &str) -> Result<()> {
        self.client.delete_row(TABLE, goal_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_parses_with_optional_columns_absent() {
        let row: GoalRow = serde_json::from_str(
            r#"{
                "id": "g-1",
                "user_id": "u-1",
                "title": "Emergency fund",
                "target_amount": 1000,
                "current_amount": 250,
                "category": "emergency",
                "created_at": "2025-01-10T08:00:00Z",
                "updated_at": "2025-01-10T08:00:00Z"
            }"#,
        )
        .unwrap();

        let goal = Goal::from(row);
        assert_eq!(goal.category, GoalCategory::Emergency);
        assert!(!goal.archived);
        assert!(goal.deadline.is_none());
        assert!(goal.completed_date.is_none());
        assert_eq!(goal.progress(), dec!(25));
    }

    #[test]
    fn test_partial_update_serializes_only_set_fields() {
        let update = GoalUpdate {
            current_amount: Some(dec!(400)),
            ..GoalUpdate::default()
        };
        let json = serde_json::to_value(GoalUpdateRow::from(&update)).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(json["current_amount"], serde_json::json!(400.0));
    }

    #[test]
    fn test_full_update_serializes_wire_names() {
        let update = GoalUpdate {
            title: Some("Trip".to_string()),
            target_amount: Some(dec!(3000)),
            current_amount: Some(dec!(100)),
            category: Some(GoalCategory::Vacation),
            deadline: NaiveDate::from_ymd_opt(2026, 1, 1),
            archived: Some(false),
            completed_date: None,
        };
        let json = serde_json::to_value(GoalUpdateRow::from(&update)).unwrap();

        assert_eq!(json["title"], "Trip");
        assert_eq!(json["category"], "vacation");
        assert_eq!(json["deadline"], "2026-01-01");
        assert_eq!(json["archived"], false);
        assert!(json.get("completed_date").is_none());
    }
}
