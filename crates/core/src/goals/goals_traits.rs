use async_trait::async_trait;

use super::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::errors::Result;

/// Trait for the remote goal collection.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Lists all goals owned by the given user, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Goal>>;

    /// Inserts a goal and returns the persisted record.
    async fn insert(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;

    /// Applies a partial update and returns the full persisted record.
    async fn update(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal>;

    /// Deletes a goal by id.
    async fn delete(&self, goal_id: &str) -> Result<()>;
}

/// Trait for goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>>;

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;

    async fn update_goal(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal>;

    async fn delete_goal(&self, goal_id: &str) -> Result<()>;
}
