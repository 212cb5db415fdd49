use log::debug;
use std::sync::Arc;

use super::goals_model::{Goal, GoalUpdate, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::Result;

/// Service for managing goals.
///
/// Validates user input before delegating to the remote repository.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { repository }
    }
}

#[async_trait::async_trait]
impl GoalServiceTrait for GoalService {
    async fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.repository.list_by_user(user_id).await
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        debug!(
            "Creating goal '{}' with target {}",
            new_goal.title, new_goal.target_amount
        );
        self.repository.insert(user_id, new_goal).await
    }

    async fn update_goal(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        update.validate()?;
        debug!("Updating goal {}", goal_id);
        self.repository.update(goal_id, update).await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        debug!("Deleting goal {}", goal_id);
        self.repository.delete(goal_id).await
    }
}
