use chrono::Utc;
use log::{debug, error};
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

use super::store_model::{FinanceAction, FinanceState};
use crate::categories::CategoryServiceTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::goals::{Goal, GoalServiceTrait, GoalUpdate, NewGoal};
use crate::transactions::{NewTransaction, Transaction, TransactionServiceTrait};

/// Dependency-injected state container coordinating remote CRUD with local
/// UI state.
///
/// Every mutating operation follows the same protocol: set loading, perform
/// the remote call, on success dispatch the corresponding local splice, on
/// failure record the error and leave the collection untouched.
pub struct FinanceStore {
    transaction_service: Arc<dyn TransactionServiceTrait>,
    goal_service: Arc<dyn GoalServiceTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
    state: RwLock<FinanceState>,
}

impl FinanceStore {
    pub fn new(
        transaction_service: Arc<dyn TransactionServiceTrait>,
        goal_service: Arc<dyn GoalServiceTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        FinanceStore {
            transaction_service,
            goal_service,
            category_service,
            state: RwLock::new(FinanceState::default()),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> FinanceState {
        self.state.read().unwrap().clone()
    }

    fn dispatch(&self, action: FinanceAction) {
        self.state.write().unwrap().apply(action);
    }

    fn record_failure(&self, context: &str, err: &Error) {
        error!("{}: {}", context, err);
        self.dispatch(FinanceAction::SetError(Some(err.to_string())));
    }

    /// Fetches the three collections jointly on session start.
    ///
    /// All-or-nothing: if any fetch fails, one aggregate error is recorded
    /// and data from the calls that did succeed is discarded.
    pub async fn load_all(&self, user_id: &str) -> Result<()> {
        debug!("Loading collections for user {}", user_id);
        self.dispatch(FinanceAction::SetLoading(true));

        let fetched = tokio::try_join!(
            self.transaction_service.get_transactions(user_id),
            self.goal_service.get_goals(user_id),
            self.category_service.get_categories(),
        );

        match fetched {
            Ok((transactions, goals, categories)) => {
                self.dispatch(FinanceAction::SetTransactions(transactions));
                self.dispatch(FinanceAction::SetGoals(goals));
                self.dispatch(FinanceAction::SetCategories(categories));
                Ok(())
            }
            Err(err) => {
                self.record_failure("Failed to load collections", &err);
                Err(err)
            }
        }
    }

    /// Clears all three collections synchronously on session end.
    pub fn clear_all(&self) {
        debug!("Clearing collections on session end");
        self.dispatch(FinanceAction::SetTransactions(Vec::new()));
        self.dispatch(FinanceAction::SetGoals(Vec::new()));
        self.dispatch(FinanceAction::SetCategories(Vec::new()));
    }

    pub fn clear_error(&self) {
        self.dispatch(FinanceAction::SetError(None));
    }

    pub async fn add_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        self.dispatch(FinanceAction::SetLoading(true));
        match self
            .transaction_service
            .create_transaction(user_id, new_transaction)
            .await
        {
            Ok(transaction) => {
                self.dispatch(FinanceAction::AddTransaction(transaction.clone()));
                Ok(transaction)
            }
            Err(err) => {
                self.record_failure("Failed to add transaction", &err);
                Err(err)
            }
        }
    }

    pub async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        self.dispatch(FinanceAction::SetLoading(true));
        match self
            .transaction_service
            .delete_transaction(transaction_id)
            .await
        {
            Ok(()) => {
                self.dispatch(FinanceAction::RemoveTransaction(transaction_id.to_string()));
                Ok(())
            }
            Err(err) => {
                self.record_failure("Failed to delete transaction", &err);
                Err(err)
            }
        }
    }

    pub async fn add_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        self.dispatch(FinanceAction::SetLoading(true));
        match self.goal_service.create_goal(user_id, new_goal).await {
            Ok(goal) => {
                self.dispatch(FinanceAction::AddGoal(goal.clone()));
                Ok(goal)
            }
            Err(err) => {
                self.record_failure("Failed to add goal", &err);
                Err(err)
            }
        }
    }

    /// Applies a partial update; the locally replaced record is the full
    /// persisted row returned by the backend, so untouched fields survive.
    pub async fn update_goal(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        self.dispatch(FinanceAction::SetLoading(true));
        match self.goal_service.update_goal(goal_id, update).await {
            Ok(goal) => {
                self.dispatch(FinanceAction::ReplaceGoal(goal.clone()));
                Ok(goal)
            }
            Err(err) => {
                self.record_failure("Failed to update goal", &err);
                Err(err)
            }
        }
    }

    pub async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        self.dispatch(FinanceAction::SetLoading(true));
        match self.goal_service.delete_goal(goal_id).await {
            Ok(()) => {
                self.dispatch(FinanceAction::RemoveGoal(goal_id.to_string()));
                Ok(())
            }
            Err(err) => {
                self.record_failure("Failed to delete goal", &err);
                Err(err)
            }
        }
    }

    /// Adds a user contribution to a goal's current amount, stamping the
    /// completion date on the first crossing of the target.
    pub async fn add_to_goal(&self, goal_id: &str, amount: Decimal) -> Result<Goal> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "contribution amount must be greater than zero".to_string(),
            )
            .into());
        }

        let goal = self
            .state
            .read()
            .unwrap()
            .goals
            .iter()
            .find(|g| g.id == goal_id)
            .cloned()
            .ok_or_else(|| {
                Error::Unexpected(format!("goal {} not present in local state", goal_id))
            })?;

        let update = goal.contribution(amount, Utc::now().date_naive());
        self.update_goal(goal_id, update).await
    }

    /// Toggles the archived flag on a goal.
    pub async fn set_goal_archived(&self, goal_id: &str, archived: bool) -> Result<Goal> {
        let update = GoalUpdate {
            archived: Some(archived),
            ..GoalUpdate::default()
        };
        self.update_goal(goal_id, update).await
    }
}
