//! State shape, the closed action set, and the reducer.

use serde::Serialize;

use crate::categories::Category;
use crate::goals::Goal;
use crate::transactions::Transaction;

/// Snapshot of everything a view renders from.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceState {
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Closed set of state transitions. State is mutated exclusively through
/// these actions.
#[derive(Debug, Clone)]
pub enum FinanceAction {
    SetLoading(bool),
    SetError(Option<String>),
    SetTransactions(Vec<Transaction>),
    AddTransaction(Transaction),
    RemoveTransaction(String),
    SetGoals(Vec<Goal>),
    AddGoal(Goal),
    ReplaceGoal(Goal),
    RemoveGoal(String),
    SetCategories(Vec<Category>),
}

impl FinanceState {
    /// Applies one action. Transitions are synchronous and total: every
    /// action has a defined effect on every field, and every data action
    /// clears `loading`.
    pub fn apply(&mut self, action: FinanceAction) {
        match action {
            FinanceAction::SetLoading(loading) => {
                self.loading = loading;
            }
            FinanceAction::SetError(error) => {
                self.error = error;
                self.loading = false;
            }
            FinanceAction::SetTransactions(transactions) => {
                self.transactions = transactions;
                self.loading = false;
            }
            FinanceAction::AddTransaction(transaction) => {
                self.transactions.insert(0, transaction);
                self.loading = false;
            }
            FinanceAction::RemoveTransaction(id) => {
                self.transactions.retain(|t| t.id != id);
                self.loading = false;
            }
            FinanceAction::SetGoals(goals) => {
                self.goals = goals;
                self.loading = false;
            }
            FinanceAction::AddGoal(goal) => {
                self.goals.insert(0, goal);
                self.loading = false;
            }
            FinanceAction::ReplaceGoal(goal) => {
                if let Some(existing) = self.goals.iter_mut().find(|g| g.id == goal.id) {
                    *existing = goal;
                }
                self.loading = false;
            }
            FinanceAction::RemoveGoal(id) => {
                self.goals.retain(|g| g.id != id);
                self.loading = false;
            }
            FinanceAction::SetCategories(categories) => {
                self.categories = categories;
                self.loading = false;
            }
        }
    }
}
