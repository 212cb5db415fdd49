use log::debug;
use std::sync::Arc;

use super::transactions_model::{NewTransaction, Transaction};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;

/// Service for managing transactions.
///
/// Validates user input before delegating to the remote repository.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { repository }
    }
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repository.list_by_user(user_id).await
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        debug!(
            "Creating {:?} transaction of {} in category '{}'",
            new_transaction.kind, new_transaction.amount, new_transaction.category
        );
        self.repository.insert(user_id, new_transaction).await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        debug!("Deleting transaction {}", transaction_id);
        self.repository.delete(transaction_id).await
    }
}
