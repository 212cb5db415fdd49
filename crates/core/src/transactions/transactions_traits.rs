use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::Result;

/// Trait for the remote transaction collection.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Lists all transactions owned by the given user, newest date first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Inserts a transaction and returns the persisted record.
    async fn insert(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Deletes a transaction by id.
    async fn delete(&self, transaction_id: &str) -> Result<()>;
}

/// Trait for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;
}
