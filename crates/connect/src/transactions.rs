//! Remote repository for the `transactions` table.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use centavo_core::errors::Result;
use centavo_core::transactions::{NewTransaction, Transaction, TransactionKind};

use crate::client::ConnectClient;

const TABLE: &str = "transactions";

/// Row shape as stored by the backend. Column names are a literal
/// contract; parsing rejects records that do not match it.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: String,
    user_id: String,
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: Decimal,
    description: String,
    category: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind,
            amount: row.amount,
            description: row.description,
            category: row.category,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload; server-assigned columns are absent.
#[derive(Debug, Serialize)]
struct NewTransactionRow<'a> {
    user_id: &'a str,
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: Decimal,
    description: &'a str,
    category: &'a str,
    date: NaiveDate,
}

pub struct RemoteTransactionRepository {
    client: Arc<ConnectClient>,
}

impl RemoteTransactionRepository {
    pub fn new(client: Arc<ConnectClient>) -> Self {
        RemoteTransactionRepository { client }
    }
}

#[async_trait]
impl centavo_core::transactions::TransactionRepositoryTrait for RemoteTransactionRepository {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let rows: Vec<TransactionRow> = self
            .client
            .get_rows(
                TABLE,
                &[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                    ("order", "date.desc".to_string()),
                ],
            )
            .await?;

        info!("[Connect] Fetched {} transactions", rows.len());
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn insert(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        let payload = NewTransactionRow {
            user_id,
            kind: new_transaction.kind,
            amount: new_transaction.amount,
            description: &new_transaction.description,
            category: &new_transaction.category,
            date: new_transaction.date,
        };
        let row: TransactionRow = self.client.insert_row(TABLE, &payload).await?;
        Ok(row.into())
    }

    async fn delete(&self, transaction_id: &str) -> Result<()> {
        self.client.delete_row(TABLE, transaction_id).await
    }
}
