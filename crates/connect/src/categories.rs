//! Remote repository for the shared `categories` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use serde::Deserialize;
use std::sync::Arc;

use centavo_core::categories::{Category, CategoryKind};
use centavo_core::errors::Result;

use crate::client::ConnectClient;

const TABLE: &str = "categories";

#[derive(Debug, Deserialize)]
struct CategoryRow {
    id: i64,
    name: String,
    #[serde(rename = "type")]
    kind: CategoryKind,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            kind: row.kind,
            created_at: row.created_at,
        }
    }
}

pub struct RemoteCategoryRepository {
    client: Arc<ConnectClient>,
}

impl RemoteCategoryRepository {
    pub fn new(client: Arc<ConnectClient>) -> Self {
        RemoteCategoryRepository { client }
    }
}

#[async_trait]
impl centavo_core::categories::CategoryRepositoryTrait for RemoteCategoryRepository {
    /// Categories are a shared taxonomy, so the listing is not scoped to
    /// any user.
    async fn list_all(&self) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> = self
            .client
            .get_rows(
                TABLE,
                &[
                    ("select", "*".to_string()),
                    ("order", "name.asc".to_string()),
                ],
            )
            .await?;

        info!("[Connect] Fetched {} categories", rows.len());
        Ok(rows.into_iter().map(Category::from).collect())
    }
}
