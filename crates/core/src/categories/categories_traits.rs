use async_trait::async_trait;

use super::categories_model::Category;
use crate::errors::Result;

/// Trait for the shared category collection.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Lists all categories, ordered by name. No user scoping.
    async fn list_all(&self) -> Result<Vec<Category>>;
}

/// Trait for category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn get_categories(&self) -> Result<Vec<Category>>;
}
