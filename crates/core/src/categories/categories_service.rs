use log::debug;
use std::sync::Arc;

use super::categories_model::Category;
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

/// Service for reading the shared category taxonomy.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn get_categories(&self) -> Result<Vec<Category>> {
        debug!("Loading category taxonomy");
        self.repository.list_all().await
    }
}
