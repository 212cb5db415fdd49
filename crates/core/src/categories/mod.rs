//! Categories module - shared reference data for classifying transactions.

mod categories_model;
mod categories_service;
mod categories_traits;

pub use categories_model::{Category, CategoryKind};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
