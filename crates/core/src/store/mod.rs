//! Finance state store - the application's single source of UI truth.
//!
//! Remote CRUD is write-through: a record appears in (or disappears from)
//! local state only after the backend confirms the operation.

mod store_model;
mod store_service;

pub use store_model::{FinanceAction, FinanceState};
pub use store_service::FinanceStore;
