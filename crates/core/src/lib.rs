//! Centavo Core - Domain entities, services, and the finance state store.
//!
//! This crate contains the core business logic for Centavo.
//! It is transport-agnostic and defines traits that are implemented
//! by the `connect` crate against the hosted backend.

pub mod analytics;
pub mod auth;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod store;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
