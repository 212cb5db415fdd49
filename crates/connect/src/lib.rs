//! Centavo Connect - Remote data gateway for the hosted backend.
//!
//! This crate implements the repository and auth traits from
//! `centavo-core` over the backend's table CRUD and auth endpoint groups.
//! It is a thin passthrough: no business logic, no retries, no caching.

pub mod auth;
pub mod categories;
pub mod client;
pub mod config;
pub mod goals;
pub mod transactions;

use std::sync::Arc;

use centavo_core::errors::Result;

// Re-export commonly used types
pub use auth::RemoteAuthProvider;
pub use categories::RemoteCategoryRepository;
pub use client::ConnectClient;
pub use config::{ConnectConfig, ENV_BACKEND_ANON_KEY, ENV_BACKEND_URL};
pub use goals::RemoteGoalRepository;
pub use transactions::RemoteTransactionRepository;

/// Bundle of every remote collaborator, sharing one HTTP client so the
/// auth provider's token is visible to the table repositories.
pub struct ConnectGateway {
    pub client: Arc<ConnectClient>,
    pub transactions: Arc<RemoteTransactionRepository>,
    pub goals: Arc<RemoteGoalRepository>,
    pub categories: Arc<RemoteCategoryRepository>,
    pub auth: Arc<RemoteAuthProvider>,
}

impl ConnectGateway {
    pub fn new(config: ConnectConfig) -> Result<Self> {
        let client = Arc::new(ConnectClient::new(config)?);
        Ok(ConnectGateway {
            transactions: Arc::new(RemoteTransactionRepository::new(client.clone())),
            goals: Arc::new(RemoteGoalRepository::new(client.clone())),
            categories: Arc::new(RemoteCategoryRepository::new(client.clone())),
            auth: Arc::new(RemoteAuthProvider::new(client.clone())),
            client,
        })
    }

    /// Builds the gateway from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(ConnectConfig::from_env()?)
    }
}
