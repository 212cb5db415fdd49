use async_trait::async_trait;

use super::auth_model::UserSession;
use crate::errors::Result;

/// Trait for the backend's auth endpoint group.
#[async_trait]
pub trait AuthProviderTrait: Send + Sync {
    /// Signs in with email and password, returning the new session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession>;

    /// Registers a new account, returning its session.
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserSession>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<()>;

    /// Returns the currently authenticated session, if any.
    async fn current_session(&self) -> Result<Option<UserSession>>;
}
