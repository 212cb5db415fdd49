use log::{debug, info};
use std::sync::Arc;
use tokio::sync::watch;

use super::auth_model::UserSession;
use super::auth_traits::AuthProviderTrait;
use crate::errors::{Result, ValidationError};

/// Service tracking the authenticated session.
///
/// Wraps the backend auth provider with client-side form validation and
/// publishes session changes on a watch channel so the store can load or
/// clear its collections when the user signs in or out.
pub struct AuthService {
    provider: Arc<dyn AuthProviderTrait>,
    session_tx: watch::Sender<Option<UserSession>>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn AuthProviderTrait>) -> Self {
        let (session_tx, _) = watch::channel(None);
        AuthService {
            provider,
            session_tx,
        }
    }

    /// Subscribes to session changes. The receiver yields the current
    /// session immediately and on every sign-in/sign-out thereafter.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserSession>> {
        self.session_tx.subscribe()
    }

    /// The session currently published to subscribers, if any.
    pub fn session(&self) -> Option<UserSession> {
        self.session_tx.borrow().clone()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession> {
        validate_credentials(email, password)?;
        let session = self.provider.sign_in(email, password).await?;
        info!("Signed in as {}", session.email);
        self.session_tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Registers a new account. The password confirmation is checked
    /// client-side before the backend is contacted.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<UserSession> {
        validate_credentials(email, password)?;
        if password != password_confirmation {
            return Err(ValidationError::InvalidInput(
                "password confirmation does not match".to_string(),
            )
            .into());
        }
        let session = self.provider.sign_up(email, password).await?;
        info!("Registered account for {}", session.email);
        self.session_tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.provider.sign_out().await?;
        debug!("Signed out");
        self.session_tx.send_replace(None);
        Ok(())
    }

    /// Re-publishes the backend's current session, e.g. after a restart
    /// when the provider still holds a valid token.
    pub async fn restore_session(&self) -> Result<Option<UserSession>> {
        let session = self.provider.current_session().await?;
        self.session_tx.send_replace(session.clone());
        Ok(session)
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingField("email".to_string()).into());
    }
    if password.is_empty() {
        return Err(ValidationError::MissingField("password".to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new() -> Self {
            FakeProvider {
                calls: AtomicUsize::new(0),
            }
        }

        fn session_for(email: &str) -> UserSession {
            UserSession {
                user_id: "user-1".to_string(),
                email: email.to_string(),
                access_token: "token".to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            }
        }
    }

    #[async_trait]
    impl AuthProviderTrait for FakeProvider {
        async fn sign_in(&self, email: &str, _password: &str) -> Result<UserSession> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Self::session_for(email))
        }

        async fn sign_up(&self, email: &str, _password: &str) -> Result<UserSession> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Self::session_for(email))
        }

        async fn sign_out(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn current_session(&self) -> Result<Option<UserSession>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_sign_in_publishes_session() {
        let service = AuthService::new(Arc::new(FakeProvider::new()));
        let rx = service.subscribe();
        assert!(rx.borrow().is_none());

        service.sign_in("a@b.com", "secret").await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().email, "a@b.com");
        assert_eq!(service.session().unwrap().email, "a@b.com");
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let service = AuthService::new(Arc::new(FakeProvider::new()));
        service.sign_in("a@b.com", "secret").await.unwrap();
        service.sign_out().await.unwrap();
        assert!(service.session().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_mismatch_never_reaches_provider() {
        let provider = Arc::new(FakeProvider::new());
        let service = AuthService::new(provider.clone());

        let result = service.sign_up("a@b.com", "secret", "secre").await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(service.session().is_none());
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let provider = Arc::new(FakeProvider::new());
        let service = AuthService::new(provider.clone());

        assert!(service.sign_in("", "secret").await.is_err());
        assert!(service.sign_in("a@b.com", "").await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
