//! Auth provider backed by the backend's auth endpoint group.
//!
//! Successful sign-in and sign-up install the session's access token on
//! the shared client, so every subsequent table request runs as that user.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use centavo_core::auth::{AuthProviderTrait, UserSession};
use centavo_core::errors::{Error, RemoteError, Result};

use crate::client::ConnectClient;

const PATH_PASSWORD_SIGN_IN: &str = "token?grant_type=password";
const PATH_SIGN_UP: &str = "signup";
const PATH_SIGN_OUT: &str = "logout";
const PATH_CURRENT_USER: &str = "user";

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUserRow {
    id: String,
    #[serde(default)]
    email: Option<String>,
    created_at: DateTime<Utc>,
}

/// Response of the token and signup endpoints. Both fields are optional:
/// a project that requires email confirmation answers sign-up with a user
/// but no token.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<AuthUserRow>,
}

fn session_from_response(response: SessionResponse) -> Option<UserSession> {
    let token = response.access_token?;
    let user = response.user?;
    Some(UserSession {
        user_id: user.id,
        email: user.email.unwrap_or_default(),
        access_token: token,
        created_at: user.created_at,
    })
}

pub struct RemoteAuthProvider {
    client: Arc<ConnectClient>,
}

impl RemoteAuthProvider {
    pub fn new(client: Arc<ConnectClient>) -> Self {
        RemoteAuthProvider { client }
    }
}

#[async_trait]
impl AuthProviderTrait for RemoteAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession> {
        let body = CredentialsBody { email, password };
        let response: SessionResponse = self
            .client
            .auth_request(Method::POST, PATH_PASSWORD_SIGN_IN, Some(&body))
            .await?;

        let session = session_from_response(response)
            .ok_or_else(|| Error::Auth("Sign-in response carried no session".to_string()))?;

        self.client.set_access_token(Some(session.access_token.clone()));
        info!("[Connect] Signed in as {}", session.user_id);
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserSession> {
        let body = CredentialsBody { email, password };
        let response: SessionResponse = self
            .client
            .auth_request(Method::POST, PATH_SIGN_UP, Some(&body))
            .await?;

        let session = session_from_response(response).ok_or_else(|| {
            Error::Auth(
                "Sign-up succeeded but no session was returned; confirm the account and sign in"
                    .to_string(),
            )
        })?;

        self.client.set_access_token(Some(session.access_token.clone()));
        info!("[Connect] Registered {}", session.user_id);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        if self.client.access_token().is_none() {
            debug!("[Connect] Sign-out with no active session");
            return Ok(());
        }

        let result: Result<serde_json::Value> = self
            .client
            .auth_request(Method::POST, PATH_SIGN_OUT, None::<&()>)
            .await;

        // The token is dropped locally regardless; a revoked or expired
        // token failing the logout call must not keep the session alive.
        self.client.set_access_token(None);
        match result {
            Ok(_) => Ok(()),
            Err(Error::Remote(RemoteError::Unauthorized)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn current_session(&self) -> Result<Option<UserSession>> {
        let Some(token) = self.client.access_token() else {
            return Ok(None);
        };

        let user: AuthUserRow = match self
            .client
            .auth_request(Method::GET, PATH_CURRENT_USER, None::<&()>)
            .await
        {
            Ok(user) => user,
            Err(Error::Remote(RemoteError::Unauthorized)) => {
                self.client.set_access_token(None);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(Some(UserSession {
            user_id: user.id,
            email: user.email.unwrap_or_default(),
            access_token: token,
            created_at: user.created_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_response_with_token_and_user() {
        let response: SessionResponse = serde_json::from_str(
            r#"{
                "access_token": "jwt-token",
                "token_type": "bearer",
                "user": {
                    "id": "u-1",
                    "email": "ana@example.com",
                    "created_at": "2025-03-01T12:00:00Z"
                }
            }"#,
        )
        .unwrap();

        let session = session_from_response(response).unwrap();
        assert_eq!(session.user_id, "u-1");
        assert_eq!(session.email, "ana@example.com");
        assert_eq!(session.access_token, "jwt-token");
    }

    #[test]
    fn test_confirmation_pending_response_yields_no_session() {
        // Sign-up under mandatory email confirmation returns the user
        // without a token.
        let response: SessionResponse = serde_json::from_str(
            r#"{
                "user": {
                    "id": "u-2",
                    "email": "new@example.com",
                    "created_at": "2025-03-02T09:00:00Z"
                }
            }"#,
        )
        .unwrap();

        assert!(session_from_response(response).is_none());
    }

    #[test]
    fn test_missing_email_defaults_to_empty() {
        let response: SessionResponse = serde_json::from_str(
            r#"{
                "access_token": "jwt",
                "user": {"id": "u-3", "created_at": "2025-03-01T12:00:00Z"}
            }"#,
        )
        .unwrap();

        let session = session_from_response(response).unwrap();
        assert_eq!(session.email, "");
    }
}
