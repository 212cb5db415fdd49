//! HTTP client for the hosted backend.
//!
//! All table repositories and the auth provider share one client so that
//! the access token set at sign-in is applied to every subsequent request.
//! Timeouts fall back to a fixed default; there is no retry or backoff
//! policy here.

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::RwLock;
use std::time::Duration;

use centavo_core::errors::{Error, RemoteError, Result};

use crate::config::ConnectConfig;

/// Default timeout for backend requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the project API key on every request.
const API_KEY_HEADER: &str = "apikey";

/// Asks the backend to return the persisted row for writes.
const PREFER_REPRESENTATION: &str = "return=representation";

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Shared HTTP client for the backend's REST and auth endpoint groups.
pub struct ConnectClient {
    client: reqwest::Client,
    base_url: String,
    anon_key_header: HeaderValue,
    access_token: RwLock<Option<String>>,
}

impl ConnectClient {
    pub fn new(config: ConnectConfig) -> Result<Self> {
        let anon_key_header = HeaderValue::from_str(&config.anon_key).map_err(|e| {
            Error::InvalidConfigValue(format!("anon key is not a valid header value: {}", e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                Error::Remote(RemoteError::RequestFailed(format!(
                    "Failed to initialize HTTP client: {}",
                    e
                )))
            })?;

        Ok(ConnectClient {
            client,
            base_url: config.base_url,
            anon_key_header,
            access_token: RwLock::new(None),
        })
    }

    /// Replaces the bearer token used for authenticated requests. Passing
    /// `None` falls back to the anonymous key.
    pub fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().unwrap() = token;
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.read().unwrap().clone()
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, self.anon_key_header.clone());

        // The session token when signed in, the anon key otherwise.
        let bearer = match self.access_token() {
            Some(token) => HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                Error::Remote(RemoteError::RequestFailed(format!(
                    "Invalid access token format: {}",
                    e
                )))
            })?,
            None => {
                let mut value = b"Bearer ".to_vec();
                value.extend_from_slice(self.anon_key_header.as_bytes());
                HeaderValue::from_bytes(&value).map_err(|e| {
                    Error::Remote(RemoteError::RequestFailed(format!(
                        "Invalid anon key format: {}",
                        e
                    )))
                })?
            }
        };
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Lists rows from a table. `query` carries the backend's filter
    /// operators (e.g. `("user_id", "eq.<id>")`, `("order", "date.desc")`).
    pub(crate) async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.rest_url(table);
        debug!("[Connect] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(query)
            .send()
            .await
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;

        parse_json(response).await
    }

    /// Inserts one row and returns the persisted record with its
    /// server-assigned fields.
    pub(crate) async fn insert_row<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.rest_url(table);
        debug!("[Connect] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;

        single_row(parse_json(response).await?, table)
    }

    /// Applies a partial update to the row with the given id and returns
    /// the full persisted record.
    pub(crate) async fn update_row<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.rest_url(table);
        debug!("[Connect] PATCH {} id={}", url, id);

        let response = self
            .client
            .patch(&url)
            .headers(self.headers()?)
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&[("id", format!("eq.{}", id))])
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;

        single_row(parse_json(response).await?, table)
    }

    /// Deletes the row with the given id.
    pub(crate) async fn delete_row(&self, table: &str, id: &str) -> Result<()> {
        let url = self.rest_url(table);
        debug!("[Connect] DELETE {} id={}", url, id);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers()?)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }
        Ok(())
    }

    /// Sends a request to the auth endpoint group and parses the response.
    pub(crate) async fn auth_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.auth_url(path);
        debug!("[Connect] {} {}", method, url);

        let mut request = self.client.request(method, &url).headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;

        parse_json(response).await
    }
}

fn single_row<T>(mut rows: Vec<T>, table: &str) -> Result<T> {
    if rows.is_empty() {
        return Err(RemoteError::NotFound(format!(
            "backend returned no row for write to '{}'",
            table
        ))
        .into());
    }
    Ok(rows.swap_remove(0))
}

/// Parses a response body, mining failed requests for a clean message.
async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RemoteError::RequestFailed(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        return Err(error_from_body(status, &body));
    }

    serde_json::from_str(&body)
        .map_err(|e| RemoteError::ParseFailed(format!("{} - {}", e, truncated(&body))).into())
}

fn error_from_body(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return RemoteError::Unauthorized.into();
    }
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|err| {
            err.message
                .or(err.msg)
                .or(err.error_description)
                .or(err.error)
        })
        .unwrap_or_else(|| truncated(body));
    RemoteError::Api {
        status: status.as_u16(),
        message,
    }
    .into()
}

fn truncated(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> ConnectClient {
        let config = ConnectConfig::new("https://backend.example.com/", "anon-key").unwrap();
        ConnectClient::new(config).unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = make_client();
        assert_eq!(
            client.rest_url("transactions"),
            "https://backend.example.com/rest/v1/transactions"
        );
        assert_eq!(
            client.auth_url("token?grant_type=password"),
            "https://backend.example.com/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn test_access_token_roundtrip() {
        let client = make_client();
        assert!(client.access_token().is_none());
        client.set_access_token(Some("jwt".to_string()));
        assert_eq!(client.access_token().as_deref(), Some("jwt"));
        client.set_access_token(None);
        assert!(client.access_token().is_none());
    }

    #[test]
    fn test_error_from_body_prefers_message_field() {
        let err = error_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"message":"violates check constraint"}"#,
        );
        assert_eq!(
            err.to_string(),
            "Remote operation failed: Backend rejected the request (400): violates check constraint"
        );
    }

    #[test]
    fn test_error_from_body_falls_back_to_raw_body() {
        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, "upstream timed out");
        assert!(err.to_string().contains("upstream timed out"));
    }

    #[test]
    fn test_unauthorized_maps_to_dedicated_variant() {
        let err = error_from_body(StatusCode::UNAUTHORIZED, "{}");
        assert!(matches!(
            err,
            Error::Remote(RemoteError::Unauthorized)
        ));
    }

    #[test]
    fn test_single_row_rejects_empty_representation() {
        let rows: Vec<i32> = Vec::new();
        assert!(single_row(rows, "goals").is_err());
        assert_eq!(single_row(vec![7], "goals").unwrap(), 7);
    }
}
