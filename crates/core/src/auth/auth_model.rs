//! Auth domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated backend session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    /// Bearer token for authenticated backend calls. Opaque to this crate.
    #[serde(skip_serializing)]
    pub access_token: String,
    pub created_at: DateTime<Utc>,
}
