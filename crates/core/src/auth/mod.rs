//! Auth module - session models, provider trait, and the session service.
//!
//! Protocol internals (token issuance, refresh, storage) are delegated to
//! the backend; this module only tracks who is signed in and lets the rest
//! of the application react to session changes.

mod auth_model;
mod auth_service;
mod auth_traits;

pub use auth_model::UserSession;
pub use auth_service::AuthService;
pub use auth_traits::AuthProviderTrait;
