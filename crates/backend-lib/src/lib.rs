// ============================
// gatekeeper-backend-lib/src/lib.rs
// ============================
//! Core backend functionality for the `Gatekeeper` web application.

pub mod auth;
pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod validation;
pub mod views;

use std::sync::Arc;

use crate::auth::{AuthService, DefaultAuth, Hasher, SessionManager};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::{CredentialStore, SqliteCredentialStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Credential store
    pub store: Arc<dyn CredentialStore>,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state over an existing store
    pub fn new(store: Arc<dyn CredentialStore>, settings: Settings) -> Result<Self, AppError> {
        let hasher = Hasher::new(settings.password.scrypt_log_n)?;
        let auth: Arc<dyn AuthService> = Arc::new(DefaultAuth::new(
            store.clone(),
            SessionManager::new(),
            hasher,
        ));

        Ok(Self {
            auth,
            store,
            settings: Arc::new(settings),
        })
    }

    /// Open the SQLite store named in `settings` and build the state on it
    pub fn open(settings: Settings) -> Result<Self, AppError> {
        let store = Arc::new(SqliteCredentialStore::open(
            &settings.storage.database_path,
        )?);
        Self::new(store, settings)
    }
}
