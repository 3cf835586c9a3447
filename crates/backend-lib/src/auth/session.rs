// ============================
// gatekeeper-backend-lib/src/auth/session.rs
// ============================
//! Session token handling and management.
use std::{collections::HashMap, sync::Arc};

use axum_extra::extract::cookie::{Cookie, SameSite};
use gatekeeper_common::UserId;
use metrics::gauge;
use tokio::sync::RwLock;

use super::token_generator::generate_secure_token;
use crate::config::SessionSettings;

/// Session manager mapping opaque tokens to authenticated users.
///
/// Sessions have no expiry: they live until [`SessionManager::destroy`] is
/// called or the client drops its cookie.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, UserId>>>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an authenticated session for `user_id` and return its token
    pub async fn create(&self, user_id: UserId) -> String {
        let token = generate_secure_token();

        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), user_id);
        gauge!(crate::metrics::SESSION_ACTIVE).set(sessions.len() as f64);

        token
    }

    /// User behind a token, if the session is live
    pub async fn resolve(&self, token: &str) -> Option<UserId> {
        let sessions = self.sessions.read().await;
        sessions.get(token).copied()
    }

    /// End a session; returns whether it existed
    pub async fn destroy(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(token).is_some();
        gauge!(crate::metrics::SESSION_ACTIVE).set(sessions.len() as f64);
        removed
    }

    /// Number of live sessions
    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Cookie carrying `token`; no `Max-Age`, so it ends with the browser session
pub fn session_cookie(settings: &SessionSettings, token: String) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(settings.secure_cookie)
        .same_site(SameSite::Lax)
        .build()
}

/// Removal cookie matching [`session_cookie`]
pub fn clear_session_cookie(settings: &SessionSettings) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), ""))
        .path("/")
        .build()
}
