//! Per-request identity, resolved from the session cookie.
//!
//! Handlers take [`Identity`] or [`RequireUser`] as arguments instead of
//! consulting any ambient "current user".
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use gatekeeper_common::User;
use metrics::counter;

use crate::{error::AppError, AppState};

/// Who is making the request
#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    Authenticated { user: User, token: String },
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }

    /// Session token, if the request carried a live one
    pub fn token(&self) -> Option<&str> {
        match self {
            Identity::Authenticated { token, .. } => Some(token),
            Identity::Anonymous => None,
        }
    }
}

impl FromRequestParts<Arc<AppState>> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar
            .get(&state.settings.session.cookie_name)
            .map(|c| c.value().to_owned())
        else {
            return Ok(Identity::Anonymous);
        };

        Ok(match state.auth.identify(&token).await? {
            Some(user) => Identity::Authenticated { user, token },
            None => Identity::Anonymous,
        })
    }
}

/// Extractor for protected routes; anonymous requests are sent to `/login`
#[derive(Debug, Clone)]
pub struct RequireUser {
    pub user: User,
    pub token: String,
}

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match Identity::from_request_parts(parts, state).await? {
            Identity::Authenticated { user, token } => Ok(RequireUser { user, token }),
            Identity::Anonymous => {
                counter!(crate::metrics::AUTH_UNAUTHORIZED).increment(1);
                tracing::debug!(path = %parts.uri.path(), "anonymous request to protected route");
                Err(AppError::Unauthorized)
            },
        }
    }
}
