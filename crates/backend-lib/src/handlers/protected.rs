// ============================
// crates/backend-lib/src/handlers/protected.rs
// ============================
//! Routes that require an authenticated session.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::auth::{clear_session_cookie, RequireUser};
use crate::{flash, views, AppState};

/// `GET /secrets`
pub async fn secrets(RequireUser { user, .. }: RequireUser, jar: CookieJar) -> impl IntoResponse {
    let (jar, message) = flash::take(jar);
    (jar, views::secrets(&user.display_name, message.as_deref()))
}

/// `GET /logout`
pub async fn logout(
    State(state): State<Arc<AppState>>,
    RequireUser { user, token }: RequireUser,
    jar: CookieJar,
) -> impl IntoResponse {
    state.auth.logout(&token).await;
    tracing::debug!(user_id = %user.id, "logged out");

    let jar = jar.remove(clear_session_cookie(&state.settings.session));
    (jar, Redirect::to("/"))
}

/// `GET /download`
pub async fn download(
    State(state): State<Arc<AppState>>,
    RequireUser { user, .. }: RequireUser,
    request: Request,
) -> Response {
    let path = state.settings.download_path();
    tracing::debug!(user_id = %user.id, path = %path.display(), "serving download");

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
