// ============================
// crates/backend-lib/src/handlers/account.rs
// ============================
//! Public pages: landing, registration and login.
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use gatekeeper_common::{messages, LoginForm, RegisterForm};

use crate::auth::{session_cookie, Identity, SignedIn};
use crate::error::AppError;
use crate::{flash, views, AppState};

/// `GET /`
pub async fn home(identity: Identity, jar: CookieJar) -> impl IntoResponse {
    let (jar, message) = flash::take(jar);
    (jar, views::home(identity.is_authenticated(), message.as_deref()))
}

/// `GET /register`
pub async fn register_form(identity: Identity, jar: CookieJar) -> impl IntoResponse {
    let (jar, message) = flash::take(jar);
    (
        jar,
        views::register(identity.is_authenticated(), message.as_deref(), None),
    )
}

/// `POST /register`
pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    match state.auth.register(form).await {
        Ok(signed_in) => Ok(sign_in(&state, identity, jar, signed_in, None).await),
        Err(AppError::DuplicateEmail) => {
            let jar = flash::set(jar, messages::ALREADY_REGISTERED);
            Ok((jar, Redirect::to("/login")).into_response())
        },
        Err(AppError::InvalidInput(reason)) => {
            let (jar, message) = flash::take(jar);
            let page = views::register(
                identity.is_authenticated(),
                message.as_deref(),
                Some(reason.as_str()),
            );
            Ok((StatusCode::BAD_REQUEST, jar, page).into_response())
        },
        Err(e) => Err(e),
    }
}

/// `GET /login`
pub async fn login_form(identity: Identity, jar: CookieJar) -> impl IntoResponse {
    let (jar, message) = flash::take(jar);
    (
        jar,
        views::login(identity.is_authenticated(), message.as_deref(), None),
    )
}

/// `POST /login`
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth.login(form).await {
        Ok(signed_in) => {
            Ok(sign_in(&state, identity, jar, signed_in, Some(messages::LOGGED_IN)).await)
        },
        Err(AppError::InvalidCredentials(failure)) => {
            // the form is shown again; the session is left as it was
            let (jar, message) = flash::take(jar);
            let page = views::login(
                identity.is_authenticated(),
                message.as_deref(),
                Some(failure.message()),
            );
            Ok((jar, page).into_response())
        },
        Err(e) => Err(e),
    }
}

/// Swap any previous session for the new one and go to the secrets page
async fn sign_in(
    state: &AppState,
    previous: Identity,
    jar: CookieJar,
    signed_in: SignedIn,
    notice: Option<&str>,
) -> Response {
    if let Some(old) = previous.token() {
        state.auth.logout(old).await;
    }

    let mut jar = jar.add(session_cookie(&state.settings.session, signed_in.token));
    if let Some(notice) = notice {
        jar = flash::set(jar, notice);
    }
    (jar, Redirect::to("/secrets")).into_response()
}
