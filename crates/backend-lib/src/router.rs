// ============================
// gatekeeper-backend-lib/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{account, protected};
use crate::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(account::home))
        .route(
            "/register",
            get(account::register_form).post(account::register_submit),
        )
        .route("/login", get(account::login_form).post(account::login_submit))
        .route("/secrets", get(protected::secrets))
        .route("/logout", get(protected::logout))
        .route("/download", get(protected::download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
