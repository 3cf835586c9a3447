// ============================
// gatekeeper-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod identity;
pub mod password;
pub mod session;
pub mod token_generator;
mod service;
mod service_impl;

pub use identity::{Identity, RequireUser};
pub use password::Hasher;
pub use session::{clear_session_cookie, session_cookie, SessionManager};
pub use service::{AuthService, SignedIn};
pub use service_impl::DefaultAuth;
