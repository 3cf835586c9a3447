use async_trait::async_trait;
use gatekeeper_common::{LoginForm, RegisterForm, User};

use crate::error::AppError;

/// Outcome of a successful registration or login
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    /// Token of the freshly created session
    pub token: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create the account and an authenticated session for it
    async fn register(&self, form: RegisterForm) -> Result<SignedIn, AppError>;
    /// Check credentials and create an authenticated session
    async fn login(&self, form: LoginForm) -> Result<SignedIn, AppError>;
    /// User behind a session token; `None` means anonymous
    async fn identify(&self, token: &str) -> Result<Option<User>, AppError>;
    /// End a session; returns whether it existed
    async fn logout(&self, token: &str) -> bool;
}
