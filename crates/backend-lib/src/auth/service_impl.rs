use std::sync::Arc;

use async_trait::async_trait;
use gatekeeper_common::{LoginForm, RegisterForm, User};
use metrics::counter;
use tracing::{info, warn};

use crate::auth::{AuthService, Hasher, SessionManager, SignedIn};
use crate::error::{AppError, CredentialFailure};
use crate::storage::{CredentialStore, NewUser};
use crate::validation::{validate_email, validate_name, validate_password};

/// Authentication over a credential store, a hasher and in-memory sessions
pub struct DefaultAuth {
    store: Arc<dyn CredentialStore>,
    sm: SessionManager,
    hasher: Hasher,
}

impl DefaultAuth {
    pub fn new(store: Arc<dyn CredentialStore>, sm: SessionManager, hasher: Hasher) -> Self {
        Self { store, sm, hasher }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn register(&self, form: RegisterForm) -> Result<SignedIn, AppError> {
        let RegisterForm {
            email,
            mut password,
            name,
        } = form;

        // a known email goes to the login page whatever else was submitted
        if self.store.find_by_email(&email).await?.is_some() {
            counter!(crate::metrics::AUTH_REGISTER_DUPLICATE).increment(1);
            warn!(%email, "registration rejected: email already registered");
            return Err(AppError::DuplicateEmail);
        }

        validate_email(&email)?;
        validate_password(&password)?;
        validate_name(&name)?;

        let hasher = self.hasher.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || hasher.hash_secure(&mut password)).await??;

        let user = match self
            .store
            .insert(NewUser::new(email, password_hash, name)?)
            .await
        {
            Ok(user) => user,
            Err(AppError::DuplicateEmail) => {
                counter!(crate::metrics::AUTH_REGISTER_DUPLICATE).increment(1);
                warn!("registration lost a race for the same email");
                return Err(AppError::DuplicateEmail);
            },
            Err(e) => return Err(e),
        };

        let token = self.sm.create(user.id).await;
        counter!(crate::metrics::AUTH_REGISTER).increment(1);
        info!(user_id = %user.id, "user registered");

        Ok(SignedIn { user, token })
    }

    async fn login(&self, form: LoginForm) -> Result<SignedIn, AppError> {
        let Some(user) = self.store.find_by_email(&form.email).await? else {
            counter!(crate::metrics::AUTH_LOGIN_FAILURE).increment(1);
            warn!(email = %form.email, "login failed: unknown email");
            return Err(AppError::InvalidCredentials(CredentialFailure::UnknownEmail));
        };

        let hasher = self.hasher.clone();
        let hash = user.password_hash.clone();
        let password = form.password;
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&hash, &password)).await?;

        if !matches {
            counter!(crate::metrics::AUTH_LOGIN_FAILURE).increment(1);
            warn!(user_id = %user.id, "login failed: wrong password");
            return Err(AppError::InvalidCredentials(CredentialFailure::WrongPassword));
        }

        let token = self.sm.create(user.id).await;
        counter!(crate::metrics::AUTH_LOGIN_SUCCESS).increment(1);
        info!(user_id = %user.id, "user logged in");

        Ok(SignedIn { user, token })
    }

    async fn identify(&self, token: &str) -> Result<Option<User>, AppError> {
        let Some(user_id) = self.sm.resolve(token).await else {
            return Ok(None);
        };

        let user = self.store.find_by_id(user_id).await?;
        if user.is_none() {
            // the session outlived its user record
            self.sm.destroy(token).await;
            warn!(%user_id, "dropping session for unknown user");
        }
        Ok(user)
    }

    async fn logout(&self, token: &str) -> bool {
        let ended = self.sm.destroy(token).await;
        if ended {
            counter!(crate::metrics::AUTH_LOGOUT).increment(1);
            info!("session ended");
        }
        ended
    }
}
