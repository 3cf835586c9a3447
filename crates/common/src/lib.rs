// ================
// common/src/lib.rs
// ================
//! Common types shared by the `Gatekeeper` backend crates.
//! This module defines the user record, the form payloads submitted by the
//! browser and the user-facing messages the handlers render.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier assigned to a user by the credential store
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user as stored in the `users` table
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Login email, unique and case-sensitive as stored
    pub email: String,
    /// Opaque PHC hash string
    pub password_hash: String,
    /// Name shown on the secrets page
    pub display_name: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Body of `POST /register`
#[derive(Deserialize, Clone)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Body of `POST /login`
#[derive(Deserialize, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Messages shown to the browser
pub mod messages {
    pub const ALREADY_REGISTERED: &str =
        "You've already signed up with this email, log in instead!";
    pub const UNKNOWN_EMAIL: &str = "That email does not exist, please try again.";
    pub const WRONG_PASSWORD: &str = "Password is incorrect, please try again.";
    pub const LOGGED_IN: &str = "You were successfully logged in!";
    pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_debug_hides_password_hash() {
        let user = User {
            id: UserId(7),
            email: "a@x.com".to_string(),
            password_hash: "$scrypt$ln=17,r=8,p=1$c2FsdA$aGFzaA".to_string(),
            display_name: "A".to_string(),
        };
        let rendered = format!("{user:?}");
        assert!(rendered.contains("a@x.com"));
        assert!(!rendered.contains("scrypt"));
    }

    #[test]
    fn forms_hide_passwords_in_debug() {
        let form: RegisterForm = serde_json::from_str(
            r#"{"email":"a@x.com","password":"hunter2","name":"A"}"#,
        )
        .unwrap();
        assert_eq!(form.name, "A");
        assert!(!format!("{form:?}").contains("hunter2"));

        let login: LoginForm =
            serde_json::from_str(r#"{"email":"a@x.com","password":"hunter2"}"#).unwrap();
        assert!(!format!("{login:?}").contains("hunter2"));
    }

    #[test]
    fn user_id_is_transparent() {
        assert_eq!(serde_json::to_string(&UserId(42)).unwrap(), "42");
        assert_eq!(UserId(42).to_string(), "42");
    }
}
