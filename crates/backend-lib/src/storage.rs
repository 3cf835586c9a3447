// ============================
// gatekeeper-backend-lib/src/storage.rs
// ============================
//! Credential store abstraction with a SQLite implementation.
//!
//! One table:
//! - `users`: id, email (unique), password_hash, name
use std::path::Path;

use async_trait::async_trait;
use gatekeeper_common::{User, UserId};
use parking_lot::Mutex;
use rusqlite::OptionalExtension;

use crate::error::AppError;
use crate::validation::{validate_email, validate_name};

/// A user record that has passed validation but has no id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: String,
    password_hash: String,
    display_name: String,
}

impl NewUser {
    /// Build a record for insertion, rejecting empty fields
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, AppError> {
        let email = email.into();
        let password_hash = password_hash.into();
        let display_name = display_name.into();

        validate_email(&email)?;
        validate_name(&display_name)?;
        if password_hash.is_empty() {
            return Err(AppError::InvalidInput(
                "Password hash cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            email,
            password_hash,
            display_name,
        })
    }
}

/// Trait for credential store backends
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look a user up by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Look a user up by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// Insert a new user, failing with [`AppError::DuplicateEmail`] if the email is taken
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// Number of stored users
    async fn count(&self) -> Result<u64, AppError>;
}

/// SQLite implementation of the CredentialStore trait
pub struct SqliteCredentialStore {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteCredentialStore {
    /// Open (or create) the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = rusqlite::Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Self::with_connection(conn)
    }

    /// Private in-memory database
    pub fn open_in_memory() -> Result<Self, AppError> {
        Self::with_connection(rusqlite::Connection::open_in_memory()?)
    }

    fn with_connection(conn: rusqlite::Connection) -> Result<Self, AppError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL
            );",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Write the row; a taken email surfaces as [`AppError::DuplicateEmail`]
    fn insert_row(&self, user: NewUser) -> Result<User, AppError> {
        let conn = self.conn.lock();
        let result = conn.execute(
            "INSERT INTO users (email, password_hash, name) VALUES (?1, ?2, ?3)",
            rusqlite::params![user.email, user.password_hash, user.display_name],
        );

        match result {
            Ok(_) => Ok(User {
                id: UserId(conn.last_insert_rowid()),
                email: user.email,
                password_hash: user.password_hash,
                display_name: user.display_name,
            }),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(AppError::DuplicateEmail)
            },
            Err(e) => Err(e.into()),
        }
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId(row.get(0)?),
        email: row.get(1)?,
        password_hash: row.get(2)?,
        display_name: row.get(3)?,
    })
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let conn = self.conn.lock();
        let user = conn
            .query_row(
                "SELECT id, email, password_hash, name FROM users WHERE email = ?1",
                rusqlite::params![email],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let conn = self.conn.lock();
        let user = conn
            .query_row(
                "SELECT id, email, password_hash, name FROM users WHERE id = ?1",
                rusqlite::params![id.0],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        // The check and the insert lock separately; a concurrent duplicate
        // that slips between them is caught by the UNIQUE constraint.
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        self.insert_row(user)
    }

    async fn count(&self) -> Result<u64, AppError> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
