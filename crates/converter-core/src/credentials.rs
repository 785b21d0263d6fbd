//! Local user accounts: registration and login checks.

use crate::db::Database;
use crate::error::Result;
use crate::password::{self, PasswordScheme};
use rusqlite::{params, ErrorCode, OptionalExtension};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct CredentialStore {
    db: Database,
    scheme: PasswordScheme,
}

impl CredentialStore {
    pub fn new(db: Database, scheme: PasswordScheme) -> Self {
        Self { db, scheme }
    }

    /// Create a user. Returns `Ok(false)` when the username is already taken;
    /// the existing row is left untouched.
    pub fn register(&self, username: &str, password: &str) -> Result<bool> {
        let hash = password::hash_password(self.scheme, password)?;
        let conn = self.db.connect()?;
        match conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, hash],
        ) {
            Ok(_) => {
                info!(username, "registered user");
                Ok(true)
            }
            Err(e) if is_constraint_violation(&e) => {
                warn!(username, "registration rejected: username exists");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// `true` iff the user exists and the password matches. An unknown user
    /// and a wrong password both yield `false`.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        let stored: Option<String> = conn
            .query_row(
                "SELECT password FROM users WHERE username = ?1",
                params![username],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten();

        let ok = match stored {
            Some(hash) => password::verify_password(password, &hash)?,
            None => false,
        };
        if !ok {
            warn!(username, "login failed");
        }
        Ok(ok)
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}
