use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::User;

/// Stored in place of a bcrypt hash for accounts that must never log in.
/// bcrypt hashes always start with `$2`, so nothing can verify against it.
pub const LOCKED_PASSWORD_HASH: &str = "!locked";

/// Persistence for user accounts.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new account. The caller hashes the password beforehand.
    ///
    /// Returns `AppError::Conflict` when the username is already taken.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)
             RETURNING id, username, password_hash",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Username already exists".into())
            }
            other => other.into(),
        })
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Returns the account named `username`, creating it with a locked
    /// password if it does not exist yet.
    ///
    /// Fails with `AppError::Conflict` if the name belongs to an account that
    /// can log in; such an account is never adopted.
    pub async fn ensure_user(&self, username: &str) -> Result<User, AppError> {
        sqlx::query("INSERT OR IGNORE INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(LOCKED_PASSWORD_HASH)
            .execute(&self.pool)
            .await?;

        let user = self
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::InternalServerError(format!("user '{}' vanished", username)))?;

        if user.password_hash != LOCKED_PASSWORD_HASH {
            return Err(AppError::Conflict(format!(
                "user '{}' is a registered account",
                username
            )));
        }
        Ok(user)
    }
}
