//! Connection pool and schema setup for the SQLite store.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppError;

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
)";

const CREATE_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0,
    owner_id INTEGER NOT NULL REFERENCES users(id)
)";

const CREATE_TASKS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_owner_id ON tasks(owner_id)";

/// Opens a pool for `database_url`, creating the database file if needed.
///
/// An in-memory database only lives as long as its connection, so it is pinned
/// to exactly one connection that is never recycled.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

/// Creates the tables if they do not exist yet. Safe to run on every start.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    for statement in [CREATE_USERS, CREATE_TASKS, CREATE_TASKS_OWNER_INDEX] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
