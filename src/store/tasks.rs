use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::Task;

/// Persistence for tasks. Every statement is filtered by `owner_id`, so a row
/// owned by someone else behaves exactly like a row that does not exist.
#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Round trip to the database; used by the health check.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// All tasks of `owner_id`, oldest first.
    pub async fn list(&self, owner_id: i64) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, description, completed, owner_id FROM tasks
             WHERE owner_id = ? ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn create(&self, owner_id: i64, description: &str) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (description, completed, owner_id) VALUES (?, FALSE, ?)
             RETURNING id, description, completed, owner_id",
        )
        .bind(description)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    pub async fn find(&self, owner_id: i64, task_id: i64) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, description, completed, owner_id FROM tasks
             WHERE id = ? AND owner_id = ?",
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    /// Returns whether a row was updated.
    pub async fn set_completed(
        &self,
        owner_id: i64,
        task_id: i64,
        completed: bool,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE tasks SET completed = ? WHERE id = ? AND owner_id = ?")
            .bind(completed)
            .bind(task_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns whether a row was deleted.
    pub async fn delete(&self, owner_id: i64, task_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND owner_id = ?")
            .bind(task_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
