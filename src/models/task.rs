use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Store-assigned identifier, increasing with creation order.
    pub id: i64,
    /// What needs doing. Never changes after creation.
    pub description: String,
    /// Whether the task has been done.
    pub completed: bool,
    /// Identifier of the user who owns the task.
    pub owner_id: i64,
}

/// Body of `POST /tasks`.
///
/// A missing `description` deserializes to the empty string so that it fails
/// validation with the same message as an explicitly empty one.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Body of `PUT /tasks/{id}`.
///
/// `completed` must be a JSON boolean. A value of another type is rejected while
/// deserializing; an absent one is reported by [`TaskCompletion::completed`].
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskCompletion {
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TaskCompletion {
    pub fn completed(&self) -> Result<bool, AppError> {
        self.completed
            .ok_or_else(|| AppError::ValidationError("Completed status is required".into()))
    }
}
