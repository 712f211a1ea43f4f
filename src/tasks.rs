//! Owner-scoped task operations.
//!
//! Every method takes the owner id resolved by the auth gate. A task that does
//! not exist and a task owned by someone else produce the same `NotFound`.

use validator::Validate;

use crate::error::AppError;
use crate::models::{Task, TaskInput};
use crate::store::TaskStore;

const NOT_FOUND_OR_FORBIDDEN: &str = "Task not found or user not authorized";

#[derive(Clone)]
pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    pub async fn list(&self, owner_id: i64) -> Result<Vec<Task>, AppError> {
        self.store.list(owner_id).await
    }

    pub async fn create(&self, owner_id: i64, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;
        let task = self.store.create(owner_id, &input.description).await?;
        log::info!("user {} created task {}", owner_id, task.id);
        Ok(task)
    }

    pub async fn get(&self, owner_id: i64, task_id: i64) -> Result<Task, AppError> {
        self.store
            .find(owner_id, task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_OR_FORBIDDEN.into()))
    }

    pub async fn set_completed(
        &self,
        owner_id: i64,
        task_id: i64,
        completed: bool,
    ) -> Result<(), AppError> {
        if !self.store.set_completed(owner_id, task_id, completed).await? {
            return Err(AppError::NotFound(NOT_FOUND_OR_FORBIDDEN.into()));
        }
        log::info!(
            "user {} marked task {} completed={}",
            owner_id,
            task_id,
            completed
        );
        Ok(())
    }

    pub async fn delete(&self, owner_id: i64, task_id: i64) -> Result<(), AppError> {
        if !self.store.delete(owner_id, task_id).await? {
            return Err(AppError::NotFound(NOT_FOUND_OR_FORBIDDEN.into()));
        }
        log::info!("user {} deleted task {}", owner_id, task_id);
        Ok(())
    }
}
