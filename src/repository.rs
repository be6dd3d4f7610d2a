//!
//! # Task Repository
//!
//! All task persistence goes through [`TaskRepository`]. Every query is
//! filtered by the owning user's id in the statement itself, so a task that
//! belongs to someone else is indistinguishable from one that does not
//! exist: both come back as the same `NotFound`. Handlers never get a chance
//! to observe, update, or delete a row across the ownership boundary.

use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskUpdate};
use sqlx::PgPool;
use uuid::Uuid;

/// Data access for task records, scoped to an owner on every operation.
///
/// Holds the connection pool handed to it at startup; connections are
/// checked out per statement and returned to the pool on every exit path.
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new task owned by `owner_id` and returns the stored record.
    ///
    /// The id, timestamps, and owner are generated server-side; nothing in
    /// the input can override them.
    pub async fn create(&self, owner_id: Uuid, input: TaskInput) -> Result<Task, AppError> {
        let task = Task::new(input, owner_id);

        let stored = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, description, completed, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, description, completed, user_id, created_at, updated_at",
        )
        .bind(task.id)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.user_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Returns the owner's tasks, optionally restricted by completion state.
    pub async fn list(
        &self,
        owner_id: Uuid,
        completed: Option<bool>,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = if let Some(completed) = completed {
            sqlx::query_as::<_, Task>(
                "SELECT id, description, completed, user_id, created_at, updated_at
                 FROM tasks WHERE user_id = $1 AND completed = $2
                 ORDER BY created_at",
            )
            .bind(owner_id)
            .bind(completed)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Task>(
                "SELECT id, description, completed, user_id, created_at, updated_at
                 FROM tasks WHERE user_id = $1
                 ORDER BY created_at",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(tasks)
    }

    /// Fetches a single task by id, visible only to its owner.
    pub async fn find(&self, owner_id: Uuid, task_id: Uuid) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, description, completed, user_id, created_at, updated_at
             FROM tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        task.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Applies the provided fields to the owner's task; absent fields are
    /// left untouched. A single statement, so a cancelled request can never
    /// leave a half-applied edit behind.
    // TODO: bump updated_at here and in set_completed.
    pub async fn update(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        changes: &TaskUpdate,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET description = COALESCE($3, description),
                 completed = COALESCE($4, completed)
             WHERE id = $1 AND user_id = $2
             RETURNING id, description, completed, user_id, created_at, updated_at",
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(changes.description.as_deref())
        .bind(changes.completed)
        .fetch_optional(&self.pool)
        .await?;

        task.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Sets the completion flag on the owner's task.
    pub async fn set_completed(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET completed = $3
             WHERE id = $1 AND user_id = $2
             RETURNING id, description, completed, user_id, created_at, updated_at",
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?;

        task.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Deletes the owner's task.
    pub async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }

        Ok(())
    }
}
