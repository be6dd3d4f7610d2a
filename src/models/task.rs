use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a task.
///
/// The owning user is never taken from the payload; it always comes from the
/// authenticated caller. Unknown fields (such as a client-supplied `user_id`)
/// are ignored during deserialization.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// What the task is about. Must not be empty.
    #[validate(length(min = 1))]
    pub description: String,

    /// Completion flag; defaults to `false` when omitted.
    #[serde(default)]
    pub completed: bool,
}

/// Partial update payload for a task.
///
/// Absent fields leave the stored value untouched. The completion endpoint
/// reuses this shape but requires `completed` to be present.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    /// Replacement description. Must not be empty when provided.
    #[validate(length(min = 1))]
    pub description: Option<String>,

    /// Replacement completion flag.
    pub completed: Option<bool>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4), generated at creation.
    pub id: Uuid,
    /// What the task is about.
    pub description: String,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Identifier of the user who owns the task. Set once at creation from
    /// the authenticated caller and never changed by updates.
    pub user_id: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Represents query parameters for filtering tasks when listing them.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Filter tasks by completion status. (Listing is already scoped to the
    /// authenticated user.)
    pub completed: Option<bool>,
}

impl Task {
    /// Creates a new `Task` instance from `TaskInput` and the owner's id.
    /// Sets `created_at` and `updated_at` to the current time and `id` to a
    /// fresh UUID.
    pub fn new(input: TaskInput, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            description: input.description,
            completed: input.completed,
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}
