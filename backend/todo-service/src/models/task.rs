use chrono::{DateTime, Utc};
/// Task model
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    pub id: i64,
    #[serde(skip)]
    pub owner_id: i64,
    pub task_name: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Apply field changes in place, keeping `completed_at` in step with `is_completed`
    pub fn apply(&mut self, changes: TaskChanges, now: DateTime<Utc>) {
        if let Some(task_name) = changes.task_name {
            self.task_name = task_name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(is_completed) = changes.is_completed {
            self.is_completed = is_completed;
            self.completed_at = match (is_completed, self.completed_at) {
                (true, Some(stamped)) => Some(stamped),
                (true, None) => Some(now),
                (false, _) => None,
            };
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "task_name must not be empty"))]
    pub task_name: String,
    pub description: Option<String>,
}

/// Full replacement (PUT)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "task_name must not be empty"))]
    pub task_name: String,
    pub description: Option<String>,
    pub is_completed: bool,
}

/// Partial update (PATCH). Absent fields are left alone; an explicit
/// `"description": null` clears the description.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchTaskRequest {
    #[validate(length(min = 1, message = "task_name must not be empty"))]
    pub task_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub is_completed: Option<bool>,
}

/// Wrap a present field (even `null`) in `Some`; absence falls back to `default`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Store-level change set. `description: Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub task_name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_completed: Option<bool>,
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            task_name: Some(req.task_name),
            description: Some(req.description),
            is_completed: Some(req.is_completed),
        }
    }
}

impl From<PatchTaskRequest> for TaskChanges {
    fn from(req: PatchTaskRequest) -> Self {
        Self {
            task_name: req.task_name,
            description: req.description,
            is_completed: req.is_completed,
        }
    }
}
