use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{create_task_request::CreateTaskRequest, update_task_request::TaskPatch};

use super::{task_priority::TaskPriority, task_status::TaskStatus};

/// Opaque task identifier. Generated ids are UUID v4 text; seeded tasks
/// carry hand-picked ids such as `task-001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card on the board.
///
/// `id` and `created_at` are fixed at creation; [`Task::edit`] never touches them.
/// No field is skipped on serialization: the redb save file encodes tasks with
/// postcard, which needs every field present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a task from a create request, filling the documented defaults.
    /// The caller validates the title.
    pub fn new(request: CreateTaskRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::generate(),
            title: request.title.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            priority: request.priority.unwrap_or_default(),
            status: request.status.unwrap_or_default(),
            due_date: request.due_date,
            created_at,
        }
    }

    /// Shallow merge of a patch. Absent fields keep their current value.
    pub fn edit(self, patch: TaskPatch) -> Self {
        Self {
            id: self.id,
            title: patch.title.unwrap_or(self.title),
            description: patch.description.unwrap_or(self.description),
            priority: patch.priority.unwrap_or(self.priority),
            status: patch.status.unwrap_or(self.status),
            due_date: patch.due_date.unwrap_or(self.due_date),
            created_at: self.created_at,
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < today)
    }
}
