use serde::{Deserialize, Serialize};

/// Task completion state, as the remote service represents it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    NeedsAction,
    Completed,
}

/// A single task as returned by the remote service.
///
/// `position` is an opaque lexicographically-sortable token owned by the
/// service; we only ever compare it, never parse it. `parent` absent means
/// the task is top-level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Sibling sort key. A missing position sorts first.
    pub fn position_key(&self) -> &str {
        self.position.as_deref().unwrap_or("")
    }
}

/// Fields for creating a task
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

impl NewTask {
    /// A fresh incomplete task. `due` is a `YYYY-MM-DD` date; the service
    /// wants a full timestamp, so we pin it to midnight UTC.
    pub fn new(title: String, due: Option<&str>) -> Self {
        NewTask {
            title,
            status: TaskStatus::NeedsAction,
            due: due.map(|d| format!("{}T00:00:00.000Z", d)),
        }
    }
}

/// Partial update for an existing task; only set fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn title(title: String) -> Self {
        TaskPatch {
            title: Some(title),
            ..Default::default()
        }
    }

    pub fn completed() -> Self {
        TaskPatch {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        }
    }
}

/// A task list (the container, not its contents)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub title: String,
}
