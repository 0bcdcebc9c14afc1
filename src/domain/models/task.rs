//! Todoist-side models: projects, tasks, and the payloads used to mutate them.

use serde::{Deserialize, Serialize};

/// Todoist task priority (1 = low .. 4 = urgent).
///
/// Serialised as the bare integer Todoist uses on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    /// p4 in the Todoist app.
    #[default]
    Low = 1,
    /// p3 in the Todoist app.
    Medium = 2,
    /// p2 in the Todoist app.
    High = 3,
    /// p1 in the Todoist app.
    Urgent = 4,
}

impl Priority {
    /// Lowercase name, matching the label that selects it.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Case-insensitive lookup of a priority keyword.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    /// Todoist API value.
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            4 => Ok(Self::Urgent),
            other => Err(format!("priority must be between 1 and 4, got {other}")),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.value())
    }
}

/// A Todoist project. Only the fields the synchronizer needs are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project id.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Browser URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// A task inside the target project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task id.
    pub id: String,
    /// Owning project id.
    pub project_id: String,
    /// Task title.
    pub content: String,
    /// Description; carries the issue marker.
    #[serde(default)]
    pub description: String,
    /// Whether the task is checked off.
    #[serde(default)]
    pub is_completed: bool,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Task priority.
    #[serde(default)]
    pub priority: Priority,
}

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Task title.
    pub content: String,
    /// Description with the issue marker.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    /// Target project id.
    pub project_id: String,
    /// Label names.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub labels: Vec<String>,
    /// Task priority.
    pub priority: Priority,
    /// Natural-language due date, e.g. `"tomorrow"`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub due_string: Option<String>,
    /// Due date as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub due_date: Option<String>,
}

/// Partial task update. Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<String>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub priority: Option<Priority>,
    /// Replacement label set.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub labels: Option<Vec<String>>,
}

impl TaskUpdate {
    /// True when no field is set.
    pub const fn is_empty(&self) -> bool {
        self.content.is_none() && self.priority.is_none() && self.labels.is_none()
    }

    /// Apply the set fields to a task in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(content) = &self.content {
            task.content.clone_from(content);
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(labels) = &self.labels {
            task.labels.clone_from(labels);
        }
    }
}
