use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::Entity;

/// Task status lifecycle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Upcoming,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Upcoming => "upcoming",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Important,
    #[default]
    NotImportant,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Important => "important",
            Priority::NotImportant => "not-important",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Now,
    #[default]
    Later,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Now => "now",
            Urgency::Later => "later",
        }
    }
}

/// Error for labels that do not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

macro_rules! labelled {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseLabelError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

labelled!(
    TaskStatus,
    "task status",
    [TaskStatus::Upcoming, TaskStatus::InProgress, TaskStatus::Completed]
);
labelled!(Priority, "priority", [Priority::Important, Priority::NotImportant]);
labelled!(Urgency, "urgency", [Urgency::Now, Urgency::Later]);

/// Task entity. `date` and `time` are kept exactly as entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(fields: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            date: fields.date,
            time: fields.time,
            priority: fields.priority,
            urgency: fields.urgency,
            status: TaskStatus::Upcoming,
            created_at,
            updated_at: None,
        }
    }

    /// Merge `patch`. Only a status change stamps `updated_at`; plain edits
    /// leave it alone so they do not count as activity for the day.
    pub fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
        if let Some(time) = patch.time {
            self.time = Some(time);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(urgency) = patch.urgency {
            self.urgency = urgency;
        }
        if let Some(status) = patch.status {
            self.status = status;
            self.updated_at = Some(now);
        }
    }

    /// Instant used to decide which day a task was last touched.
    pub fn last_touched(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

impl Entity for Task {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub priority: Priority,
    pub urgency: Urgency,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial task update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub priority: Option<Priority>,
    pub urgency: Option<Urgency>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
