use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::Entity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

fn enabled_by_default() -> bool {
    true
}

impl Reminder {
    pub fn new(fields: NewReminder, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            date: fields.date,
            time: fields.time,
            enabled: fields.enabled.unwrap_or(true),
            created_at,
        }
    }

    pub fn apply(&mut self, patch: ReminderPatch) {
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
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields supplied when creating a reminder. `enabled` defaults to true.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NewReminder {
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub enabled: Option<bool>,
}
