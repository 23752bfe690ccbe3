use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::Entity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(fields: NewJournalEntry, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: fields.content,
            timestamp,
        }
    }

    pub fn apply(&mut self, patch: JournalPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}

impl Entity for JournalEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewJournalEntry {
    pub content: String,
}

impl NewJournalEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JournalPatch {
    pub content: Option<String>,
}
