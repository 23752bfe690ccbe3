use balance_core::{
    collection::Collection,
    journal::JournalEntry,
    mood::MoodSnapshot,
    reminders::Reminder,
    tasks::Task,
    user::User,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the store persists, written as one record.
///
/// Missing fields fall back to their defaults so partially written or older
/// records still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_guest: bool,
    pub current_mood: MoodSnapshot,
    pub mood_history: Vec<MoodSnapshot>,
    pub tasks: Collection<Task>,
    pub reminders: Collection<Reminder>,
    pub journal_entries: Collection<JournalEntry>,
    pub automation_enabled: bool,
}

impl Snapshot {
    /// State of a store that has never been written.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_guest: false,
            current_mood: MoodSnapshot::initial(now),
            mood_history: Vec::new(),
            tasks: Collection::new(),
            reminders: Collection::new(),
            journal_entries: Collection::new(),
            automation_enabled: true,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::fresh(Utc::now())
    }
}
