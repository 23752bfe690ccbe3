use std::sync::Arc;

use anyhow::{Context, Result};
use balance_core::{
    clock::{Clock, SystemClock},
    collection::Collection,
    insights::Insight,
    journal::{JournalEntry, JournalPatch, NewJournalEntry},
    mood::{Mood, MoodSnapshot, MOOD_HISTORY_LIMIT},
    reminders::{NewReminder, Reminder, ReminderPatch},
    storage::{KvStore, StoreError},
    tasks::{NewTask, Task, TaskPatch},
    user::{User, UserPatch},
};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::{agenda, analytics, insights, snapshot::Snapshot};

/// Storage key holding the whole serialized snapshot.
pub const STATE_KEY: &str = "work-life-balancer-storage";

/// Single owner of session and user data.
///
/// Every action that changes state writes the full snapshot back to the
/// `KvStore` before returning. Write failures do not fail the action; they are
/// logged and kept until [`AppStore::persist_status`] collects them.
pub struct AppStore<S: KvStore> {
    kv: S,
    clock: Arc<dyn Clock>,
    state: Snapshot,
    persist_error: Option<StoreError>,
}

impl<S: KvStore> AppStore<S> {
    pub fn open(kv: S) -> Result<Self> {
        Self::open_with_clock(kv, Arc::new(SystemClock))
    }

    /// Load the stored snapshot, or start fresh when nothing was stored yet.
    #[instrument(skip_all)]
    pub fn open_with_clock(kv: S, clock: Arc<dyn Clock>) -> Result<Self> {
        let state: Snapshot = match kv.get(STATE_KEY) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("stored state under `{STATE_KEY}` is not readable"))?,
            Err(StoreError::NotFound { .. }) => {
                debug!("no stored state, starting fresh");
                Snapshot::fresh(clock.now())
            }
            Err(err) => return Err(err).context("loading stored state"),
        };

        Ok(Self {
            kv,
            clock,
            state,
            persist_error: None,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn is_guest(&self) -> bool {
        self.state.is_guest
    }

    pub fn current_mood(&self) -> &MoodSnapshot {
        &self.state.current_mood
    }

    pub fn mood_history(&self) -> &[MoodSnapshot] {
        &self.state.mood_history
    }

    pub fn tasks(&self) -> &Collection<Task> {
        &self.state.tasks
    }

    pub fn reminders(&self) -> &Collection<Reminder> {
        &self.state.reminders
    }

    pub fn journal_entries(&self) -> &Collection<JournalEntry> {
        &self.state.journal_entries
    }

    pub fn automation_enabled(&self) -> bool {
        self.state.automation_enabled
    }

    /// Take the error from the most recent failed write, if it has not been
    /// superseded by a successful one.
    pub fn persist_status(&mut self) -> Result<(), StoreError> {
        match self.persist_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn commit(&mut self) {
        let written = serde_json::to_vec(&self.state)
            .map_err(StoreError::storage)
            .and_then(|bytes| self.kv.put(STATE_KEY, &bytes));
        match written {
            Ok(()) => self.persist_error = None,
            Err(err) => {
                error!(%err, "failed to persist state");
                self.persist_error = Some(err);
            }
        }
    }

    // Session

    #[instrument(skip_all)]
    pub fn set_user(&mut self, patch: UserPatch) {
        self.state
            .user
            .get_or_insert_with(User::default)
            .merge(patch);
        self.state.is_authenticated = true;
        self.state.is_guest = false;
        self.commit();
    }

    /// Profile edit; session flags stay as they are.
    #[instrument(skip_all)]
    pub fn update_user(&mut self, patch: UserPatch) {
        self.state
            .user
            .get_or_insert_with(User::default)
            .merge(patch);
        self.commit();
    }

    #[instrument(skip_all)]
    pub fn set_guest(&mut self) {
        self.state.user.get_or_insert_with(User::guest);
        self.state.is_authenticated = true;
        self.state.is_guest = true;
        self.commit();
    }

    /// Ends the session. The user profile is kept for the next login.
    #[instrument(skip_all)]
    pub fn logout(&mut self) {
        self.state.is_authenticated = false;
        self.state.is_guest = false;
        self.commit();
    }

    // Mood

    #[instrument(skip(self))]
    pub fn update_mood(&mut self, mood: Mood, energy: u8) -> MoodSnapshot {
        let snapshot = MoodSnapshot::new(mood, energy, self.clock.now());
        self.state.current_mood = snapshot;

        let history = &mut self.state.mood_history;
        history.push(snapshot);
        if history.len() > MOOD_HISTORY_LIMIT {
            let excess = history.len() - MOOD_HISTORY_LIMIT;
            history.drain(..excess);
        }

        self.commit();
        snapshot
    }

    // Tasks

    #[instrument(skip_all)]
    pub fn add_task(&mut self, fields: NewTask) -> Task {
        let task = Task::new(fields, self.clock.now());
        self.state.tasks.insert(task.clone());
        debug!(id = %task.id, "task added");
        self.commit();
        task
    }

    #[instrument(skip(self, patch))]
    pub fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Option<Task> {
        let now = self.clock.now();
        let task = self.state.tasks.get_mut(id)?;
        task.apply(patch, now);
        let updated = task.clone();
        self.commit();
        Some(updated)
    }

    #[instrument(skip(self))]
    pub fn delete_task(&mut self, id: Uuid) -> Option<Task> {
        let removed = self.state.tasks.remove(id)?;
        self.commit();
        Some(removed)
    }

    // Reminders

    #[instrument(skip_all)]
    pub fn add_reminder(&mut self, fields: NewReminder) -> Reminder {
        let reminder = Reminder::new(fields, self.clock.now());
        self.state.reminders.insert(reminder.clone());
        debug!(id = %reminder.id, "reminder added");
        self.commit();
        reminder
    }

    #[instrument(skip(self, patch))]
    pub fn update_reminder(&mut self, id: Uuid, patch: ReminderPatch) -> Option<Reminder> {
        let reminder = self.state.reminders.get_mut(id)?;
        reminder.apply(patch);
        let updated = reminder.clone();
        self.commit();
        Some(updated)
    }

    #[instrument(skip(self))]
    pub fn toggle_reminder(&mut self, id: Uuid) -> Option<Reminder> {
        let reminder = self.state.reminders.get_mut(id)?;
        reminder.enabled = !reminder.enabled;
        let toggled = reminder.clone();
        self.commit();
        Some(toggled)
    }

    #[instrument(skip(self))]
    pub fn delete_reminder(&mut self, id: Uuid) -> Option<Reminder> {
        let removed = self.state.reminders.remove(id)?;
        self.commit();
        Some(removed)
    }

    // Journal

    #[instrument(skip_all)]
    pub fn add_journal_entry(&mut self, fields: NewJournalEntry) -> JournalEntry {
        let entry = JournalEntry::new(fields, self.clock.now());
        self.state.journal_entries.insert(entry.clone());
        debug!(id = %entry.id, "journal entry added");
        self.commit();
        entry
    }

    #[instrument(skip(self, patch))]
    pub fn update_journal_entry(&mut self, id: Uuid, patch: JournalPatch) -> Option<JournalEntry> {
        let entry = self.state.journal_entries.get_mut(id)?;
        entry.apply(patch);
        let updated = entry.clone();
        self.commit();
        Some(updated)
    }

    #[instrument(skip(self))]
    pub fn delete_journal_entry(&mut self, id: Uuid) -> Option<JournalEntry> {
        let removed = self.state.journal_entries.remove(id)?;
        self.commit();
        Some(removed)
    }

    // Preferences

    /// Flip the automation preference and return the new value.
    #[instrument(skip_all)]
    pub fn toggle_automation(&mut self) -> bool {
        self.state.automation_enabled = !self.state.automation_enabled;
        self.commit();
        self.state.automation_enabled
    }

    // Derived reads

    pub fn insights(&self) -> Vec<Insight> {
        insights::derive(&self.state, self.clock.today())
    }

    pub fn analytics(&self, days: u32) -> analytics::Analytics {
        analytics::summarize(&self.state, self.clock.today(), days)
    }

    pub fn agenda(&self) -> Vec<agenda::AgendaDay> {
        agenda::build(&self.state, self.clock.today())
    }
}
