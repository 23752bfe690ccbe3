use std::collections::BTreeMap;

use balance_core::tasks::TaskStatus;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::snapshot::Snapshot;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaSource {
    Task,
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaItem {
    pub id: Uuid,
    pub source: AgendaSource,
    pub title: String,
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub label: String,
    pub items: Vec<AgendaItem>,
}

/// Dated open tasks and enabled reminders, grouped per day in date order.
/// Entries whose date is not `YYYY-MM-DD` are left out.
pub fn build(snapshot: &Snapshot, today: NaiveDate) -> Vec<AgendaDay> {
    let mut days: BTreeMap<NaiveDate, Vec<AgendaItem>> = BTreeMap::new();

    let tasks = snapshot
        .tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .filter_map(|t| {
            let date = parse_date(t.date.as_deref())?;
            Some((
                date,
                AgendaItem {
                    id: t.id,
                    source: AgendaSource::Task,
                    title: t.title.clone(),
                    time: t.time.clone(),
                },
            ))
        });

    let reminders = snapshot
        .reminders
        .iter()
        .filter(|r| r.enabled)
        .filter_map(|r| {
            let date = parse_date(r.date.as_deref())?;
            Some((
                date,
                AgendaItem {
                    id: r.id,
                    source: AgendaSource::Reminder,
                    title: r.title.clone(),
                    time: r.time.clone(),
                },
            ))
        });

    for (date, item) in tasks.chain(reminders) {
        days.entry(date).or_default().push(item);
    }

    days.into_iter()
        .map(|(date, items)| AgendaDay {
            date,
            label: day_label(date, today),
            items,
        })
        .collect()
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), DATE_FORMAT).ok()
}

/// `Today`, `Tomorrow`, or e.g. `Wednesday, March 11`.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.checked_add_days(Days::new(1)) == Some(date) {
        return "Tomorrow".to_string();
    }
    date.format("%A, %B %-d").to_string()
}
