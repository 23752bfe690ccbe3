use balance_core::{
    clock::local_date,
    tasks::{Priority, TaskStatus},
};
use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::snapshot::Snapshot;

/// Days covered by the activity series when the caller does not choose.
pub const DEFAULT_WINDOW_DAYS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analytics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Rounded percentage; 0 when there are no tasks.
    pub completion_rate: u8,
    pub average_energy: Option<u8>,
    /// Energy of each history entry, oldest first.
    pub mood_trend: Vec<u8>,
    pub priority: PrioritySplit,
    pub daily: Vec<DayActivity>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrioritySplit {
    pub important: usize,
    pub not_important: usize,
}

/// Tasks created on `date` and how many of those are completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub created: usize,
    pub completed: usize,
}

pub fn summarize(snapshot: &Snapshot, today: NaiveDate, days: u32) -> Analytics {
    let total_tasks = snapshot.tasks.len();
    let completed_tasks = snapshot
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();

    let mut priority = PrioritySplit::default();
    for task in snapshot.tasks.iter() {
        match task.priority {
            Priority::Important => priority.important += 1,
            Priority::NotImportant => priority.not_important += 1,
        }
    }

    let mood_trend: Vec<u8> = snapshot.mood_history.iter().map(|m| m.energy).collect();

    Analytics {
        total_tasks,
        completed_tasks,
        completion_rate: percent(completed_tasks, total_tasks),
        average_energy: average(&mood_trend),
        mood_trend,
        priority,
        daily: daily_activity(snapshot, today, days),
    }
}

fn daily_activity(snapshot: &Snapshot, today: NaiveDate, days: u32) -> Vec<DayActivity> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| {
            let mut activity = DayActivity {
                date,
                created: 0,
                completed: 0,
            };
            for task in snapshot
                .tasks
                .iter()
                .filter(|t| local_date(t.created_at) == date)
            {
                activity.created += 1;
                if task.status == TaskStatus::Completed {
                    activity.completed += 1;
                }
            }
            activity
        })
        .collect()
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u8
}

fn average(values: &[u8]) -> Option<u8> {
    if values.is_empty() {
        return None;
    }
    let sum: u32 = values.iter().map(|v| u32::from(*v)).sum();
    Some((f64::from(sum) / values.len() as f64).round() as u8)
}
