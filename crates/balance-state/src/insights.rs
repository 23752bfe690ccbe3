use balance_core::{
    clock::local_date,
    insights::{Insight, InsightKind},
    tasks::TaskStatus,
};
use chrono::NaiveDate;

use crate::snapshot::Snapshot;

pub const OVERLOAD_MESSAGE: &str = "You seem overloaded — slowing down may help.";
pub const LOW_ENERGY_MESSAGE: &str =
    "Your energy is low. Consider taking a break or doing a breathing exercise.";
pub const STREAK_MESSAGE: &str = "You're doing better than earlier this week. Keep it up!";
pub const FOCUS_MESSAGE: &str = "This is a good moment to focus on important tasks.";

const OVERLOAD_UPCOMING: usize = 10;
const LOW_ENERGY_BELOW: u8 = 30;
const STREAK_COMPLETED: usize = 3;
const FOCUS_ENERGY_ABOVE: u8 = 60;

/// Evaluate the insight rules against `snapshot`.
///
/// Rules are independent and emitted in a fixed order: overload, low energy,
/// completion streak, focus moment.
pub fn derive(snapshot: &Snapshot, today: NaiveDate) -> Vec<Insight> {
    let mut insights = Vec::new();
    let energy = snapshot.current_mood.energy;

    let upcoming = snapshot
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Upcoming)
        .count();

    if upcoming > OVERLOAD_UPCOMING {
        insights.push(Insight::new(InsightKind::Warning, OVERLOAD_MESSAGE));
    }

    if energy < LOW_ENERGY_BELOW {
        insights.push(Insight::new(InsightKind::Info, LOW_ENERGY_MESSAGE));
    }

    let completed_today = snapshot
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed && local_date(t.last_touched()) == today)
        .count();

    if completed_today > STREAK_COMPLETED {
        insights.push(Insight::new(InsightKind::Success, STREAK_MESSAGE));
    }

    if energy > FOCUS_ENERGY_ABOVE && upcoming > 0 {
        insights.push(Insight::new(InsightKind::Info, FOCUS_MESSAGE));
    }

    insights
}

#[cfg(test)]
mod tests {
    use balance_core::{
        clock::local_date,
        mood::{Mood, MoodSnapshot},
        tasks::{NewTask, Task, TaskPatch},
    };
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn with_energy(energy: u8) -> Snapshot {
        let mut snapshot = Snapshot::fresh(now());
        snapshot.current_mood = MoodSnapshot::new(Mood::Calm, energy, now());
        snapshot
    }

    fn add_tasks(snapshot: &mut Snapshot, count: usize, status: TaskStatus, at: DateTime<Utc>) {
        for i in 0..count {
            let mut task = Task::new(NewTask::titled(format!("task {i}")), at);
            if status != TaskStatus::Upcoming {
                task.apply(TaskPatch::status(status), at);
            }
            snapshot.tasks.insert(task);
        }
    }

    fn kinds(insights: &[Insight]) -> Vec<(&'static str, &str)> {
        insights
            .iter()
            .map(|i| (i.kind.as_str(), i.message.as_str()))
            .collect()
    }

    #[test]
    fn fresh_store_has_no_insights() {
        let snapshot = Snapshot::fresh(now());
        assert!(derive(&snapshot, local_date(now())).is_empty());
    }

    #[test]
    fn overload_needs_more_than_ten_upcoming() {
        let mut snapshot = with_energy(50);
        add_tasks(&mut snapshot, 10, TaskStatus::Upcoming, now());
        assert!(derive(&snapshot, local_date(now())).is_empty());

        add_tasks(&mut snapshot, 1, TaskStatus::Upcoming, now());
        assert_eq!(
            kinds(&derive(&snapshot, local_date(now()))),
            [("warning", OVERLOAD_MESSAGE)]
        );
    }

    #[test]
    fn low_energy_threshold() {
        let today = local_date(now());
        assert_eq!(
            kinds(&derive(&with_energy(25), today)),
            [("info", LOW_ENERGY_MESSAGE)]
        );
        assert!(derive(&with_energy(31), today).is_empty());
        assert!(derive(&with_energy(30), today).is_empty());
    }

    #[test]
    fn streak_counts_only_tasks_completed_today() {
        let today = local_date(now());
        let mut snapshot = with_energy(50);
        add_tasks(&mut snapshot, 3, TaskStatus::Completed, now());
        add_tasks(&mut snapshot, 2, TaskStatus::Completed, now() - Duration::days(2));
        assert!(derive(&snapshot, today).is_empty());

        add_tasks(&mut snapshot, 1, TaskStatus::Completed, now());
        assert_eq!(kinds(&derive(&snapshot, today)), [("success", STREAK_MESSAGE)]);
    }

    #[test]
    fn streak_falls_back_to_created_at() {
        let today = local_date(now());
        let mut snapshot = with_energy(50);
        for i in 0..4 {
            let mut task = Task::new(NewTask::titled(format!("imported {i}")), now());
            task.status = TaskStatus::Completed;
            snapshot.tasks.insert(task);
        }
        assert_eq!(kinds(&derive(&snapshot, today)), [("success", STREAK_MESSAGE)]);
    }

    #[test]
    fn focus_needs_energy_and_upcoming_work() {
        let today = local_date(now());
        let mut snapshot = with_energy(61);
        assert!(derive(&snapshot, today).is_empty());

        add_tasks(&mut snapshot, 1, TaskStatus::Upcoming, now());
        assert_eq!(kinds(&derive(&snapshot, today)), [("info", FOCUS_MESSAGE)]);

        snapshot.current_mood.energy = 60;
        assert!(derive(&snapshot, today).is_empty());
    }

    #[test]
    fn rules_combine_in_fixed_order() {
        let today = local_date(now());
        let mut snapshot = with_energy(90);
        add_tasks(&mut snapshot, 11, TaskStatus::Upcoming, now());
        add_tasks(&mut snapshot, 4, TaskStatus::Completed, now());

        assert_eq!(
            kinds(&derive(&snapshot, today)),
            [
                ("warning", OVERLOAD_MESSAGE),
                ("success", STREAK_MESSAGE),
                ("info", FOCUS_MESSAGE),
            ]
        );
    }
}
