//! Read-only views: dashboard, insights, stats and agenda.

use balance_core::{insights::Insight, storage::KvStore, tasks::TaskStatus};
use balance_state::{
    agenda::{AgendaDay, AgendaSource},
    analytics::Analytics,
    AppStore,
};

use crate::{ids, session};

const BAR_WIDTH: usize = 20;

pub fn dashboard<S: KvStore>(app: &AppStore<S>) {
    print!("{}", render_dashboard(app));
}

pub fn insights<S: KvStore>(app: &AppStore<S>) {
    let insights = app.insights();
    if insights.is_empty() {
        println!("Nothing to flag right now. Keep going.");
        return;
    }
    for insight in &insights {
        println!("{}", insight_line(insight));
    }
}

pub fn stats<S: KvStore>(app: &AppStore<S>, days: u32) {
    print!("{}", render_stats(&app.analytics(days)));
}

pub fn agenda<S: KvStore>(app: &AppStore<S>) {
    print!("{}", render_agenda(&app.agenda()));
}

fn insight_line(insight: &Insight) -> String {
    format!("[{}] {}", insight.kind.as_str(), insight.message)
}

pub fn render_dashboard<S: KvStore>(app: &AppStore<S>) -> String {
    let mut lines = Vec::new();
    match (app.is_authenticated(), app.user()) {
        (true, Some(user)) => lines.push(format!("Hello, {}.", user.name)),
        _ => lines.push(
            "Not signed in. Run `balance login --name <name> --email <email>` or `balance guest`."
                .to_string(),
        ),
    }
    lines.push(format!("Mood: {}", session::mood_line(app.current_mood())));

    let count = |status: TaskStatus| app.tasks().iter().filter(|t| t.status == status).count();
    lines.push(format!(
        "Tasks: {} upcoming, {} in progress, {} completed",
        count(TaskStatus::Upcoming),
        count(TaskStatus::InProgress),
        count(TaskStatus::Completed)
    ));
    let enabled = app.reminders().iter().filter(|r| r.enabled).count();
    lines.push(format!("Reminders: {enabled} active"));
    lines.push(format!(
        "Automation: {}",
        if app.automation_enabled() { "on" } else { "off" }
    ));

    let insights = app.insights();
    if !insights.is_empty() {
        lines.push(String::new());
        lines.extend(insights.iter().map(insight_line));
    }
    join_lines(lines)
}

pub fn render_stats(stats: &Analytics) -> String {
    let mut lines = vec![
        format!(
            "Completed {} of {} tasks ({}%)",
            stats.completed_tasks, stats.total_tasks, stats.completion_rate
        ),
        format!(
            "Priority: {} important, {} not important",
            stats.priority.important, stats.priority.not_important
        ),
    ];
    lines.push(match stats.average_energy {
        Some(avg) => {
            let trend: Vec<String> = stats.mood_trend.iter().map(u8::to_string).collect();
            format!("Energy: average {avg}%, recent {}", trend.join(" → "))
        }
        None => "Energy: no check-ins yet".to_string(),
    });

    if !stats.daily.is_empty() {
        lines.push(String::new());
        let busiest = stats.daily.iter().map(|d| d.created).max().unwrap_or(0);
        lines.extend(stats.daily.iter().map(|day| {
            format!(
                "{}  {:<width$}  {} created, {} done",
                day.date.format("%a %m-%d"),
                bar(day.created, busiest),
                day.created,
                day.completed,
                width = BAR_WIDTH
            )
        }));
    }
    join_lines(lines)
}

fn bar(value: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat(value * BAR_WIDTH / max)
}

pub fn render_agenda(days: &[AgendaDay]) -> String {
    if days.is_empty() {
        return "Nothing scheduled. Add a date with `--date YYYY-MM-DD`.\n".to_string();
    }
    let mut lines = Vec::new();
    for day in days {
        lines.push(format!("{} ({})", day.label, day.date));
        lines.extend(day.items.iter().map(|item| {
            let kind = match item.source {
                AgendaSource::Task => "task",
                AgendaSource::Reminder => "reminder",
            };
            format!(
                "  {:>5}  {} {:<8} {}",
                item.time.as_deref().unwrap_or(""),
                ids::short(item.id),
                kind,
                item.title
            )
        }));
    }
    join_lines(lines)
}

/// One line per entry, each newline-terminated.
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use balance_core::{mood::Mood, tasks::NewTask};
    use balance_state::analytics::{DayActivity, PrioritySplit};
    use chrono::NaiveDate;

    use super::*;
    use crate::storage::test_app;

    #[test]
    fn dashboard_for_fresh_store_prompts_sign_in() {
        let app = test_app();
        let out = render_dashboard(&app);
        assert!(out.starts_with("Not signed in."));
        assert!(out.contains("Mood: calm (energy 50%)"));
        assert!(out.contains("Tasks: 0 upcoming, 0 in progress, 0 completed"));
        assert!(out.contains("Automation: on"));
        assert!(!out.contains('['));
        assert_eq!(out.lines().count(), 5);
        assert!(out.ends_with("Automation: on\n"));
    }

    #[test]
    fn dashboard_lists_insights() {
        let mut app = test_app();
        app.set_guest();
        app.update_mood(Mood::Tired, 20);
        let out = render_dashboard(&app);
        assert!(out.starts_with("Hello, Guest."));
        assert!(out.contains("[info] "));
    }

    #[test]
    fn stats_render_energy_and_days() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 12).expect("date");
        let stats = Analytics {
            total_tasks: 4,
            completed_tasks: 1,
            completion_rate: 25,
            average_energy: Some(55),
            mood_trend: vec![40, 70],
            priority: PrioritySplit {
                important: 1,
                not_important: 3,
            },
            daily: vec![DayActivity {
                date: day,
                created: 4,
                completed: 1,
            }],
        };
        let out = render_stats(&stats);
        assert!(out.contains("Completed 1 of 4 tasks (25%)"));
        assert!(out.contains("Energy: average 55%, recent 40 → 70"));
        assert!(out.contains("Thu 03-12"));
        assert!(out.contains(&"#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn agenda_empty_and_with_items() {
        assert!(render_agenda(&[]).starts_with("Nothing scheduled."));

        let mut app = test_app();
        let task = app.add_task(NewTask {
            title: "Dentist".into(),
            date: Some("2030-01-02".into()),
            time: Some("09:30".into()),
            ..NewTask::default()
        });
        let out = render_agenda(&app.agenda());
        assert!(out.contains("(2030-01-02)"));
        assert!(out.contains(&ids::short(task.id)));
        assert!(out.contains("09:30"));
        assert!(out.contains("Dentist"));
    }
}
