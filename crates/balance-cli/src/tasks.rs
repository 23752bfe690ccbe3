use balance_core::{
    storage::KvStore,
    tasks::{NewTask, Task, TaskPatch, TaskStatus},
};
use balance_state::AppStore;
use color_eyre::{eyre::eyre, Result};

use crate::{cli::TaskCommand, ids, storage::ensure_saved};

/// Execute a task subcommand against the app store.
pub fn handle<S: KvStore>(cmd: TaskCommand, app: &mut AppStore<S>) -> Result<()> {
    match cmd {
        TaskCommand::List { status } => {
            let tasks: Vec<&Task> = app
                .tasks()
                .iter()
                .filter(|t| status.map_or(true, |s| t.status == s))
                .collect();
            if tasks.is_empty() {
                println!("No tasks yet. Add one with `balance task add <title>`.");
                return Ok(());
            }
            for task in tasks {
                print_task(task);
            }
        }
        TaskCommand::Add {
            title,
            description,
            date,
            time,
            priority,
            urgency,
        } => {
            let task = app.add_task(NewTask {
                title,
                description: description.unwrap_or_default(),
                date,
                time,
                priority: priority.unwrap_or_default(),
                urgency: urgency.unwrap_or_default(),
            });
            ensure_saved(app)?;
            println!("Created task {}: {}", ids::short(task.id), task.title);
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            date,
            time,
            priority,
            urgency,
            status,
        } => {
            let patch = TaskPatch {
                title,
                description,
                date,
                time,
                priority,
                urgency,
                status,
            };
            let task = update(app, &id, patch)?;
            println!("Updated: {}", task.title);
        }
        TaskCommand::Start { id } => {
            let task = update(app, &id, TaskPatch::status(TaskStatus::InProgress))?;
            println!("Started: {}", task.title);
        }
        TaskCommand::Done { id } => {
            let task = update(app, &id, TaskPatch::status(TaskStatus::Completed))?;
            println!("Marked done: {}", task.title);
        }
        TaskCommand::Delete { id } => {
            let uuid = ids::resolve(&id, app.tasks().ids())?;
            let task = app
                .delete_task(uuid)
                .ok_or_else(|| eyre!("task `{id}` not found"))?;
            ensure_saved(app)?;
            println!("Deleted: {}", task.title);
        }
    }

    Ok(())
}

fn update<S: KvStore>(app: &mut AppStore<S>, id: &str, patch: TaskPatch) -> Result<Task> {
    let uuid = ids::resolve(id, app.tasks().ids())?;
    let task = app
        .update_task(uuid, patch)
        .ok_or_else(|| eyre!("task `{id}` not found"))?;
    ensure_saved(app)?;
    Ok(task)
}

fn print_task(task: &Task) {
    println!(
        "{} [{}] {}",
        ids::short(task.id),
        task.status,
        task.title
    );
    if !task.description.is_empty() {
        println!("    {}", task.description);
    }
    let due = match (&task.date, &task.time) {
        (Some(date), Some(time)) => Some(format!("{date} {time}")),
        (Some(date), None) => Some(date.clone()),
        (None, Some(time)) => Some(time.clone()),
        (None, None) => None,
    };
    if let Some(due) = due {
        println!("    due: {due}");
    }
    println!("    {} / {}", task.priority, task.urgency);
}

#[cfg(test)]
mod tests {
    use balance_core::tasks::{Priority, Urgency};

    use super::*;
    use crate::storage::test_app;

    fn add(app: &mut AppStore<impl KvStore>, title: &str) {
        handle(
            TaskCommand::Add {
                title: title.into(),
                description: None,
                date: None,
                time: None,
                priority: Some(Priority::Important),
                urgency: None,
            },
            app,
        )
        .expect("add");
    }

    #[test]
    fn add_uses_given_labels_and_defaults() {
        let mut app = test_app();
        add(&mut app, "Plan week");

        let task = app.tasks().iter().next().expect("task");
        assert_eq!(task.title, "Plan week");
        assert_eq!(task.priority, Priority::Important);
        assert_eq!(task.urgency, Urgency::Later);
        assert_eq!(task.status, TaskStatus::Upcoming);
    }

    #[test]
    fn start_and_done_by_prefix() {
        let mut app = test_app();
        add(&mut app, "Plan week");
        let id = app.tasks().ids()[0];
        let prefix = ids::short(id);

        handle(TaskCommand::Start { id: prefix.clone() }, &mut app).expect("start");
        assert_eq!(app.tasks().get(id).map(|t| t.status), Some(TaskStatus::InProgress));

        handle(TaskCommand::Done { id: prefix }, &mut app).expect("done");
        let task = app.tasks().get(id).expect("task");
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.updated_at.is_some());
    }

    #[test]
    fn edit_only_changes_given_fields() {
        let mut app = test_app();
        add(&mut app, "Plan week");
        let id = app.tasks().ids()[0];

        handle(
            TaskCommand::Edit {
                id: id.to_string(),
                title: None,
                description: Some("Sunday evening".into()),
                date: Some("2026-03-15".into()),
                time: None,
                priority: None,
                urgency: Some(Urgency::Now),
                status: None,
            },
            &mut app,
        )
        .expect("edit");

        let task = app.tasks().get(id).expect("task");
        assert_eq!(task.title, "Plan week");
        assert_eq!(task.description, "Sunday evening");
        assert_eq!(task.date.as_deref(), Some("2026-03-15"));
        assert_eq!(task.urgency, Urgency::Now);
        assert_eq!(task.priority, Priority::Important);
    }

    #[test]
    fn delete_removes_and_unknown_id_errors() {
        let mut app = test_app();
        add(&mut app, "Plan week");
        let id = app.tasks().ids()[0];

        handle(TaskCommand::Delete { id: id.to_string() }, &mut app).expect("delete");
        assert!(app.tasks().is_empty());
        assert!(handle(TaskCommand::Done { id: id.to_string() }, &mut app).is_err());
    }
}
