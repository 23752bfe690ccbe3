use balance_core::{
    reminders::{NewReminder, Reminder, ReminderPatch},
    storage::KvStore,
};
use balance_state::AppStore;
use color_eyre::{eyre::eyre, Result};

use crate::{cli::ReminderCommand, ids, storage::ensure_saved};

pub fn handle<S: KvStore>(cmd: ReminderCommand, app: &mut AppStore<S>) -> Result<()> {
    match cmd {
        ReminderCommand::List => {
            if app.reminders().is_empty() {
                println!("No reminders. Add one with `balance reminder add <title>`.");
                return Ok(());
            }
            for reminder in app.reminders().iter() {
                print_reminder(reminder);
            }
        }
        ReminderCommand::Add {
            title,
            description,
            date,
            time,
            disabled,
        } => {
            let reminder = app.add_reminder(NewReminder {
                title,
                description: description.unwrap_or_default(),
                date,
                time,
                enabled: Some(!disabled),
            });
            ensure_saved(app)?;
            println!(
                "Created reminder {}: {}",
                ids::short(reminder.id),
                reminder.title
            );
        }
        ReminderCommand::Edit {
            id,
            title,
            description,
            date,
            time,
        } => {
            let uuid = ids::resolve(&id, app.reminders().ids())?;
            let patch = ReminderPatch {
                title,
                description,
                date,
                time,
                enabled: None,
            };
            let reminder = app
                .update_reminder(uuid, patch)
                .ok_or_else(|| eyre!("reminder `{id}` not found"))?;
            ensure_saved(app)?;
            println!("Updated: {}", reminder.title);
        }
        ReminderCommand::Toggle { id } => {
            let uuid = ids::resolve(&id, app.reminders().ids())?;
            let reminder = app
                .toggle_reminder(uuid)
                .ok_or_else(|| eyre!("reminder `{id}` not found"))?;
            ensure_saved(app)?;
            println!("{}: {}", reminder.title, on_off(reminder.enabled));
        }
        ReminderCommand::Delete { id } => {
            let uuid = ids::resolve(&id, app.reminders().ids())?;
            let reminder = app
                .delete_reminder(uuid)
                .ok_or_else(|| eyre!("reminder `{id}` not found"))?;
            ensure_saved(app)?;
            println!("Deleted: {}", reminder.title);
        }
    }

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn print_reminder(reminder: &Reminder) {
    let when = [reminder.date.as_deref(), reminder.time.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "{} [{}] {}{}",
        ids::short(reminder.id),
        on_off(reminder.enabled),
        reminder.title,
        if when.is_empty() {
            String::new()
        } else {
            format!(" ({when})")
        }
    );
    if !reminder.description.is_empty() {
        println!("    {}", reminder.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_app;

    #[test]
    fn add_toggle_and_delete() {
        let mut app = test_app();
        handle(
            ReminderCommand::Add {
                title: "Stretch".into(),
                description: None,
                date: None,
                time: Some("15:00".into()),
                disabled: false,
            },
            &mut app,
        )
        .expect("add");

        let id = app.reminders().ids()[0];
        assert!(app.reminders().get(id).map_or(false, |r| r.enabled));

        handle(ReminderCommand::Toggle { id: ids::short(id) }, &mut app).expect("toggle");
        assert!(!app.reminders().get(id).map_or(true, |r| r.enabled));

        handle(ReminderCommand::Delete { id: id.to_string() }, &mut app).expect("delete");
        assert!(app.reminders().is_empty());
    }

    #[test]
    fn disabled_flag_creates_switched_off_reminder() {
        let mut app = test_app();
        handle(
            ReminderCommand::Add {
                title: "Hydrate".into(),
                description: Some("Glass of water".into()),
                date: None,
                time: None,
                disabled: true,
            },
            &mut app,
        )
        .expect("add");

        let reminder = app.reminders().iter().next().expect("reminder");
        assert!(!reminder.enabled);
        assert_eq!(reminder.description, "Glass of water");
    }

    #[test]
    fn edit_keeps_enabled_state() {
        let mut app = test_app();
        handle(
            ReminderCommand::Add {
                title: "Walk".into(),
                description: None,
                date: None,
                time: None,
                disabled: false,
            },
            &mut app,
        )
        .expect("add");
        let id = app.reminders().ids()[0];

        handle(
            ReminderCommand::Edit {
                id: id.to_string(),
                title: Some("Evening walk".into()),
                description: None,
                date: Some("2026-03-13".into()),
                time: None,
            },
            &mut app,
        )
        .expect("edit");

        let reminder = app.reminders().get(id).expect("reminder");
        assert_eq!(reminder.title, "Evening walk");
        assert_eq!(reminder.date.as_deref(), Some("2026-03-13"));
        assert!(reminder.enabled);
    }
}
