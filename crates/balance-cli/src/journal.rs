use balance_core::{
    journal::{JournalPatch, NewJournalEntry},
    storage::KvStore,
};
use balance_state::AppStore;
use balance_wellness::companion::Companion;
use color_eyre::{eyre::eyre, Result};

use crate::{cli::JournalCommand, config::Config, ids, storage::ensure_saved};

pub fn companion_from_config(config: &Config) -> Companion {
    match config.companion.seed {
        Some(seed) => Companion::seeded(seed),
        None => Companion::from_entropy(),
    }
}

pub fn handle<S: KvStore>(
    cmd: JournalCommand,
    app: &mut AppStore<S>,
    companion: &mut Companion,
) -> Result<()> {
    match cmd {
        JournalCommand::List => {
            if app.journal_entries().is_empty() {
                println!("Journal is empty. Start with `balance journal write <text>`.");
                return Ok(());
            }
            for entry in app.journal_entries().iter() {
                println!(
                    "{} {}",
                    ids::short(entry.id),
                    entry.timestamp.format("%Y-%m-%d %H:%M")
                );
                println!("    {}", entry.content);
            }
        }
        JournalCommand::Write { text } => {
            let content = text.join(" ");
            let mood = *app.current_mood();
            let reply = companion.reply(&content, mood.mood, mood.energy);
            let entry = app.add_journal_entry(NewJournalEntry::new(content));
            ensure_saved(app)?;
            println!("Saved entry {}.", ids::short(entry.id));
            println!();
            println!("  {reply}");
        }
        JournalCommand::Edit { id, text } => {
            let uuid = ids::resolve(&id, app.journal_entries().ids())?;
            let patch = JournalPatch {
                content: Some(text.join(" ")),
            };
            app.update_journal_entry(uuid, patch)
                .ok_or_else(|| eyre!("journal entry `{id}` not found"))?;
            ensure_saved(app)?;
            println!("Updated entry {}.", ids::short(uuid));
        }
        JournalCommand::Delete { id } => {
            let uuid = ids::resolve(&id, app.journal_entries().ids())?;
            app.delete_journal_entry(uuid)
                .ok_or_else(|| eyre!("journal entry `{id}` not found"))?;
            ensure_saved(app)?;
            println!("Deleted entry {}.", ids::short(uuid));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_app;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn write_joins_words_and_edit_replaces_content() {
        let mut app = test_app();
        let mut companion = Companion::seeded(1);

        handle(
            JournalCommand::Write {
                text: words("finished the report today"),
            },
            &mut app,
            &mut companion,
        )
        .expect("write");
        let id = app.journal_entries().ids()[0];
        assert_eq!(
            app.journal_entries().get(id).map(|e| e.content.as_str()),
            Some("finished the report today")
        );

        handle(
            JournalCommand::Edit {
                id: ids::short(id),
                text: words("finished half the report"),
            },
            &mut app,
            &mut companion,
        )
        .expect("edit");
        assert_eq!(
            app.journal_entries().get(id).map(|e| e.content.as_str()),
            Some("finished half the report")
        );

        handle(JournalCommand::Delete { id: id.to_string() }, &mut app, &mut companion)
            .expect("delete");
        assert!(app.journal_entries().is_empty());
    }

    #[test]
    fn seed_from_config_is_reproducible() {
        let config = Config {
            companion: crate::config::CompanionConfig { seed: Some(9) },
            ..Config::default()
        };
        let mut a = companion_from_config(&config);
        let mut b = companion_from_config(&config);
        let mood = balance_core::mood::Mood::Calm;
        assert_eq!(a.reply("so tired", mood, 50), b.reply("so tired", mood, 50));
    }
}
