//! Session, profile, mood and preference commands.

use balance_core::{mood::MoodSnapshot, storage::KvStore, user::UserPatch};
use balance_state::AppStore;
use color_eyre::{eyre::bail, Result};

use crate::{
    cli::{MoodCommand, ProfileCommand},
    storage::ensure_saved,
};

pub fn login<S: KvStore>(app: &mut AppStore<S>, name: String, email: String) -> Result<()> {
    if name.trim().is_empty() {
        bail!("a name is required to sign in");
    }
    app.set_user(UserPatch {
        name: Some(name),
        email: Some(email),
        productivity_style: None,
    });
    ensure_saved(app)?;
    if let Some(user) = app.user() {
        println!("Welcome, {}.", user.name);
    }
    Ok(())
}

pub fn guest<S: KvStore>(app: &mut AppStore<S>) -> Result<()> {
    app.set_guest();
    ensure_saved(app)?;
    println!("Continuing as guest. Your data stays on this device.");
    Ok(())
}

pub fn logout<S: KvStore>(app: &mut AppStore<S>) -> Result<()> {
    app.logout();
    ensure_saved(app)?;
    println!("Signed out. Your data is kept for next time.");
    Ok(())
}

pub fn profile<S: KvStore>(cmd: ProfileCommand, app: &mut AppStore<S>) -> Result<()> {
    match cmd {
        ProfileCommand::Show => match app.user() {
            Some(user) => {
                println!("Name:  {}", user.name);
                if !user.email.is_empty() {
                    println!("Email: {}", user.email);
                }
                if let Some(style) = &user.productivity_style {
                    println!("Style: {style}");
                }
                println!("Mode:  {}", session_label(app));
            }
            None => println!("No profile yet. Run `balance login` or `balance guest`."),
        },
        ProfileCommand::Set { name, email, style } => {
            if name.is_none() && email.is_none() && style.is_none() {
                bail!("nothing to change; pass --name, --email or --style");
            }
            app.update_user(UserPatch {
                name,
                email,
                productivity_style: style,
            });
            ensure_saved(app)?;
            println!("Profile updated.");
        }
    }
    Ok(())
}

pub fn mood<S: KvStore>(cmd: MoodCommand, app: &mut AppStore<S>) -> Result<()> {
    match cmd {
        MoodCommand::Set { mood, energy } => {
            let snapshot = app.update_mood(mood, energy);
            ensure_saved(app)?;
            println!("Recorded: {}", mood_line(&snapshot));
        }
        MoodCommand::Show => println!("{}", mood_line(app.current_mood())),
        MoodCommand::History => {
            if app.mood_history().is_empty() {
                println!("No mood check-ins yet. Try `balance mood set calm 60`.");
            }
            for entry in app.mood_history() {
                println!(
                    "{}  {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    mood_line(entry)
                );
            }
        }
    }
    Ok(())
}

pub fn automation<S: KvStore>(app: &mut AppStore<S>) -> Result<()> {
    let enabled = app.toggle_automation();
    ensure_saved(app)?;
    println!("Automation {}.", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub fn mood_line(snapshot: &MoodSnapshot) -> String {
    format!("{} (energy {}%)", snapshot.mood, snapshot.energy)
}

pub fn session_label<S: KvStore>(app: &AppStore<S>) -> &'static str {
    match (app.is_authenticated(), app.is_guest()) {
        (true, true) => "guest",
        (true, false) => "signed in",
        (false, _) => "signed out",
    }
}
