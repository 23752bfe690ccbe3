use balance_core::{
    mood::Mood,
    tasks::{Priority, TaskStatus, Urgency},
};
use balance_state::analytics::DEFAULT_WINDOW_DAYS;
use clap::{Parser, Subcommand};

/// Longest activity window `stats` accepts.
pub const MAX_STATS_DAYS: u32 = 366;

/// CLI surface definition.
#[derive(Parser, Debug)]
#[command(
    name = "balance",
    about = "Local-first tasks, mood and journal companion",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to the dashboard when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current mood, insights and task counts.
    Dashboard,
    /// Sign in with a local profile (no password, nothing leaves this machine).
    Login {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Continue as a guest.
    Guest,
    /// End the session; the profile is kept.
    Logout,
    /// View or edit the profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Record or review mood and energy.
    #[command(subcommand)]
    Mood(MoodCommand),
    /// Manage tasks.
    #[command(subcommand)]
    Task(TaskCommand),
    /// Manage reminders.
    #[command(subcommand)]
    Reminder(ReminderCommand),
    /// Write and review journal entries.
    #[command(subcommand)]
    Journal(JournalCommand),
    /// Show suggestions derived from tasks and mood.
    Insights,
    /// Task and mood statistics.
    Stats {
        /// Days covered by the activity series, up to a year.
        #[arg(
            long,
            default_value_t = DEFAULT_WINDOW_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_STATS_DAYS))
        )]
        days: u32,
    },
    /// Upcoming dated tasks and reminders, grouped by day.
    Agenda,
    /// Toggle the automation preference.
    Automation,
    /// Guided 6-2-6 breathing exercise.
    Breathe {
        /// Number of full cycles to run.
        #[arg(long, default_value_t = 3)]
        cycles: u32,
    },
    /// Print version and exit.
    Version,
    /// Run a health check against the storage backend.
    Health,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    Show,
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Free-form productivity style, e.g. `calm` or `focused`.
        #[arg(long)]
        style: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MoodCommand {
    /// Record how you feel right now.
    Set {
        /// happy, calm, stressed or tired
        mood: Mood,
        /// Energy from 0 to 100.
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        energy: u8,
    },
    Show,
    History,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    List {
        /// Only show tasks with this status.
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Due date, YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        /// important or not-important
        #[arg(long)]
        priority: Option<Priority>,
        /// now or later
        #[arg(long)]
        urgency: Option<Urgency>,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        urgency: Option<Urgency>,
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Mark a task in progress.
    Start { id: String },
    /// Mark a task completed.
    Done { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReminderCommand {
    List,
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        /// Create the reminder switched off.
        #[arg(long)]
        disabled: bool,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },
    Toggle { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum JournalCommand {
    List,
    /// Save an entry and get a companion reply.
    Write {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    Edit {
        id: String,
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dashboard_when_missing_subcommand() {
        let cli = Cli::try_parse_from(["balance"]).expect("parse should succeed");
        assert_eq!(cli.command, None);
    }

    #[test]
    fn parses_mood_set() {
        let cli = Cli::try_parse_from(["balance", "mood", "set", "stressed", "40"])
            .expect("parse should succeed");
        assert_eq!(
            cli.command,
            Some(Command::Mood(MoodCommand::Set {
                mood: Mood::Stressed,
                energy: 40
            }))
        );
    }

    #[test]
    fn rejects_energy_above_hundred() {
        assert!(Cli::try_parse_from(["balance", "mood", "set", "happy", "101"]).is_err());
        assert!(Cli::try_parse_from(["balance", "mood", "set", "grumpy", "50"]).is_err());
    }

    #[test]
    fn parses_task_add_with_labels() {
        let cli = Cli::try_parse_from([
            "balance",
            "task",
            "add",
            "File taxes",
            "--date",
            "2026-04-15",
            "--priority",
            "important",
            "--urgency",
            "now",
        ])
        .expect("parse should succeed");
        assert_eq!(
            cli.command,
            Some(Command::Task(TaskCommand::Add {
                title: "File taxes".into(),
                description: None,
                date: Some("2026-04-15".into()),
                time: None,
                priority: Some(Priority::Important),
                urgency: Some(Urgency::Now),
            }))
        );
    }

    #[test]
    fn journal_write_collects_words() {
        let cli = Cli::try_parse_from(["balance", "journal", "write", "feeling", "calm", "today"])
            .expect("parse should succeed");
        assert_eq!(
            cli.command,
            Some(Command::Journal(JournalCommand::Write {
                text: vec!["feeling".into(), "calm".into(), "today".into()]
            }))
        );
    }

    #[test]
    fn parses_stats_default_window() {
        let cli = Cli::try_parse_from(["balance", "stats"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Stats { days: 5 }));
    }

    #[test]
    fn stats_window_is_bounded() {
        let cli = Cli::try_parse_from(["balance", "stats", "--days", "366"])
            .expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Stats { days: MAX_STATS_DAYS }));
        assert!(Cli::try_parse_from(["balance", "stats", "--days", "367"]).is_err());
        assert!(Cli::try_parse_from(["balance", "stats", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["balance", "stats", "--days", "4000000000"]).is_err());
    }

    #[test]
    fn parses_config_init_subcommand() {
        let cli =
            Cli::try_parse_from(["balance", "config", "init"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Config(ConfigCommand::Init)));
    }
}
