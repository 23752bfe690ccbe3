mod breathe;
mod cli;
mod config;
mod ids;
mod journal;
mod reminders;
mod report;
mod session;
mod storage;
mod tasks;

use crate::cli::{Command, ConfigCommand};
use balance_core::storage::KvStore;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Version => print_version(),
        Command::Health => run_health_check(&config)?,
        Command::Config(ConfigCommand::Init) => init_config(&config)?,
        Command::Breathe { cycles } => breathe::run(cycles).await?,
        command => run_with_app(command, &config)?,
    }

    Ok(())
}

fn init_tracing() {
    // RUST_LOG wins; default to info. Logs go to stderr so command output stays clean.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Commands that read or change the stored app state.
fn run_with_app(command: Command, config: &config::Config) -> Result<()> {
    let mut app = storage::open_app(config)?;
    match command {
        Command::Dashboard => report::dashboard(&app),
        Command::Login { name, email } => session::login(&mut app, name, email)?,
        Command::Guest => session::guest(&mut app)?,
        Command::Logout => session::logout(&mut app)?,
        Command::Profile(cmd) => session::profile(cmd, &mut app)?,
        Command::Mood(cmd) => session::mood(cmd, &mut app)?,
        Command::Automation => session::automation(&mut app)?,
        Command::Task(cmd) => tasks::handle(cmd, &mut app)?,
        Command::Reminder(cmd) => reminders::handle(cmd, &mut app)?,
        Command::Journal(cmd) => {
            let mut companion = journal::companion_from_config(config);
            journal::handle(cmd, &mut app, &mut companion)?
        }
        Command::Insights => report::insights(&app),
        Command::Stats { days } => report::stats(&app, days),
        Command::Agenda => report::agenda(&app),
        Command::Version
        | Command::Health
        | Command::Breathe { .. }
        | Command::Config(_) => {}
    }
    Ok(())
}

fn print_version() {
    println!("balance {}", env!("CARGO_PKG_VERSION"));
}

/// Quick put/get/delete probe of the configured storage.
fn run_health_check(config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    run_store_health(&store)?;
    println!(
        "Storage: ok ({})",
        storage::resolve_data_dir(config)?.display()
    );
    Ok(())
}

fn run_store_health<S: KvStore + ?Sized>(store: &S) -> Result<()> {
    let probe_key = "health/probe";
    let payload = b"ok";
    store
        .put(probe_key, payload)
        .map_err(|e| eyre!(e.to_string()))?;
    let round_trip = store.get(probe_key).map_err(|e| eyre!(e.to_string()))?;
    store.delete(probe_key).map_err(|e| eyre!(e.to_string()))?;

    if round_trip != payload {
        color_eyre::eyre::bail!("storage round-trip failed");
    }
    if store.get(probe_key).is_ok() {
        color_eyre::eyre::bail!("storage probe was not deleted");
    }
    Ok(())
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}
