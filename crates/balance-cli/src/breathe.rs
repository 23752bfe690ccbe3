use std::{io::Write, time::Duration};

use balance_wellness::breathing::{BreathingSession, Phase};
use color_eyre::Result;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// Step applied to the session on every tick.
pub const TICK: Duration = Duration::from_millis(50);

/// Run a paced session in real time on stdout.
pub async fn run(cycles: u32) -> Result<()> {
    drive(cycles, TICK, &mut std::io::stdout()).await
}

/// Drive a session for `cycles` full cycles, waking every `period`.
///
/// The session always advances by [`TICK`]; a shorter `period` only speeds up
/// the wall clock.
pub async fn drive<W: Write>(cycles: u32, period: Duration, out: &mut W) -> Result<()> {
    if cycles == 0 {
        writeln!(out, "Nothing to do: pass --cycles 1 or more.")?;
        return Ok(());
    }

    let mut session = BreathingSession::new();
    session.start();
    writeln!(out, "6-2-6 breathing, {cycles} cycle(s). Ctrl-C to stop.")?;
    announce(out, session.phase())?;

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match session.tick(TICK) {
            Some(phase) => {
                writeln!(out)?;
                if session.cycles() >= cycles {
                    debug!(cycles = session.cycles(), "breathing session finished");
                    break;
                }
                announce(out, phase)?;
            }
            None => {
                write!(out, "\r  {}", gauge(&session))?;
                out.flush()?;
            }
        }
    }

    session.pause();
    writeln!(out, "Done. {} cycle(s) completed.", session.cycles())?;
    Ok(())
}

fn announce<W: Write>(out: &mut W, phase: Phase) -> std::io::Result<()> {
    writeln!(
        out,
        "{} ({}s): {}",
        phase.name(),
        phase.duration().as_secs(),
        phase.prompt()
    )
}

/// Circle size as a row of dots plus the phase percentage.
fn gauge(session: &BreathingSession) -> String {
    let dots = (session.scale() * 10.0).round() as usize;
    format!("{:<18} {:>3.0}%", "●".repeat(dots), session.progress())
}
