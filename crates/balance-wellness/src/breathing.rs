use std::time::Duration;

use serde::Serialize;

const MIN_SCALE: f64 = 1.0;
const MAX_SCALE: f64 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// 6-2-6 pattern.
    pub const SEQUENCE: [Phase; 3] = [Phase::Inhale, Phase::Hold, Phase::Exhale];

    pub fn duration(&self) -> Duration {
        match self {
            Phase::Inhale => Duration::from_secs(6),
            Phase::Hold => Duration::from_secs(2),
            Phase::Exhale => Duration::from_secs(6),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Inhale => "Inhale",
            Phase::Hold => "Hold",
            Phase::Exhale => "Exhale",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Phase::Inhale => "Breathe in...",
            Phase::Hold => "Hold...",
            Phase::Exhale => "Breathe out...",
        }
    }
}

/// Paced breathing state driven by external ticks.
///
/// Time left over when a phase completes is dropped, so each phase starts
/// from zero on the tick after the previous one ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BreathingSession {
    active: bool,
    phase_index: usize,
    elapsed: Duration,
    cycles: u32,
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathingSession {
    pub fn new() -> Self {
        Self {
            active: false,
            phase_index: 0,
            elapsed: Duration::ZERO,
            cycles: 0,
        }
    }

    /// Begin at Inhale. Completed cycles are kept.
    pub fn start(&mut self) {
        self.active = true;
        self.phase_index = 0;
        self.elapsed = Duration::ZERO;
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance by `dt`. Returns the new phase when this tick crossed into one.
    pub fn tick(&mut self, dt: Duration) -> Option<Phase> {
        if !self.active {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed < self.phase().duration() {
            return None;
        }

        if self.phase() == Phase::Exhale {
            self.cycles += 1;
        }
        self.phase_index = (self.phase_index + 1) % Phase::SEQUENCE.len();
        self.elapsed = Duration::ZERO;
        Some(self.phase())
    }

    pub fn phase(&self) -> Phase {
        Phase::SEQUENCE[self.phase_index]
    }

    /// Percent of the current phase completed, 0..=100.
    pub fn progress(&self) -> f64 {
        let ratio = self.elapsed.as_secs_f64() / self.phase().duration().as_secs_f64();
        (ratio * 100.0).min(100.0)
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Circle scale: grows on inhale, holds, shrinks on exhale.
    pub fn scale(&self) -> f64 {
        let span = MAX_SCALE - MIN_SCALE;
        let done = self.progress() / 100.0;
        match self.phase() {
            Phase::Inhale => MIN_SCALE + done * span,
            Phase::Hold => MAX_SCALE,
            Phase::Exhale => MAX_SCALE - done * span,
        }
    }
}
