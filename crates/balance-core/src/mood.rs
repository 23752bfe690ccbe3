use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most recent snapshots kept in the mood history.
pub const MOOD_HISTORY_LIMIT: usize = 7;

/// Energy level a fresh store starts with.
pub const DEFAULT_ENERGY: u8 = 50;

/// Self-reported mood label.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Calm,
    Stressed,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Calm, Mood::Stressed, Mood::Tired];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Stressed => "stressed",
            Mood::Tired => "tired",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood `{0}` (expected happy, calm, stressed or tired)")]
pub struct ParseMoodError(String);

impl FromStr for Mood {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseMoodError(s.to_string()))
    }
}

/// Timestamped (mood, energy) pair. Energy is nominally 0..=100; front ends
/// enforce the range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodSnapshot {
    pub mood: Mood,
    pub energy: u8,
    pub timestamp: DateTime<Utc>,
}

impl MoodSnapshot {
    pub fn new(mood: Mood, energy: u8, timestamp: DateTime<Utc>) -> Self {
        Self {
            mood,
            energy,
            timestamp,
        }
    }

    /// Starting mood for a brand-new store.
    pub fn initial(timestamp: DateTime<Utc>) -> Self {
        Self::new(Mood::Calm, DEFAULT_ENERGY, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Stressed".parse::<Mood>(), Ok(Mood::Stressed));
        assert_eq!(" calm ".parse::<Mood>(), Ok(Mood::Calm));
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Mood::Happy).expect("serialize");
        assert_eq!(json, "\"happy\"");
    }
}
