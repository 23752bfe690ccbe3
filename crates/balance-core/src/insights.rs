use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Info,
    Success,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Info => "info",
            InsightKind::Success => "success",
        }
    }
}

/// Advisory message derived from tasks and mood. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
