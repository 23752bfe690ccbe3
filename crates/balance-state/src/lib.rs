//! Application state for Balance: the store controller with its actions and
//! write-through persistence, plus the derived reads (insights, analytics,
//! agenda) computed from a snapshot.

pub mod agenda;
pub mod analytics;
pub mod insights;
pub mod snapshot;
pub mod store;

pub use snapshot::Snapshot;
pub use store::{AppStore, STATE_KEY};
