//! Core types for Balance: entities, the ordered id-keyed collection, the
//! key/value persistence contract and the clock abstraction.
//! No I/O happens here; concrete storage lives in `balance-storage`.

pub mod clock;
pub mod collection;
pub mod insights;
pub mod journal;
pub mod mood;
pub mod reminders;
pub mod storage;
pub mod tasks;
pub mod user;
