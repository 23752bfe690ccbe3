//! Wellness helpers that need no storage: the journal companion and the
//! breathing-exercise session.

pub mod breathing;
pub mod companion;
