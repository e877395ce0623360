//! Use-case helpers layered over the store snapshot.
//!
//! - `backup`: JSON export/import and clear-all.
//! - `filters`: per-module list filters.
//! - `notes`: previews, tag input, note filters.
//! - `planning`: upcoming items, week, month and year views.
//! - `pomodoro`: countdown state machine.
//! - `stats`: per-module summaries.

pub mod backup;
pub mod filters;
pub mod notes;
pub mod planning;
pub mod pomodoro;
pub mod stats;
