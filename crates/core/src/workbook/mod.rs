//! Application state for one bookkeeping session.
//!
//! The workbook owns the chart and the journal the user is editing and
//! re-runs the report pipeline on every read; nothing is cached.

pub mod state;

pub use state::Workbook;
