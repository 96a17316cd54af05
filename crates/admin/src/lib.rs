//! NutriPlanner Admin library.
//!
//! The back-office half of NutriPlanner: revenue and popularity reporting
//! derived from the shared order snapshot, the store-backed dish book the
//! admin edits, and the dashboard facade that advances orders through the
//! delivery stages.
//!
//! Reporting is pure functions over order lines; the dashboard owns the
//! only mutable state (the loaded snapshots plus two ephemeral bits of UI
//! state, the page cursor and the view toggle).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod dashboard;
pub mod dishes;
pub mod reporting;
