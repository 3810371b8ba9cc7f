// logscrub/src/lib.rs
//! # logscrub CLI Application
//!
//! Command-line front end for `logscrub-core`: reads a log file and a rule
//! definitions file, writes the scrubbed log, and prints what was found.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod summary;
pub mod ui;
pub mod utils;

pub use commands::scrub::{run_scrub, ScrubOptions, ScrubOutcome};
