//! File and text helpers used by the scrub command.

pub mod files;
