//! Command implementations.

pub mod scrub;
