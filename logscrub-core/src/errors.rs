//! errors.rs - Custom error types for the logscrub-core library.
//!
//! Configuration problems (bad patterns, mismatched group labels) are fatal for a run,
//! so every variant carries enough context to locate the offending statement and
//! expression in the definitions file.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `logscrub-core` library.
///
/// Statement and expression numbers are 1-based positions in the definitions file.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream `match` statements.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScrubError {
    #[error("Statement #{statement_number} ('{statement}'), expression #{expression_number} ('{expression}'): failed to compile pattern: {source}")]
    PatternCompilation {
        statement_number: usize,
        statement: String,
        expression_number: usize,
        expression: String,
        #[source]
        source: regex::Error,
    },

    #[error("Statement #{statement_number} ('{statement}'), expression #{expression_number} ('{expression}'): {declared} group name(s) declared but the pattern has {actual} capture group(s)")]
    GroupCountMismatch {
        statement_number: usize,
        statement: String,
        expression_number: usize,
        expression: String,
        declared: usize,
        actual: usize,
    },

    #[error("Failed to parse rule definitions: {0}")]
    DefinitionsParse(String),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
