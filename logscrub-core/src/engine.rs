// logscrub-core/src/engine.rs
//! Defines the core `ScrubEngine` trait.
//!
//! An engine takes ownership of a text buffer, runs the active statements of its rule
//! set against it strictly in order, and hands back the final buffer together with
//! one result per evaluated statement.
//!
//! License: MIT OR APACHE 2.0

use crate::config::RuleSet;
use crate::evaluation::Evaluation;

/// A trait that defines the core functionality of a scrubbing engine.
///
/// Construction is where configuration errors surface. Once an engine exists its
/// rules are known to compile, so evaluation itself cannot fail.
pub trait ScrubEngine {
    /// Evaluates every active statement against `buffer`.
    ///
    /// Statements run in definition order, and expressions within a statement run in
    /// definition order. Deletions made by a delete-flagged statement are visible to
    /// every later expression, including later expressions of the same statement.
    fn evaluate(&self, buffer: String) -> Evaluation;

    /// Returns the rule set the engine was built from.
    fn rule_set(&self) -> &RuleSet;
}
