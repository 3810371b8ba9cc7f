// logscrub-core/src/lib.rs
//! # logscrub Core Library
//!
//! `logscrub-core` removes repeatable noise from log text with a declarative set of
//! named regex rules, while keeping statistics about what was removed or counted.
//! It performs no I/O: callers hand in a buffer and a rule set and get back the
//! scrubbed buffer plus one result per statement.
//!
//! ## Modules
//!
//! * `config`: The rule-set model (`RuleSet`, `StatementDefinition`, `ExpressionDefinition`) and JSON/YAML loading.
//! * `compiler`: Compiles active statements into regexes and validates group labels.
//! * `engine`: Defines the `ScrubEngine` trait.
//! * `engines`: Concrete `ScrubEngine` implementations.
//! * `evaluation`: Per-statement results (`EvaluationResult`, `ExpressionOutcome`).
//! * `report`: Deterministic text rendering and structured summaries.
//! * `headless`: One-call helpers.
//! * `errors`: The `ScrubError` type.
//!
//! ## Evaluation order
//!
//! Statements run in definition order and stop at the first null entry of the rule
//! list. Expressions run in definition order against the buffer as it currently
//! stands, so deletions made by a delete-flagged statement are visible to every later
//! expression.
//!
//! ## Usage Example
//!
//! ```rust
//! use logscrub_core::{headless_scrub_string, ExpressionDefinition, RuleSet, StatementDefinition};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let rules = RuleSet::from_statements(vec![
//!         StatementDefinition::new("Logins").with_expression(
//!             ExpressionDefinition::new(r"user=(\w+)").with_group_names(["user"]),
//!         ),
//!     ]);
//!
//!     let (scrubbed, report) = headless_scrub_string(rules, "user=alice\nuser=bob\nuser=alice\n")?;
//!     assert_eq!(scrubbed, "user=alice\nuser=bob\nuser=alice\n");
//!     assert_eq!(report, "Logins\n3 [user]\n\tuser: {alice=2, bob=1}\n");
//!     Ok(())
//! }
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod compiler;
pub mod config;
pub mod debug_log;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod evaluation;
pub mod headless;
pub mod report;

/// Re-exports the rule-set model.
pub use config::{
    DefinitionsFormat,
    ExpressionDefinition,
    RuleSet,
    StatementDefinition,
    DEFAULT_DISPLAY_NAME,
};

/// Re-exports the custom error type.
pub use errors::ScrubError;

pub use engine::ScrubEngine;
pub use engines::regex_engine::RegexEngine;

/// Re-exports evaluation results.
pub use evaluation::{
    Evaluation, EvaluationResult, ExpressionId, ExpressionOutcome, ABSENT_GROUP_VALUE,
};

/// Re-exports report rendering.
pub use report::{render, render_report, summarize, ExpressionSummary, StatementSummary};

pub use headless::{evaluate, headless_scrub_string};

pub use compiler::{compile_rules, CompiledExpression, CompiledRules, CompiledStatement};
