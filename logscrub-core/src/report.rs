//! Report rendering for evaluation results.
//!
//! Rendering is pure: it only reads the statement definitions and their results, so
//! reports can be produced from hand-built fixtures without running an engine.
//!
//! A block looks like this:
//!
//! ```text
//! Logins
//! 3 [user]
//! 	user: {alice=2, bob=1}
//! Timeouts not found
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{RuleSet, StatementDefinition};
use crate::evaluation::{EvaluationResult, ExpressionId};

/// Formats a value histogram as `{value=count, value=count}` in value order.
pub fn format_histogram(values: Option<&BTreeMap<String, usize>>) -> String {
    let entries: Vec<String> = values
        .into_iter()
        .flatten()
        .map(|(value, count)| format!("{}={}", value, count))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// Renders the block for one statement. Every line ends with a newline.
pub fn render(statement: &StatementDefinition, result: &EvaluationResult) -> String {
    let mut out = String::new();
    out.push_str(&statement.descriptive_name);
    out.push('\n');

    for (index, expression) in statement.expressions.iter().enumerate() {
        let display_name = expression.display_name();
        match result.outcome(ExpressionId::new(index)) {
            None => out.push_str(&format!("{} not found\n", display_name)),
            Some(outcome) => {
                out.push_str(&format!("{} {}\n", outcome.occurrences(), display_name));
                if let Some(labels) = &expression.group_names {
                    for label in labels {
                        out.push_str(&format!(
                            "\t{}: {}\n",
                            label,
                            format_histogram(outcome.values_for(label))
                        ));
                    }
                }
            }
        }
    }

    out
}

/// Renders one block per evaluated statement, separated by a blank line.
///
/// `results` pairs positionally with the active statements of `rules`; extra entries
/// on either side are ignored.
pub fn render_report(rules: &RuleSet, results: &[EvaluationResult]) -> String {
    rules
        .active_statements()
        .zip(results)
        .map(|(statement, result)| render(statement, result))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Structured per-expression summary, used for machine-readable exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpressionSummary {
    pub display_name: String,
    pub pattern: String,
    pub occurrences: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, BTreeMap<String, usize>>>,
}

/// Structured per-statement summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementSummary {
    pub descriptive_name: String,
    pub delete: bool,
    pub expressions: Vec<ExpressionSummary>,
}

/// Builds the structured counterpart of [`render_report`].
///
/// Expressions without matches report zero occurrences. When group names are declared,
/// every label appears, with an empty histogram if nothing was captured for it.
pub fn summarize(rules: &RuleSet, results: &[EvaluationResult]) -> Vec<StatementSummary> {
    rules
        .active_statements()
        .zip(results)
        .map(|(statement, result)| StatementSummary {
            descriptive_name: statement.descriptive_name.clone(),
            delete: statement.delete,
            expressions: statement
                .expressions
                .iter()
                .enumerate()
                .map(|(index, expression)| {
                    let outcome = result.outcome(ExpressionId::new(index));
                    ExpressionSummary {
                        display_name: expression.display_name(),
                        pattern: expression.pattern.clone(),
                        occurrences: outcome.map_or(0, |o| o.occurrences()),
                        groups: expression.group_names.as_ref().map(|labels| {
                            labels
                                .iter()
                                .map(|label| {
                                    let values = outcome
                                        .and_then(|o| o.values_for(label))
                                        .cloned()
                                        .unwrap_or_default();
                                    (label.clone(), values)
                                })
                                .collect()
                        }),
                    }
                })
                .collect(),
        })
        .collect()
}
