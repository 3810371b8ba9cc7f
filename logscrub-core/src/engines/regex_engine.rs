// logscrub-core/src/engines/regex_engine.rs
//! A `ScrubEngine` implementation backed by the `regex` crate.
//! License: MIT OR APACHE 2.0

use log::debug;
use std::ops::Range;

use crate::compiler::{compile_rules, CompiledExpression, CompiledRules, CompiledStatement};
use crate::config::RuleSet;
use crate::debug_log::{log_group_value_debug, log_match_debug};
use crate::engine::ScrubEngine;
use crate::errors::ScrubError;
use crate::evaluation::{Evaluation, EvaluationResult, ABSENT_GROUP_VALUE};

#[derive(Debug)]
pub struct RegexEngine {
    compiled_rules: CompiledRules,
    rules: RuleSet,
}

impl RegexEngine {
    /// Compiles every active statement of `rules`; fails on the first broken file
    /// rather than evaluating a partial rule set.
    pub fn new(rules: RuleSet) -> Result<Self, ScrubError> {
        let compiled_rules = compile_rules(&rules)?;
        Ok(Self {
            compiled_rules,
            rules,
        })
    }

    fn evaluate_statement(statement: &CompiledStatement, mut buffer: String) -> (String, EvaluationResult) {
        let mut result = EvaluationResult::new();

        for expression in &statement.expressions {
            let spans = scan_expression(expression, &buffer, &mut result, statement.delete);
            if statement.delete && !spans.is_empty() {
                let before = buffer.len();
                buffer = remove_spans(&buffer, &spans);
                debug!(
                    "Expression '{}' removed {} span(s), {} byte(s).",
                    expression.display_name,
                    spans.len(),
                    before - buffer.len()
                );
            }
        }

        (buffer, result)
    }
}

/// Scans `buffer` for every non-overlapping match of `expression`, recording counts
/// and group values into `result`. Returns the matched spans when `collect_spans`.
fn scan_expression(
    expression: &CompiledExpression,
    buffer: &str,
    result: &mut EvaluationResult,
    collect_spans: bool,
) -> Vec<Range<usize>> {
    let mut spans = Vec::new();

    match &expression.group_names {
        None => {
            for m in expression.regex.find_iter(buffer) {
                log_match_debug(&expression.display_name, m.start(), m.end(), m.as_str());
                result.record(expression.id).record_match();
                if collect_spans {
                    spans.push(m.range());
                }
            }
        }
        Some(labels) => {
            for caps in expression.regex.captures_iter(buffer) {
                let Some(whole) = caps.get(0) else { continue };
                log_match_debug(&expression.display_name, whole.start(), whole.end(), whole.as_str());

                let outcome = result.record(expression.id);
                outcome.record_match();
                for (i, label) in labels.iter().enumerate() {
                    // A group that did not take part in this match is tallied as absent.
                    let value = caps.get(i + 1).map_or(ABSENT_GROUP_VALUE, |group| group.as_str());
                    log_group_value_debug(&expression.display_name, label, value);
                    outcome.record_group_value(label, value);
                }
                if collect_spans {
                    spans.push(whole.range());
                }
            }
        }
    }

    spans
}

/// Removes the given sorted, non-overlapping spans; nothing else changes.
fn remove_spans(buffer: &str, spans: &[Range<usize>]) -> String {
    let removed: usize = spans.iter().map(|s| s.len()).sum();
    let mut out = String::with_capacity(buffer.len() - removed);
    let mut last_end = 0usize;
    for span in spans {
        out.push_str(&buffer[last_end..span.start]);
        last_end = span.end;
    }
    out.push_str(&buffer[last_end..]);
    out
}

impl ScrubEngine for RegexEngine {
    fn evaluate(&self, buffer: String) -> Evaluation {
        let mut buffer = buffer;
        let mut results = Vec::with_capacity(self.compiled_rules.statements.len());

        for (index, statement) in self.compiled_rules.statements.iter().enumerate() {
            debug!(
                "Evaluating statement #{} ('{}'), delete={}, {} expression(s).",
                index + 1,
                statement.descriptive_name,
                statement.delete,
                statement.expressions.len()
            );
            let (next, result) = Self::evaluate_statement(statement, buffer);
            debug!(
                "Statement '{}' finished with {} occurrence(s).",
                statement.descriptive_name,
                result.total_occurrences()
            );
            buffer = next;
            results.push(result);
        }

        Evaluation { buffer, results }
    }

    fn rule_set(&self) -> &RuleSet { &self.rules }
}
