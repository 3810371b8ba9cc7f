//! compiler.rs - Compiles a `RuleSet` into ready-to-run regular expressions.
//!
//! Every active statement is compiled up front so that a broken definitions file
//! aborts the run before the buffer is touched. All compile errors are collected and
//! reported together.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{ExpressionDefinition, RuleSet, StatementDefinition};
use crate::errors::ScrubError;
use crate::evaluation::ExpressionId;

/// Upper bound on the compiled size of a single pattern.
pub const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// One expression with its compiled regex.
#[derive(Debug)]
pub struct CompiledExpression {
    pub id: ExpressionId,
    pub regex: Regex,
    pub display_name: String,
    /// Labels for capture groups 1..=n, or `None` if groups are not recorded.
    pub group_names: Option<Vec<String>>,
}

/// A statement whose expressions are all compiled.
#[derive(Debug)]
pub struct CompiledStatement {
    pub descriptive_name: String,
    pub delete: bool,
    pub expressions: Vec<CompiledExpression>,
}

/// Compiled form of the active statements of a `RuleSet`, in order.
#[derive(Debug)]
pub struct CompiledRules {
    pub statements: Vec<CompiledStatement>,
}

/// Builds a regex with the engine's fixed semantics: `^`/`$` match at line
/// boundaries (`\r\n` aware) and matching ignores case.
pub fn build_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .case_insensitive(true)
        .crlf(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
}

/// Compiles one expression and checks its group labels against the pattern.
///
/// `statement_index` and `expression_index` are zero-based; errors report them 1-based.
pub fn compile_expression(
    statement_index: usize,
    statement: &StatementDefinition,
    expression_index: usize,
    expression: &ExpressionDefinition,
) -> Result<CompiledExpression, ScrubError> {
    let display_name = expression.display_name();
    let regex = build_regex(&expression.pattern).map_err(|source| ScrubError::PatternCompilation {
        statement_number: statement_index + 1,
        statement: statement.descriptive_name.clone(),
        expression_number: expression_index + 1,
        expression: display_name.clone(),
        source,
    })?;

    if let Some(labels) = &expression.group_names {
        // Group 0 is the whole match.
        let actual = regex.captures_len() - 1;
        if labels.len() != actual {
            return Err(ScrubError::GroupCountMismatch {
                statement_number: statement_index + 1,
                statement: statement.descriptive_name.clone(),
                expression_number: expression_index + 1,
                expression: display_name,
                declared: labels.len(),
                actual,
            });
        }
    }

    debug!(
        target: "logscrub_core::compiler",
        "Expression '{}' of statement '{}' compiled successfully.",
        display_name, statement.descriptive_name
    );

    Ok(CompiledExpression {
        id: ExpressionId::new(expression_index),
        regex,
        display_name,
        group_names: expression.group_names.clone(),
    })
}

/// Compiles every active statement of `rules`.
///
/// Statements after the first null entry are neither compiled nor validated.
pub fn compile_rules(rules: &RuleSet) -> Result<CompiledRules, ScrubError> {
    debug!("Starting compilation of {} statement(s).", rules.active_len());

    let mut statements = Vec::new();
    let mut compilation_errors = Vec::new();

    for (statement_index, statement) in rules.active_statements().enumerate() {
        let mut expressions = Vec::with_capacity(statement.expressions.len());
        for (expression_index, expression) in statement.expressions.iter().enumerate() {
            match compile_expression(statement_index, statement, expression_index, expression) {
                Ok(compiled) => expressions.push(compiled),
                Err(e) => compilation_errors.push(e),
            }
        }
        statements.push(CompiledStatement {
            descriptive_name: statement.descriptive_name.clone(),
            delete: statement.delete,
            expressions,
        });
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ScrubError::Fatal(format!(
            "Failed to compile {} expression(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!(
            "Finished compiling rules. Total statements compiled: {}.",
            statements.len()
        );
        Ok(CompiledRules { statements })
    }
}
