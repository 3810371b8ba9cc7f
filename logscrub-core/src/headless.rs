// File: logscrub-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for running the engine in one call, without a CLI.

use anyhow::Result;

use crate::config::RuleSet;
use crate::engine::ScrubEngine;
use crate::engines::regex_engine::RegexEngine;
use crate::errors::ScrubError;
use crate::evaluation::Evaluation;
use crate::report::render_report;

/// Compiles `rules` and evaluates them against `buffer`.
///
/// The buffer is moved in and the final buffer is returned inside the `Evaluation`.
/// Any configuration error aborts before the buffer is scanned.
pub fn evaluate(buffer: String, rules: &RuleSet) -> Result<Evaluation, ScrubError> {
    let engine = RegexEngine::new(rules.clone())?;
    Ok(engine.evaluate(buffer))
}

/// Scrubs `content` and renders the report.
///
/// Returns `(scrubbed_content, report)`.
pub fn headless_scrub_string(rules: RuleSet, content: &str) -> Result<(String, String)> {
    let engine = RegexEngine::new(rules)?;
    let evaluation = engine.evaluate(content.to_string());
    let report = render_report(engine.rule_set(), &evaluation.results);
    Ok((evaluation.buffer, report))
}
