//! Scrub command: applies a definitions file to a source file and writes the result.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

use logscrub_core::{render_report, summarize, RegexEngine, RuleSet, ScrubEngine};

use crate::summary::RunSummary;
use crate::ui::output_format;
use crate::utils::files::{count_lines, read_source, sha256_hex, strip_ansi, write_output};

/// Options for a single scrub run.
#[derive(Debug, Clone)]
pub struct ScrubOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub definitions: PathBuf,
    pub strip_ansi: bool,
    pub no_summary: bool,
    pub json_file: Option<PathBuf>,
}

/// What a run produced, for callers that want more than the printed report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubOutcome {
    pub report: String,
    pub lines_before: usize,
    pub lines_after: usize,
}

impl ScrubOutcome {
    pub fn lines_removed(&self) -> usize {
        self.lines_before.saturating_sub(self.lines_after)
    }

    /// The report followed by the line statistics.
    pub fn full_report(&self) -> String {
        format!(
            "{}\n{} lines removed. {} lines remaining.",
            self.report,
            self.lines_removed(),
            self.lines_after
        )
    }
}

/// Helper for printing informational messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Runs one scrub and writes the report to `writer` unless `no_summary` is set.
///
/// Nothing is written to the output path unless the source and definitions exist and
/// every pattern compiles.
pub fn run_scrub<W: Write>(opts: &ScrubOptions, writer: &mut W) -> Result<ScrubOutcome> {
    info!("Starting scrub of {}.", opts.source.display());

    if !opts.source.exists() {
        bail!("Invalid file specified: {}", opts.source.display());
    }
    if !opts.definitions.exists() {
        bail!("Invalid file specified: {}", opts.definitions.display());
    }

    let rules = RuleSet::load_from_file(&opts.definitions)?;
    if rules.truncated_statements() > 0 {
        warn_msg(format!(
            "{} statement(s) after a null entry in {} were not evaluated.",
            rules.truncated_statements(),
            opts.definitions.display()
        ));
    }
    let engine = RegexEngine::new(rules)
        .with_context(|| format!("Invalid rule definitions in {}", opts.definitions.display()))?;

    let mut content = read_source(&opts.source)?;
    if opts.strip_ansi {
        content = strip_ansi(&content);
        debug!("ANSI escape sequences stripped from source.");
    }
    let lines_before = count_lines(&content);
    let input_sha256 = opts.json_file.as_ref().map(|_| sha256_hex(&content));

    let evaluation = engine.evaluate(content);
    write_output(&opts.output, &evaluation.buffer)?;
    let lines_after = count_lines(&evaluation.buffer);

    let outcome = ScrubOutcome {
        report: render_report(engine.rule_set(), &evaluation.results),
        lines_before,
        lines_after,
    };
    debug!(
        "Scrub finished. Lines before: {}, lines after: {}.",
        lines_before, lines_after
    );

    if let (Some(path), Some(input_sha256)) = (&opts.json_file, input_sha256) {
        let summary = RunSummary::new(
            &opts.source,
            &opts.output,
            &opts.definitions,
            input_sha256,
            sha256_hex(&evaluation.buffer),
            lines_before,
            lines_after,
            summarize(engine.rule_set(), &evaluation.results),
        );
        summary.write_to(path)?;
        info_msg(format!("Run summary written to {}", path.display()));
    }

    if !opts.no_summary {
        writeln!(writer, "{}", outcome.full_report()).context("Failed to write report")?;
    }

    info!("Scrub completed.");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn options(dir: &std::path::Path, definitions: &str, source: &str) -> Result<ScrubOptions> {
        let source_path = dir.join("app.log");
        let definitions_path = dir.join("rules.json");
        fs::write(&source_path, source)?;
        fs::write(&definitions_path, definitions)?;
        Ok(ScrubOptions {
            source: source_path,
            output: dir.join("out").join("app.clean.log"),
            definitions: definitions_path,
            strip_ansi: false,
            no_summary: false,
            json_file: None,
        })
    }

    #[test_log::test]
    fn report_ends_with_line_statistics() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let opts = options(
            dir.path(),
            r#"[{ "descriptiveName": "Errors", "delete": true,
                  "expressions": [ { "name": "Errors", "regex": "^ERROR:.*\\n" } ] }]"#,
            "ERROR: timeout\nINFO: ok\n",
        )?;
        let mut printed = Vec::new();
        let outcome = run_scrub(&opts, &mut printed)?;

        assert_eq!(fs::read_to_string(&opts.output)?, "INFO: ok\n");
        assert_eq!(outcome.lines_removed(), 1);
        assert_eq!(
            String::from_utf8(printed)?,
            "Errors\n1 Errors\n\n1 lines removed. 1 lines remaining.\n"
        );
        Ok(())
    }

    #[test]
    fn no_summary_prints_nothing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut opts = options(
            dir.path(),
            r#"[{ "descriptiveName": "Count", "expressions": [ { "regex": "ok" } ] }]"#,
            "ok\n",
        )?;
        opts.no_summary = true;
        let mut printed = Vec::new();
        run_scrub(&opts, &mut printed)?;
        assert!(printed.is_empty());
        assert_eq!(fs::read_to_string(&opts.output)?, "ok\n");
        Ok(())
    }

    #[test]
    fn missing_source_writes_nothing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut opts = options(dir.path(), "[]", "")?;
        opts.source = dir.path().join("absent.log");
        let err = run_scrub(&opts, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Invalid file specified"));
        assert!(!opts.output.exists());
        Ok(())
    }

    #[test]
    fn broken_pattern_writes_nothing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let opts = options(
            dir.path(),
            r#"[{ "descriptiveName": "Broken", "delete": true, "expressions": [ { "regex": "(" } ] }]"#,
            "text\n",
        )?;
        let err = run_scrub(&opts, &mut Vec::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("Statement #1 ('Broken')"));
        assert!(!opts.output.exists());
        Ok(())
    }
}
