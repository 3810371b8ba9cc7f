//! This file defines the command-line interface (CLI) for the logscrub application.
//! License: MIT OR Apache-2.0

use clap::Parser;
use std::path::PathBuf;

macro_rules! sample_definitions {
    () => {
        r#"[
  {
    "descriptiveName": "Heartbeats",
    "delete": true,
    "expressions": [
      { "name": "heartbeat lines", "regex": "^.*heartbeat.*\\n" }
    ]
  },
  {
    "descriptiveName": "Logins",
    "expressions": [
      { "regex": "user=(\\w+) ip=([\\d.]+)", "groupNames": ["user", "ip"] }
    ]
  }
]"#
    };
}

/// Example definitions file shown in the usage text.
pub const SAMPLE_DEFINITIONS: &str = sample_definitions!();

const AFTER_HELP: &str = concat!(
    "The definitions file is a JSON (or YAML, by .yaml/.yml extension) list of statements:\n\n",
    sample_definitions!(),
    "\n\nMultiple expressions can be given for each descriptiveName and multiple groups may be\n",
    "named for each expression. Expression name and groupNames are optional. The delete flag\n",
    "removes every match from the file. Patterns are multi-line and case-insensitive.\n",
    "Evaluation stops at the first null entry in the list."
);

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "logscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remove repeatable noise from a log file and report what was found",
    after_help = AFTER_HELP,
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Path to the file to process.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Path of the scrubbed file to create. Overwritten if it exists; parent directories are created.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Path to the rule definitions file.
    #[arg(value_name = "DEFINITIONS")]
    pub definitions: PathBuf,

    /// Disable all logging output.
    #[arg(long, short = 'q', conflicts_with = "debug")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Do not print the report to stdout.
    #[arg(long = "no-summary")]
    pub no_summary: bool,

    /// Also write a JSON run summary to this file.
    #[arg(long = "json-file", value_name = "FILE")]
    pub json_file: Option<PathBuf>,

    /// Strip ANSI escape sequences from the source before evaluation.
    #[arg(long = "strip-ansi")]
    pub strip_ansi: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_three_positionals() {
        let cli = Cli::try_parse_from(["logscrub", "in.log", "out/clean.log", "rules.json"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("in.log"));
        assert_eq!(cli.output, PathBuf::from("out/clean.log"));
        assert_eq!(cli.definitions, PathBuf::from("rules.json"));
        assert!(!cli.strip_ansi);
        assert!(cli.json_file.is_none());
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(Cli::try_parse_from(["logscrub", "in.log", "out.log"]).is_err());
        assert!(Cli::try_parse_from(["logscrub", "a", "b", "c", "d"]).is_err());
    }

    #[test]
    fn sample_definitions_parse() {
        let rules = logscrub_core::RuleSet::from_json_str(SAMPLE_DEFINITIONS).unwrap();
        assert_eq!(rules.active_len(), 2);
        assert!(logscrub_core::RegexEngine::new(rules).is_ok());
    }
}
