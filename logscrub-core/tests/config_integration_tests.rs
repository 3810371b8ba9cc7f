// logscrub-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::Builder;

use logscrub_core::{evaluate, render_report, RegexEngine, RuleSet, ScrubError};

fn write_definitions(suffix: &str, content: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = Builder::new().suffix(suffix).tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_json_definitions() -> Result<()> {
    let json = r#"[
  {
    "descriptiveName": "Session noise",
    "delete": true,
    "expressions": [
      { "name": "keepalive", "regex": "^.*keepalive.*\\n" },
      { "regex": "session=(\\w+) state=(\\w+)", "groupNames": ["session", "state"] }
    ]
  },
  { "descriptiveName": "Errors", "expressions": [ { "regex": "^ERROR.*$" } ] }
]"#;
    let file = write_definitions(".json", json)?;
    let rules = RuleSet::load_from_file(file.path())?;

    assert_eq!(rules.active_len(), 2);
    let first = rules.active_statements().next().unwrap();
    assert_eq!(first.descriptive_name, "Session noise");
    assert!(first.delete);
    assert_eq!(first.expressions.len(), 2);
    assert_eq!(first.expressions[0].name.as_deref(), Some("keepalive"));
    assert_eq!(
        first.expressions[1].group_names,
        Some(vec!["session".to_string(), "state".to_string()])
    );
    Ok(())
}

#[test]
fn test_load_yaml_definitions() -> Result<()> {
    let yaml = r#"
- descriptiveName: Logins
  expressions:
    - name: logins
      regex: 'user=(\w+)'
      groupNames: [user]
- descriptiveName: Debug lines
  delete: true
  expressions:
    - pattern: '^DEBUG.*\n'
"#;
    let file = write_definitions(".yaml", yaml)?;
    let rules = RuleSet::load_from_file(file.path())?;

    assert_eq!(rules.active_len(), 2);
    let (scrubbed, report) = logscrub_core::headless_scrub_string(
        rules,
        "DEBUG user=ghost\nINFO user=alice\n",
    )?;
    assert_eq!(scrubbed, "INFO user=alice\n");
    assert_eq!(
        report,
        "Logins\n2 logins\n\tuser: {alice=1, ghost=1}\n\nDebug lines\n1 Match(es)\n"
    );
    Ok(())
}

#[test]
fn test_missing_definitions_file_is_an_error() {
    let err = RuleSet::load_from_file("/definitely/not/here/rules.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read definitions file"));
}

#[test]
fn test_malformed_definitions_report_the_path() -> Result<()> {
    let file = write_definitions(".json", "[ { \"descriptiveName\": \"x\", ")?;
    let err = RuleSet::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse definitions file"));
    assert!(err.chain().any(|cause| cause.to_string().contains("Failed to parse rule definitions")));
    Ok(())
}

#[test]
fn test_group_mismatch_aborts_before_evaluation() -> Result<()> {
    let json = r#"[
  { "descriptiveName": "Fine", "delete": true, "expressions": [ { "regex": "a" } ] },
  { "descriptiveName": "Broken", "expressions": [ { "name": "pair", "regex": "(a)(b)", "groupNames": ["only"] } ] }
]"#;
    let rules = RuleSet::from_json_str(json)?;

    let err = RegexEngine::new(rules.clone()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Statement #2 ('Broken'), expression #1 ('pair')"));
    assert!(message.contains("1 group name(s) declared but the pattern has 2 capture group(s)"));

    assert!(matches!(evaluate("aaa".to_string(), &rules), Err(ScrubError::Fatal(_))));
    Ok(())
}

#[test]
fn test_report_for_loaded_rules_is_deterministic() -> Result<()> {
    let json = r#"[
  { "descriptiveName": "Status", "expressions": [
      { "regex": "status=(\\d+)", "groupNames": ["code"] },
      { "name": "redirects", "regex": "status=3\\d\\d" }
  ] }
]"#;
    let rules = RuleSet::from_json_str(json)?;
    let input = "status=500\nstatus=200\nstatus=404\nstatus=200\n";

    let first = evaluate(input.to_string(), &rules)?;
    let second = evaluate(input.to_string(), &rules)?;
    let report = render_report(&rules, &first.results);

    assert_eq!(report, render_report(&rules, &second.results));
    assert_eq!(
        report,
        "Status\n4 [code]\n\tcode: {200=2, 404=1, 500=1}\nredirects not found\n"
    );
    Ok(())
}

#[test]
fn test_trailing_comma_file_stops_at_the_empty_slot() -> Result<()> {
    let json = r#"[
  { "descriptiveName": "Counted", "expressions": [ { "regex": "ok" } ] },
]"#;
    let file = write_definitions(".json", json)?;
    let rules = RuleSet::load_from_file(file.path())?;
    assert_eq!(rules.entries().len(), 2);
    assert_eq!(rules.active_len(), 1);

    let json = r#"[
  { "descriptiveName": "Counted", "expressions": [ { "regex": "ok" } ] },,
  { "descriptiveName": "Skipped", "delete": true, "expressions": [ { "regex": "ok" } ] }
]"#;
    let file = write_definitions(".json", json)?;
    let rules = RuleSet::load_from_file(file.path())?;
    assert_eq!(rules.truncated_statements(), 1);

    let evaluation = evaluate("ok\n".to_string(), &rules)?;
    assert_eq!(evaluation.buffer, "ok\n");
    assert_eq!(render_report(&rules, &evaluation.results), "Counted\n1 Match(es)\n");
    Ok(())
}
