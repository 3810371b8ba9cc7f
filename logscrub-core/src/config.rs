//! Rule-set model for `logscrub-core`.
//!
//! This module defines the in-memory representation of a definitions file: an ordered
//! list of statements, each grouping one or more regex expressions under a descriptive
//! name and a shared deletion flag. It handles deserialization of JSON and YAML
//! definitions and exposes the statements that will actually be evaluated.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::ScrubError;

/// Display name used for an expression that has neither a name nor group names.
pub const DEFAULT_DISPLAY_NAME: &str = "Match(es)";

/// A single regular expression inside a statement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionDefinition {
    /// Optional display name used in the report.
    #[serde(default)]
    pub name: Option<String>,
    /// The regex pattern. Compiled multi-line and case-insensitive.
    #[serde(rename = "regex", alias = "pattern")]
    pub pattern: String,
    /// Labels for capture groups 1..=n. `None` disables group recording entirely,
    /// which is not the same thing as an empty list.
    #[serde(default)]
    pub group_names: Option<Vec<String>>,
}

impl ExpressionDefinition {
    /// Creates an unnamed expression without group labels.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            name: None,
            pattern: pattern.into(),
            group_names: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_group_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Resolves the name shown in reports.
    ///
    /// Falls back to the group-name list (`[a, b]`) and then to [`DEFAULT_DISPLAY_NAME`].
    pub fn display_name(&self) -> String {
        match (&self.name, &self.group_names) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(groups)) => format!("[{}]", groups.join(", ")),
            _ => DEFAULT_DISPLAY_NAME.to_string(),
        }
    }
}

/// A named group of expressions sharing one deletion flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementDefinition {
    /// Display-only name; not required to be unique.
    #[serde(default)]
    pub descriptive_name: String,
    #[serde(default)]
    pub expressions: Vec<ExpressionDefinition>,
    /// If true, every match of every expression is stripped from the buffer.
    #[serde(default)]
    pub delete: bool,
}

impl StatementDefinition {
    pub fn new(descriptive_name: impl Into<String>) -> Self {
        Self {
            descriptive_name: descriptive_name.into(),
            expressions: Vec::new(),
            delete: false,
        }
    }

    pub fn with_expression(mut self, expression: ExpressionDefinition) -> Self {
        self.expressions.push(expression);
        self
    }

    pub fn deleting(mut self) -> Self {
        self.delete = true;
        self
    }
}

/// Supported definitions file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionsFormat {
    Json,
    Yaml,
}

impl DefinitionsFormat {
    /// `.yaml` and `.yml` select YAML; every other extension is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DefinitionsFormat::Yaml,
            _ => DefinitionsFormat::Json,
        }
    }
}

impl fmt::Display for DefinitionsFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DefinitionsFormat::Json => write!(f, "JSON"),
            DefinitionsFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// The ordered list of entries loaded from a definitions file.
///
/// A `null` entry is kept as `None`. Evaluation stops at the first `None`, so every
/// statement after it is ignored. Definitions files get such entries from a trailing
/// comma or an empty slot in the top-level list, and existing rule files rely on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    entries: Vec<Option<StatementDefinition>>,
}

impl RuleSet {
    pub fn new(entries: Vec<Option<StatementDefinition>>) -> Self {
        Self { entries }
    }

    pub fn from_statements(statements: Vec<StatementDefinition>) -> Self {
        Self {
            entries: statements.into_iter().map(Some).collect(),
        }
    }

    /// All entries as loaded, including null entries.
    pub fn entries(&self) -> &[Option<StatementDefinition>] {
        &self.entries
    }

    /// The statements that are evaluated: every entry before the first null entry.
    pub fn active_statements(&self) -> impl Iterator<Item = &StatementDefinition> + '_ {
        self.entries.iter().map_while(Option::as_ref)
    }

    pub fn active_len(&self) -> usize {
        self.active_statements().count()
    }

    /// Number of real statements that follow the first null entry and will never run.
    pub fn truncated_statements(&self) -> usize {
        self.entries
            .iter()
            .skip_while(|entry| entry.is_some())
            .filter(|entry| entry.is_some())
            .count()
    }

    /// Parses JSON definitions. Empty slots in the top-level list load as null entries.
    pub fn from_json_str(text: &str) -> Result<Self, ScrubError> {
        serde_json::from_str(&fill_empty_list_slots(text))
            .map_err(|e| ScrubError::DefinitionsParse(e.to_string()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ScrubError> {
        serde_yml::from_str(text).map_err(|e| ScrubError::DefinitionsParse(e.to_string()))
    }

    /// Loads rule definitions from a JSON or YAML file, chosen by extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = DefinitionsFormat::from_path(path);
        info!("Loading {} rule definitions from: {}", format, path.display());

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read definitions file {}", path.display()))?;
        let rules = match format {
            DefinitionsFormat::Json => Self::from_json_str(&text),
            DefinitionsFormat::Yaml => Self::from_yaml_str(&text),
        }
        .with_context(|| format!("Failed to parse definitions file {}", path.display()))?;

        rules.inspect_entries();
        info!(
            "Loaded {} statement(s) from file {}.",
            rules.active_len(),
            path.display()
        );
        Ok(rules)
    }

    /// Logs structural oddities that are legal but usually unintended.
    fn inspect_entries(&self) {
        for (index, statement) in self.active_statements().enumerate() {
            if statement.expressions.is_empty() {
                warn!(
                    "Statement #{} ('{}') has no expressions and will only appear in the report header.",
                    index + 1,
                    statement.descriptive_name
                );
            }
        }

        let truncated = self.truncated_statements();
        if truncated > 0 {
            warn!(
                "Null entry at position {} ends the rule list; {} following statement(s) will be ignored.",
                self.active_len() + 1,
                truncated
            );
        } else if self.active_len() < self.entries.len() {
            debug!("Trailing null entry in rule list ignored.");
        }
    }
}

#[derive(PartialEq)]
enum Slot {
    Start,
    AfterComma,
    Filled,
}

/// Writes `null` into every empty slot of the top-level JSON list: `[a,]`, `[a,,b]`
/// and `[,a]`. Strings and nested values pass through untouched.
fn fill_empty_list_slots(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut nesting: Vec<char> = Vec::new();
    let mut slot = Slot::Filled;
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        if nesting == ['['] && !c.is_whitespace() {
            match c {
                ',' => {
                    if slot != Slot::Filled {
                        out.push_str("null");
                    }
                    slot = Slot::AfterComma;
                }
                ']' => {
                    if slot == Slot::AfterComma {
                        out.push_str("null");
                    }
                }
                _ => slot = Slot::Filled,
            }
        }

        match c {
            '"' => in_string = true,
            '[' | '{' => {
                nesting.push(c);
                if nesting == ['['] {
                    slot = Slot::Start;
                }
            }
            ']' | '}' => {
                nesting.pop();
            }
            _ => {}
        }
        out.push(c);
    }
    out
}
